use crate::domain::model::Course;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Lookup side of the course directory. The endpoint only ever reads.
#[async_trait]
pub trait CourseDirectory: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn find_all(&self) -> Result<Vec<Course>>;
}
