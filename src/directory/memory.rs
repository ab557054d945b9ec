use crate::domain::model::Course;
use crate::domain::ports::CourseDirectory;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Insertion-ordered course store. Immutable after construction, so it is
/// freely shareable across request handlers.
#[derive(Debug, Clone)]
pub struct InMemoryDirectory {
    courses: Vec<Course>,
}

impl InMemoryDirectory {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// Fallback catalog used when no seed data is configured.
    pub fn with_sample_courses() -> Self {
        let courses = [
            (1, "Microservices Course", "Designing and operating microservices"),
            (2, "Distributed Systems", "Consensus, replication and fault tolerance"),
            (3, "Web Services", "SOAP and REST service contracts"),
        ]
        .into_iter()
        .map(|(id, name, description)| Course {
            id,
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect();

        Self { courses }
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

#[async_trait]
impl CourseDirectory for InMemoryDirectory {
    async fn find_by_id(&self, id: i64) -> Result<Option<Course>> {
        Ok(self.courses.iter().find(|course| course.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Course>> {
        Ok(self.courses.clone())
    }
}
