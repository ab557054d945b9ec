use crate::domain::model::Course;
use crate::domain::ports::CourseDirectory;
use crate::endpoint::messages::{
    CourseDetails, GetAllCourseDetailsRequest, GetAllCourseDetailsResponse,
    GetCourseDetailsRequest, GetCourseDetailsResponse,
};
use crate::utils::error::{Result, ServiceError};

/// The course lookup endpoint: stateless request/response mapping over
/// directory reads.
pub struct CourseEndpoint<D> {
    directory: D,
}

impl<D: CourseDirectory> CourseEndpoint<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub async fn get_course_details(
        &self,
        request: GetCourseDetailsRequest,
    ) -> Result<GetCourseDetailsResponse> {
        tracing::debug!("looking up course {}", request.id);

        let course = self
            .directory
            .find_by_id(request.id)
            .await?
            .ok_or(ServiceError::CourseNotFoundError { id: request.id })?;

        Ok(GetCourseDetailsResponse {
            course_details: map_course(&course),
        })
    }

    pub async fn get_all_course_details(
        &self,
        _request: GetAllCourseDetailsRequest,
    ) -> Result<GetAllCourseDetailsResponse> {
        let courses = self.directory.find_all().await?;
        tracing::debug!("returning {} courses", courses.len());

        Ok(GetAllCourseDetailsResponse {
            course_details: courses.iter().map(map_course).collect(),
        })
    }
}

fn map_course(course: &Course) -> CourseDetails {
    CourseDetails {
        id: course.id,
        name: course.name.clone(),
        description: course.description.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct MockDirectory {
        courses: Vec<Course>,
    }

    impl MockDirectory {
        fn with_courses(courses: Vec<Course>) -> Self {
            Self { courses }
        }
    }

    #[async_trait]
    impl CourseDirectory for MockDirectory {
        async fn find_by_id(&self, id: i64) -> Result<Option<Course>> {
            Ok(self.courses.iter().find(|c| c.id == id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Course>> {
            Ok(self.courses.clone())
        }
    }

    struct FailingDirectory;

    #[async_trait]
    impl CourseDirectory for FailingDirectory {
        async fn find_by_id(&self, _id: i64) -> Result<Option<Course>> {
            Err(ServiceError::IoError(std::io::Error::other("backend down")))
        }

        async fn find_all(&self) -> Result<Vec<Course>> {
            Err(ServiceError::IoError(std::io::Error::other("backend down")))
        }
    }

    fn sample_courses() -> Vec<Course> {
        vec![
            Course {
                id: 1,
                name: "Microservices Course".to_string(),
                description: "Intro".to_string(),
            },
            Course {
                id: 2,
                name: "Distributed Systems".to_string(),
                description: "Consensus and replication".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn test_get_course_details_maps_fields_exactly() {
        let endpoint = CourseEndpoint::new(MockDirectory::with_courses(sample_courses()));

        let response = endpoint
            .get_course_details(GetCourseDetailsRequest { id: 1 })
            .await
            .unwrap();

        assert_eq!(response.course_details.id, 1);
        assert_eq!(response.course_details.name, "Microservices Course");
        assert_eq!(response.course_details.description, "Intro");
    }

    #[tokio::test]
    async fn test_get_course_details_unknown_id_is_not_found() {
        let endpoint = CourseEndpoint::new(MockDirectory::with_courses(sample_courses()));

        let err = endpoint
            .get_course_details(GetCourseDetailsRequest { id: 99 })
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::CourseNotFoundError { id: 99 }));
    }

    #[tokio::test]
    async fn test_get_all_course_details_mirrors_directory_order() {
        let endpoint = CourseEndpoint::new(MockDirectory::with_courses(sample_courses()));

        let response = endpoint
            .get_all_course_details(GetAllCourseDetailsRequest)
            .await
            .unwrap();

        assert_eq!(response.course_details.len(), 2);
        assert_eq!(response.course_details[0].id, 1);
        assert_eq!(response.course_details[1].id, 2);
        assert_eq!(response.course_details[1].name, "Distributed Systems");
    }

    #[tokio::test]
    async fn test_get_all_course_details_empty_directory() {
        let endpoint = CourseEndpoint::new(MockDirectory::with_courses(Vec::new()));

        let response = endpoint
            .get_all_course_details(GetAllCourseDetailsRequest)
            .await
            .unwrap();

        assert!(response.course_details.is_empty());
    }

    #[tokio::test]
    async fn test_directory_failure_propagates() {
        let endpoint = CourseEndpoint::new(FailingDirectory);

        let err = endpoint
            .get_course_details(GetCourseDetailsRequest { id: 1 })
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::IoError(_)));
    }
}
