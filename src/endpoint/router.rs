//! Dispatch from the payload root's (namespace, local part) to a handler,
//! through an explicit routing table rather than any reflective machinery.

use crate::domain::ports::CourseDirectory;
use crate::endpoint::courses::CourseEndpoint;
use crate::endpoint::messages::{
    GetAllCourseDetailsRequest, GetCourseDetailsRequest, COURSES_NS,
    GET_ALL_COURSE_DETAILS_REQUEST, GET_COURSE_DETAILS_REQUEST,
};
use crate::soap::xml::Element;
use crate::utils::error::{Result, ServiceError};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;
type Handler<D> = for<'a> fn(&'a CourseEndpoint<D>, &'a Element) -> HandlerFuture<'a>;

pub struct SoapRouter<D> {
    routes: HashMap<(String, String), Handler<D>>,
}

impl<D: CourseDirectory> SoapRouter<D> {
    pub fn new() -> Self {
        let mut routes: HashMap<(String, String), Handler<D>> = HashMap::new();
        routes.insert(
            (COURSES_NS.to_string(), GET_COURSE_DETAILS_REQUEST.to_string()),
            get_course_details::<D>,
        );
        routes.insert(
            (
                COURSES_NS.to_string(),
                GET_ALL_COURSE_DETAILS_REQUEST.to_string(),
            ),
            get_all_course_details::<D>,
        );
        Self { routes }
    }

    /// Route a payload to its handler; the result is the response payload XML.
    pub async fn dispatch(&self, endpoint: &CourseEndpoint<D>, payload: &Element) -> Result<String> {
        let key = (payload.namespace.clone(), payload.local.clone());
        let handler = self
            .routes
            .get(&key)
            .ok_or_else(|| ServiceError::UnknownOperationError {
                namespace: payload.namespace.clone(),
                local: payload.local.clone(),
            })?;

        handler(endpoint, payload).await
    }
}

impl<D: CourseDirectory> Default for SoapRouter<D> {
    fn default() -> Self {
        Self::new()
    }
}

fn get_course_details<'a, D: CourseDirectory>(
    endpoint: &'a CourseEndpoint<D>,
    payload: &'a Element,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let request = GetCourseDetailsRequest::from_payload(payload)?;
        let response = endpoint.get_course_details(request).await?;
        Ok(response.to_xml())
    })
}

fn get_all_course_details<'a, D: CourseDirectory>(
    endpoint: &'a CourseEndpoint<D>,
    _payload: &'a Element,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let response = endpoint
            .get_all_course_details(GetAllCourseDetailsRequest)
            .await?;
        Ok(response.to_xml())
    })
}
