//! Payload types for the course contract. Requests decode from the parsed
//! payload element; responses render themselves as namespace-qualified XML.

use crate::soap::xml::{self, Element};
use crate::utils::error::{Result, ServiceError};

pub const COURSES_NS: &str = "http://java-soap.com/courses";
pub const GET_COURSE_DETAILS_REQUEST: &str = "GetCourseDetailsRequest";
pub const GET_ALL_COURSE_DETAILS_REQUEST: &str = "GetAllCourseDetailsRequest";

/// Wire twin of the domain Course; only ever lives at the service boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDetails {
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug)]
pub struct GetCourseDetailsRequest {
    pub id: i64,
}

impl GetCourseDetailsRequest {
    pub fn from_payload(payload: &Element) -> Result<Self> {
        let id_text = payload
            .children
            .iter()
            .find(|c| c.local == "id" && (c.namespace == COURSES_NS || c.namespace.is_empty()))
            .map(Element::trimmed_text)
            .ok_or_else(|| ServiceError::InvalidRequestError {
                message: "missing <id> element".to_string(),
            })?;

        let id = id_text
            .parse::<i64>()
            .map_err(|_| ServiceError::InvalidRequestError {
                message: format!("invalid course id: '{}'", id_text),
            })?;

        Ok(Self { id })
    }
}

#[derive(Debug)]
pub struct GetAllCourseDetailsRequest;

#[derive(Debug)]
pub struct GetCourseDetailsResponse {
    pub course_details: CourseDetails,
}

impl GetCourseDetailsResponse {
    pub fn to_xml(&self) -> String {
        format!(
            "<crs:GetCourseDetailsResponse xmlns:crs=\"{COURSES_NS}\">{}</crs:GetCourseDetailsResponse>",
            course_details_xml(&self.course_details)
        )
    }
}

#[derive(Debug)]
pub struct GetAllCourseDetailsResponse {
    pub course_details: Vec<CourseDetails>,
}

impl GetAllCourseDetailsResponse {
    pub fn to_xml(&self) -> String {
        let details: String = self
            .course_details
            .iter()
            .map(course_details_xml)
            .collect();
        format!(
            "<crs:GetAllCourseDetailsResponse xmlns:crs=\"{COURSES_NS}\">{details}</crs:GetAllCourseDetailsResponse>"
        )
    }
}

fn course_details_xml(details: &CourseDetails) -> String {
    format!(
        "<crs:CourseDetails><crs:id>{}</crs:id><crs:name>{}</crs:name><crs:description>{}</crs:description></crs:CourseDetails>",
        details.id,
        xml::escape(&details.name),
        xml::escape(&details.description)
    )
}
