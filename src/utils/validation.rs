use crate::domain::model::Course;
use crate::utils::error::{Result, ServiceError};
use std::collections::HashSet;
use std::net::SocketAddr;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_socket_addr(field_name: &str, addr_str: &str) -> Result<SocketAddr> {
    if addr_str.is_empty() {
        return Err(ServiceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr_str.to_string(),
            reason: "Bind address cannot be empty".to_string(),
        });
    }

    addr_str
        .parse()
        .map_err(|e| ServiceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr_str.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(ServiceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_unique_course_ids(field_name: &str, courses: &[Course]) -> Result<()> {
    let mut seen: HashSet<i64> = HashSet::new();

    for course in courses {
        if !seen.insert(course.id) {
            return Err(ServiceError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: course.id.to_string(),
                reason: "Duplicate course id".to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_socket_addr_accepts_host_and_port() {
        let addr = validate_socket_addr("server.bind", "127.0.0.1:8080").unwrap();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_validate_socket_addr_rejects_missing_port() {
        assert!(validate_socket_addr("server.bind", "127.0.0.1").is_err());
        assert!(validate_socket_addr("server.bind", "").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("server.request_timeout_seconds", 30, 1).is_ok());
        assert!(validate_positive_number("server.request_timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("course.name", "Microservices Course").is_ok());
        assert!(validate_non_empty_string("course.name", "   ").is_err());
    }

    #[test]
    fn test_validate_unique_course_ids() {
        let courses = vec![
            Course {
                id: 1,
                name: "A".to_string(),
                description: String::new(),
            },
            Course {
                id: 1,
                name: "B".to_string(),
                description: String::new(),
            },
        ];
        assert!(validate_unique_course_ids("course", &courses).is_err());
        assert!(validate_unique_course_ids("course", &courses[..1]).is_ok());
    }
}
