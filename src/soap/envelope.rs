use crate::soap::xml::{self, Element};
use crate::utils::error::{Result, ServiceError};

pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Pull the payload root out of a request envelope: the first element child
/// of the SOAP Body. Dispatch is keyed on its (namespace, local) pair.
pub fn extract_payload(request_xml: &str) -> Result<Element> {
    let document = xml::parse(request_xml)?;

    if document.namespace != SOAP_ENV_NS || document.local != "Envelope" {
        return Err(ServiceError::XmlError {
            message: format!(
                "document element is not a SOAP 1.1 envelope: {{{}}}{}",
                document.namespace, document.local
            ),
        });
    }

    let body = document
        .child(SOAP_ENV_NS, "Body")
        .ok_or_else(|| ServiceError::XmlError {
            message: "SOAP Body is missing".to_string(),
        })?;

    body.children.first().cloned().ok_or_else(|| ServiceError::XmlError {
        message: "SOAP Body carries no payload".to_string(),
    })
}

/// Wrap a payload in a response envelope. Envelopes are emitted on a single
/// line; some SOAP stacks choke on whitespace between envelope elements.
pub fn success(payload_xml: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <SOAP-ENV:Envelope xmlns:SOAP-ENV=\"{SOAP_ENV_NS}\">\
         <SOAP-ENV:Body>{payload_xml}</SOAP-ENV:Body>\
         </SOAP-ENV:Envelope>"
    )
}

pub fn fault(error: &ServiceError) -> String {
    let code = fault_code(error);
    let message = xml::escape(&error.to_string());
    success(&format!(
        "<SOAP-ENV:Fault><faultcode>{code}</faultcode><faultstring>{message}</faultstring></SOAP-ENV:Fault>"
    ))
}

/// SOAP 1.1 fault codes: Client when the request itself is at fault,
/// Server for everything on our side of the boundary.
fn fault_code(error: &ServiceError) -> &'static str {
    match error {
        ServiceError::CourseNotFoundError { .. }
        | ServiceError::UnknownOperationError { .. }
        | ServiceError::InvalidRequestError { .. }
        | ServiceError::XmlError { .. } => "SOAP-ENV:Client",
        _ => "SOAP-ENV:Server",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_payload_returns_first_body_child() {
        let request = r#"<?xml version="1.0"?>
            <soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
              <soapenv:Header/>
              <soapenv:Body>
                <crs:GetCourseDetailsRequest xmlns:crs="http://java-soap.com/courses">
                  <crs:id>1</crs:id>
                </crs:GetCourseDetailsRequest>
              </soapenv:Body>
            </soapenv:Envelope>"#;

        let payload = extract_payload(request).unwrap();
        assert_eq!(payload.namespace, "http://java-soap.com/courses");
        assert_eq!(payload.local, "GetCourseDetailsRequest");
        assert_eq!(payload.children.len(), 1);
    }

    #[test]
    fn test_extract_payload_rejects_non_envelope_document() {
        let err = extract_payload("<not-soap/>").unwrap_err();
        assert!(err.to_string().contains("not a SOAP 1.1 envelope"));
    }

    #[test]
    fn test_extract_payload_rejects_missing_body() {
        let request = r#"<e:Envelope xmlns:e="http://schemas.xmlsoap.org/soap/envelope/"><e:Header/></e:Envelope>"#;
        let err = extract_payload(request).unwrap_err();
        assert!(err.to_string().contains("Body is missing"));
    }

    #[test]
    fn test_extract_payload_rejects_empty_body() {
        let request = r#"<e:Envelope xmlns:e="http://schemas.xmlsoap.org/soap/envelope/"><e:Body/></e:Envelope>"#;
        let err = extract_payload(request).unwrap_err();
        assert!(err.to_string().contains("no payload"));
    }

    #[test]
    fn test_success_envelope_wraps_payload() {
        let envelope = success("<x>1</x>");
        assert!(envelope.starts_with("<?xml version=\"1.0\""));
        assert!(envelope.contains("<SOAP-ENV:Body><x>1</x></SOAP-ENV:Body>"));
        assert!(!envelope.contains('\n'));
    }

    #[test]
    fn test_fault_for_unknown_course_is_a_client_fault() {
        let envelope = fault(&ServiceError::CourseNotFoundError { id: 99 });
        assert!(envelope.contains("<faultcode>SOAP-ENV:Client</faultcode>"));
        assert!(envelope.contains("<faultstring>course 99 not found</faultstring>"));
    }

    #[test]
    fn test_fault_for_io_error_is_a_server_fault() {
        let io = ServiceError::IoError(std::io::Error::other("disk on fire"));
        let envelope = fault(&io);
        assert!(envelope.contains("<faultcode>SOAP-ENV:Server</faultcode>"));
    }

    #[test]
    fn test_fault_string_is_escaped() {
        let err = ServiceError::InvalidRequestError {
            message: "bad <id> & worse".to_string(),
        };
        let envelope = fault(&err);
        assert!(envelope.contains("bad &lt;id&gt; &amp; worse"));
    }
}
