use crate::domain::ports::CourseDirectory;
use crate::endpoint::courses::CourseEndpoint;
use crate::endpoint::router::SoapRouter;
use crate::soap::envelope;
use crate::utils::error::Result;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;

const CONTENT_TYPE_XML: &str = "text/xml; charset=utf-8";

/// Everything a request needs: the endpoint plus its routing table.
pub struct SoapService<D> {
    endpoint: CourseEndpoint<D>,
    router: SoapRouter<D>,
}

impl<D: CourseDirectory> SoapService<D> {
    pub fn new(directory: D) -> Self {
        Self {
            endpoint: CourseEndpoint::new(directory),
            router: SoapRouter::new(),
        }
    }

    /// Turn a raw request body into a status plus response envelope. Faults
    /// go out with HTTP 500 per the SOAP 1.1 HTTP binding.
    pub async fn handle(&self, body: &str) -> (StatusCode, String) {
        match self.process(body).await {
            Ok(payload_xml) => (StatusCode::OK, envelope::success(&payload_xml)),
            Err(err) => {
                tracing::warn!("request failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, envelope::fault(&err))
            }
        }
    }

    async fn process(&self, body: &str) -> Result<String> {
        let payload = envelope::extract_payload(body)?;
        tracing::debug!(
            namespace = %payload.namespace,
            operation = %payload.local,
            "dispatching payload"
        );
        self.router.dispatch(&self.endpoint, &payload).await
    }
}

pub fn app<D: CourseDirectory + 'static>(
    service: Arc<SoapService<D>>,
    request_timeout: Duration,
) -> Router {
    Router::new()
        .route("/ws", post(serve_soap::<D>))
        .route("/health", get(health))
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(service)
}

pub async fn serve<D: CourseDirectory + 'static>(
    service: Arc<SoapService<D>>,
    bind: SocketAddr,
    request_timeout: Duration,
) -> Result<()> {
    let listener = TcpListener::bind(bind).await?;
    let addr = listener.local_addr()?;
    tracing::info!("SOAP endpoint listening on http://{}/ws", addr);

    axum::serve(listener, app(service, request_timeout))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn serve_soap<D: CourseDirectory + 'static>(
    State(service): State<Arc<SoapService<D>>>,
    body: String,
) -> impl IntoResponse {
    let (status, response_xml) = service.handle(&body).await;
    (
        status,
        [(header::CONTENT_TYPE, CONTENT_TYPE_XML)],
        response_xml,
    )
}

async fn health() -> &'static str {
    "OK"
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::InMemoryDirectory;
    use crate::domain::model::Course;

    fn service() -> SoapService<InMemoryDirectory> {
        SoapService::new(InMemoryDirectory::new(vec![Course {
            id: 1,
            name: "Microservices Course".to_string(),
            description: "Intro".to_string(),
        }]))
    }

    fn request_envelope(payload: &str) -> String {
        format!(
            r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
                 <soapenv:Body>{}</soapenv:Body>
               </soapenv:Envelope>"#,
            payload
        )
    }

    #[tokio::test]
    async fn test_handle_known_course_returns_ok_envelope() {
        let body = request_envelope(
            r#"<crs:GetCourseDetailsRequest xmlns:crs="http://java-soap.com/courses"><crs:id>1</crs:id></crs:GetCourseDetailsRequest>"#,
        );

        let (status, xml) = service().handle(&body).await;
        assert_eq!(status, StatusCode::OK);
        assert!(xml.contains("<crs:name>Microservices Course</crs:name>"));
    }

    #[tokio::test]
    async fn test_handle_unknown_course_returns_client_fault() {
        let body = request_envelope(
            r#"<crs:GetCourseDetailsRequest xmlns:crs="http://java-soap.com/courses"><crs:id>99</crs:id></crs:GetCourseDetailsRequest>"#,
        );

        let (status, xml) = service().handle(&body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(xml.contains("<faultcode>SOAP-ENV:Client</faultcode>"));
        assert!(xml.contains("course 99 not found"));
        assert!(!xml.contains("CourseDetails"));
    }

    #[tokio::test]
    async fn test_handle_garbage_body_returns_fault() {
        let (status, xml) = service().handle("this is not xml").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(xml.contains("<SOAP-ENV:Fault>"));
    }
}
