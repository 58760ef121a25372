//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use reqwest::StatusCode;
use roxmltree::Error as XmlError;
use serde_json::Error as JsonError;
use traincast_domain::TraincastError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub TraincastError);

impl From<InfraError> for TraincastError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<TraincastError> for InfraError {
    fn from(value: TraincastError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoTraincastError {
    fn into_traincast(self) -> TraincastError;
}

/// Classify a non-success HTTP status returned by `service`.
///
/// The response text is kept in the message so callers see the service's
/// own diagnostic.
pub fn status_error(service: &str, status: StatusCode, body: &str) -> TraincastError {
    let message = format!("{service} error ({status}): {}", body.trim());
    match status.as_u16() {
        401 | 403 => TraincastError::Auth(message),
        404 => TraincastError::NotFound(message),
        408 | 429 | 500..=599 => TraincastError::Network(message),
        _ => TraincastError::External(message),
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TraincastError */
/* -------------------------------------------------------------------------- */

impl IntoTraincastError for HttpError {
    fn into_traincast(self) -> TraincastError {
        if self.is_timeout() {
            return TraincastError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return TraincastError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => TraincastError::Auth(message),
                404 => TraincastError::NotFound(message),
                429 => TraincastError::Network(message),
                400..=499 => TraincastError::External(message),
                _ => TraincastError::Network(message),
            };
        }

        if self.is_decode() {
            return TraincastError::External(format!("invalid response body: {self}"));
        }

        TraincastError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_traincast())
    }
}

/* -------------------------------------------------------------------------- */
/* roxmltree::Error → TraincastError */
/* -------------------------------------------------------------------------- */

impl IntoTraincastError for XmlError {
    fn into_traincast(self) -> TraincastError {
        TraincastError::External(format!("malformed XML response: {self}"))
    }
}

impl From<XmlError> for InfraError {
    fn from(value: XmlError) -> Self {
        InfraError(value.into_traincast())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → TraincastError */
/* -------------------------------------------------------------------------- */

impl IntoTraincastError for JsonError {
    fn into_traincast(self) -> TraincastError {
        if self.is_io() {
            TraincastError::Network(format!("failed to read JSON body: {self}"))
        } else {
            TraincastError::External(format!("unexpected JSON payload: {self}"))
        }
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_traincast())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::Client;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn status_error_classifies_codes() {
        assert!(matches!(
            status_error("Graph", StatusCode::FORBIDDEN, "denied"),
            TraincastError::Auth(msg) if msg == "Graph error (403 Forbidden): denied"
        ));
        assert!(matches!(
            status_error("Graph", StatusCode::NOT_FOUND, ""),
            TraincastError::NotFound(_)
        ));
        assert!(matches!(
            status_error("EWS", StatusCode::SERVICE_UNAVAILABLE, "busy"),
            TraincastError::Network(_)
        ));
        assert!(matches!(
            status_error("Graph", StatusCode::BAD_REQUEST, "bad"),
            TraincastError::External(_)
        ));
    }

    #[test]
    fn json_syntax_error_is_external() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let infra: InfraError = err.into();
        assert!(matches!(infra.0, TraincastError::External(_)));
    }

    #[test]
    fn xml_error_is_external() {
        let err = roxmltree::Document::parse("<open>").unwrap_err();
        let domain: TraincastError = InfraError::from(err).into();
        assert!(matches!(domain, TraincastError::External(msg) if msg.contains("malformed XML")));
    }

    #[tokio::test]
    async fn reqwest_status_errors_map_to_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET")).respond_with(ResponseTemplate::new(401)).mount(&server).await;

        let err = Client::new()
            .get(server.uri())
            .send()
            .await
            .unwrap()
            .error_for_status()
            .unwrap_err();

        let infra: InfraError = err.into();
        assert!(matches!(infra.0, TraincastError::Auth(msg) if msg.contains("401")));
    }

    #[tokio::test]
    async fn connection_refused_maps_to_network() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = Client::new().get(format!("http://{addr}")).send().await.unwrap_err();
        let infra: InfraError = err.into();
        assert!(matches!(infra.0, TraincastError::Network(_)));
    }
}
