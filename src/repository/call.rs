//! Outcome normalization shared by every repository.
//!
//! A call is one attempt. Whatever happens on the wire comes back as
//! `Ok(payload)` or `Err(RepositoryError)`.

use std::future::Future;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::error::{Outcome, RepositoryError};

/// Status and body of a response, read to completion.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    async fn read(response: Response) -> Outcome<Self> {
        let status = response.status();
        let body = response.bytes().await?;
        Ok(Self::new(status, body.to_vec()))
    }

    fn is_empty(&self) -> bool {
        self.body.iter().all(|b| b.is_ascii_whitespace())
    }

    fn into_error(self) -> RepositoryError {
        RepositoryError::Http {
            status: self.status.as_u16(),
            message: self
                .status
                .canonical_reason()
                .unwrap_or_default()
                .to_string(),
            body: String::from_utf8_lossy(&self.body).trim().to_string(),
        }
    }
}

/// Normalize a response to an endpoint that returns a body.
pub fn expect_json<T: DeserializeOwned>(raw: RawResponse) -> Outcome<T> {
    if !raw.status.is_success() {
        return Err(raw.into_error());
    }
    if raw.is_empty() {
        return Err(RepositoryError::EmptyBody);
    }
    Ok(serde_json::from_slice(&raw.body)?)
}

/// Normalize a response to a bodiless endpoint. Any body is ignored.
pub fn expect_empty(raw: RawResponse) -> Outcome<()> {
    if !raw.status.is_success() {
        return Err(raw.into_error());
    }
    Ok(())
}

/// Run `op` and decode its JSON body.
pub async fn call_json<T, F>(operation: &'static str, op: F) -> Outcome<T>
where
    T: DeserializeOwned,
    F: Future<Output = reqwest::Result<Response>>,
{
    run(operation, op, expect_json).await
}

/// Run `op` against an endpoint declared bodiless.
pub async fn call_empty<F>(operation: &'static str, op: F) -> Outcome<()>
where
    F: Future<Output = reqwest::Result<Response>>,
{
    run(operation, op, expect_empty).await
}

async fn run<T, F>(
    operation: &'static str,
    op: F,
    normalize: fn(RawResponse) -> Outcome<T>,
) -> Outcome<T>
where
    F: Future<Output = reqwest::Result<Response>>,
{
    let request_id = Uuid::new_v4();
    tracing::debug!(%request_id, operation, "Request started");

    let outcome = match op.await {
        Ok(response) => match RawResponse::read(response).await {
            Ok(raw) => {
                tracing::debug!(%request_id, operation, status = raw.status.as_u16(), "Response received");
                normalize(raw)
            }
            Err(e) => Err(e),
        },
        Err(e) => Err(RepositoryError::Transport(e)),
    };

    if let Err(e) = &outcome {
        tracing::warn!(%request_id, operation, error = %e, "Request failed");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Created {
        id: i64,
        message: String,
    }

    #[test]
    fn success_with_body() {
        let raw = RawResponse::new(StatusCode::CREATED, r#"{"id":42,"message":"created"}"#);
        let created: Created = expect_json(raw).unwrap();
        assert_eq!(
            created,
            Created {
                id: 42,
                message: "created".to_string()
            }
        );
    }

    #[test]
    fn success_without_expected_body() {
        let raw = RawResponse::new(StatusCode::OK, "  \n");
        let result: Outcome<Created> = expect_json(raw);
        assert!(matches!(result, Err(RepositoryError::EmptyBody)));
    }

    #[test]
    fn bodiless_endpoint_accepts_empty_and_non_empty() {
        assert!(expect_empty(RawResponse::new(StatusCode::NO_CONTENT, "")).is_ok());
        assert!(expect_empty(RawResponse::new(StatusCode::OK, r#"{"message":"deleted"}"#)).is_ok());
    }

    #[test]
    fn non_success_status_formats_message() {
        let raw = RawResponse::new(StatusCode::FORBIDDEN, r#"{"error":"not owner"}"#);
        let err = expect_empty(raw).unwrap_err();
        assert_eq!(err.to_string(), r#"HTTP 403: Forbidden - {"error":"not owner"}"#);
    }

    #[test]
    fn error_status_wins_over_body_shape() {
        let raw = RawResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "");
        let result: Outcome<Created> = expect_json(raw);
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP 500: Internal Server Error - "
        );
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let raw = RawResponse::new(StatusCode::OK, r#"{"id":"not a number"}"#);
        let result: Outcome<Created> = expect_json(raw);
        assert!(matches!(result, Err(RepositoryError::Decode(_))));
    }
}
