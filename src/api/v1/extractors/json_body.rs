//! `Json<T>` with the crate's error body.
//!
//! axum's own rejection answers 415/422 with plain text; every unparseable body here is a 400
//! `BAD_REQUEST` in the usual JSON shape. A body over the size limit is a 413.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AppError;

pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                debug!(error = %rejection, "rejected request body");
                // Only a length-limit failure while buffering the body carries this status.
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    return Err(AppError::PayloadTooLarge);
                }
                Err(AppError::invalid_request(body_error_message(&rejection)))
            }
        }
    }
}

fn body_error_message(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => "expected application/json",
        JsonRejection::JsonSyntaxError(_) => "malformed JSON body",
        JsonRejection::JsonDataError(_) => "unexpected JSON shape",
        _ => "unreadable request body",
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        extract::DefaultBodyLimit,
        http::header,
        routing::post,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    async fn echo(JsonBody(value): JsonBody<Value>) -> axum::Json<Value> {
        axum::Json(value)
    }

    fn app() -> Router {
        Router::new()
            .route("/echo", post(echo))
            .layer(DefaultBodyLimit::max(32))
    }

    fn json_post(body: String) -> Request {
        Request::post("/echo")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn error_code(res: axum::response::Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        body["error"]["code"].clone()
    }

    #[tokio::test]
    async fn oversized_body_is_payload_too_large() {
        let body = format!(r#"{{"body":"{}"}}"#, "x".repeat(64));
        let res = app().oneshot(json_post(body)).await.unwrap();

        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(error_code(res).await, "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let res = app().oneshot(json_post("{nope".into())).await.unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(res).await, "BAD_REQUEST");
    }

    #[tokio::test]
    async fn small_body_passes_through() {
        let res = app()
            .oneshot(json_post(r#"{"a":1}"#.into()))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
    }
}
