use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Wrapper for API responses producing the `{status, message?, data?, result?}`
/// envelope. The numeric status is echoed in the body.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub status_code: StatusCode,
    pub message: Option<&'static str>,
    pub payload: Payload<T>,
}

/// Which envelope key carries the payload
#[derive(Debug)]
pub enum Payload<T> {
    Data(T),
    Result(T),
    Empty,
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with `data`
    pub fn success(data: T) -> Self {
        Self {
            status_code: StatusCode::OK,
            message: None,
            payload: Payload::Data(data),
        }
    }

    /// 201 with a confirmation message and the insert `result`
    pub fn created(message: &'static str, result: T) -> Self {
        Self {
            status_code: StatusCode::CREATED,
            message: Some(message),
            payload: Payload::Result(result),
        }
    }
}

impl ApiResponse<()> {
    /// Status and confirmation message only
    pub fn message(status_code: StatusCode, message: &'static str) -> Self {
        Self {
            status_code,
            message: Some(message),
            payload: Payload::Empty,
        }
    }

    pub fn ok(message: &'static str) -> Self {
        Self::message(StatusCode::OK, message)
    }

    /// 204 still carries the envelope; the HTTP server drops the body on the wire
    pub fn deleted(message: &'static str) -> Self {
        Self::message(StatusCode::NO_CONTENT, message)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let (data, result) = match &self.payload {
            Payload::Data(value) => (Some(value), None),
            Payload::Result(value) => (None, Some(value)),
            Payload::Empty => (None, None),
        };

        let envelope = Envelope {
            status: self.status_code.as_u16(),
            message: self.message,
            data,
            result,
        };

        match serde_json::to_value(&envelope) {
            Ok(body) => (self.status_code, Json(body)).into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "status": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                        "message": crate::constants::INTERNAL_SERVER_ERROR_MESSAGE,
                    })),
                )
                    .into_response()
            }
        }
    }
}
