use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use weather_core::WeatherError;

/// Envelope wrapping every gateway response, success or failure.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Short label for the failure class.
    pub error: String,
    /// HTTP status code carried in the body for envelope-only consumers.
    pub code: u16,
    /// Human-readable detail.
    pub message: String,
}

/// Wrapper turning a core error into the enveloped HTTP response.
#[derive(Debug)]
pub struct ApiError(pub WeatherError);

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        if self.0.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn label(&self) -> &'static str {
        match self.0 {
            WeatherError::Validation(_) => "invalid request parameters",
            WeatherError::Transport(_) => "weather provider unreachable",
            WeatherError::Provider { .. } => "weather provider request failed",
            WeatherError::Decode(_) => "malformed weather provider response",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(ErrorBody {
                error: self.label().to_string(),
                code: status.as_u16(),
                message: self.0.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}
