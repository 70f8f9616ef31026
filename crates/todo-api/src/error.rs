use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::ValidationErrors;
use thiserror::Error;

use crate::envelope;

pub const NOT_FOUND_MESSAGE: &str = "Tarea no encontrada";
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Ruta no encontrada";
pub const INVALID_JSON_MESSAGE: &str = "JSON inválido";
pub const INVALID_BODY_MESSAGE: &str = "Cuerpo de la solicitud inválido";
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Cuerpo de la solicitud demasiado grande";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Método no permitido";

#[derive(Debug, Error)]
pub enum ApiError {
    /// 入力検証エラー（422、詳細付き）
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    NotFound(&'static str),

    /// 本文が JSON として解釈できない等（400）
    #[error("{0}")]
    BadRequest(&'static str),

    /// 本文の読み取りに失敗（上限超過なら 413）
    #[error("{message}")]
    BodyRejected {
        status: StatusCode,
        message: &'static str,
    },
}

impl ApiError {
    pub fn todo_not_found() -> Self {
        ApiError::NotFound(NOT_FOUND_MESSAGE)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::BodyRejected { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        let details = match self {
            ApiError::Validation(errors) => Some(errors.into_inner()),
            ApiError::NotFound(_) | ApiError::BadRequest(_) | ApiError::BodyRejected { .. } => None,
        };
        envelope::fail(status, &message, details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::FieldError;

    #[test]
    fn status_codes() {
        let validation = ApiError::from(ValidationErrors::from(FieldError::body("title", "x")));
        assert_eq!(validation.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ApiError::todo_not_found().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::BadRequest(INVALID_JSON_MESSAGE).status(),
            StatusCode::BAD_REQUEST
        );
        let too_large = ApiError::BodyRejected {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: PAYLOAD_TOO_LARGE_MESSAGE,
        };
        assert_eq!(too_large.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(too_large.to_string(), PAYLOAD_TOO_LARGE_MESSAGE);
    }

    #[test]
    fn messages() {
        let validation = ApiError::from(ValidationErrors::new());
        assert_eq!(validation.to_string(), "Datos inválidos");
        assert_eq!(ApiError::todo_not_found().to_string(), "Tarea no encontrada");
    }
}
