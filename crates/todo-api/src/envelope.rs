//! 全レスポンス共通のエンベロープ
//!
//! - 成功: `{"success": true, "data": ...}`
//! - 失敗: `{"success": false, "error": {"message": ..., "details"?: [...]}}`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::FieldError;
use serde::Serialize;

/// 成功レスポンス（ステータス付き）
#[derive(Debug)]
pub struct ApiSuccess<T> {
    status: StatusCode,
    data: T,
}

impl<T> ApiSuccess<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            data,
        }
    }
}

#[derive(Serialize)]
struct SuccessBody<T> {
    success: bool,
    data: T,
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        let body = SuccessBody {
            success: true,
            data: self.data,
        };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    /// 検証エラー（422）のときのみ出力
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

#[derive(Debug, Serialize)]
struct FailureBody {
    success: bool,
    error: ErrorDetail,
}

/// 失敗エンベロープを組み立てる
pub fn fail(status: StatusCode, message: &str, details: Option<Vec<FieldError>>) -> Response {
    let body = FailureBody {
        success: false,
        error: ErrorDetail {
            message: message.to_string(),
            details,
        },
    };
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body;

    async fn json_of(response: Response) -> serde_json::Value {
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn success_wraps_data() {
        let response = ApiSuccess::created(serde_json::json!({"id": 1})).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = json_of(response).await;
        assert_eq!(json, serde_json::json!({"success": true, "data": {"id": 1}}));
    }

    #[tokio::test]
    async fn failure_omits_details_when_absent() {
        let response = fail(StatusCode::NOT_FOUND, "Tarea no encontrada", None);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = json_of(response).await;
        assert_eq!(
            json,
            serde_json::json!({"success": false, "error": {"message": "Tarea no encontrada"}})
        );
    }

    #[tokio::test]
    async fn failure_includes_details_when_present() {
        let details = vec![FieldError::body("title", "title es requerido")];
        let response = fail(StatusCode::UNPROCESSABLE_ENTITY, "Datos inválidos", Some(details));

        let json = json_of(response).await;
        assert_eq!(json["error"]["details"][0]["field"], "title");
        assert_eq!(json["error"]["details"][0]["location"], "body");
    }
}
