use std::convert::Infallible;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header, request::Parts, HeaderMap, StatusCode},
};
use serde_json::{Map, Value};

use crate::error::{ApiError, INVALID_BODY_MESSAGE, INVALID_JSON_MESSAGE, PAYLOAD_TOO_LARGE_MESSAGE};

/// 本文を任意の JSON 値として取り出すエクストラクタ
///
/// Content-Type が `application/json` 以外、または本文が空のときは
/// 空オブジェクトとして扱う。構文エラーは 400、上限超過は 413 の
/// エンベロープで返す。
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody(pub Value);

impl JsonBody {
    fn empty() -> Self {
        JsonBody(Value::Object(Map::new()))
    }
}

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content_type(req.headers()) {
            return Ok(JsonBody::empty());
        }

        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            let status = e.status();
            tracing::debug!(%status, error = %e.body_text(), "failed to read request body");
            let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
                PAYLOAD_TOO_LARGE_MESSAGE
            } else {
                INVALID_BODY_MESSAGE
            };
            ApiError::BodyRejected { status, message }
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody::empty());
        }

        serde_json::from_slice(&bytes).map(JsonBody).map_err(|e| {
            tracing::debug!(error = %e, "request body is not valid JSON");
            ApiError::BadRequest(INVALID_JSON_MESSAGE)
        })
    }
}

/// `application/json`（パラメータ付きも可）かどうか
fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}

/// パスパラメータ `id` の生の値
///
/// デコードできない値（不正な UTF-8 など）は空文字列にして返し、
/// 形式検証で 422 として扱わせる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for RawId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(RawId(id)),
            Err(e) => {
                tracing::debug!(error = %e.body_text(), "path id could not be decoded");
                Ok(RawId(String::new()))
            }
        }
    }
}
