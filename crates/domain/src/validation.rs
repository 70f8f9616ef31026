//! エンドポイントごとの入力検証
//!
//! 生の JSON を受け取り、正規化済みの値か、検出順に並んだ
//! フィールドエラーの一覧を返します。副作用はありません。

use crate::errors::{FieldError, TitleError, ValidationErrors};
use crate::todo::{Title, TodoId, TodoPatch};
use serde_json::Value;

pub const TITLE_REQUIRED: &str = "title es requerido";
pub const TITLE_NOT_TEXT: &str = "title debe ser texto";
pub const COMPLETED_NOT_BOOLEAN: &str = "completed debe ser booleano";
pub const ID_NOT_UUID: &str = "id debe ser un UUID válido";

/// 作成リクエストの検証結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: Title,
}

/// POST /api/todos の本文を検証します。
pub fn validate_create(body: &Value) -> Result<NewTodo, ValidationErrors> {
    match body.get("title") {
        None => Err(FieldError::body("title", TITLE_REQUIRED).into()),
        Some(raw) => parse_title(raw)
            .map(|title| NewTodo { title })
            .map_err(ValidationErrors::from),
    }
}

/// PUT /api/todos/:id の本文を検証します。
/// 省略されたフィールドはパッチに含めません。
pub fn validate_update(body: &Value) -> Result<TodoPatch, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let mut patch = TodoPatch::default();

    if let Some(raw) = body.get("title") {
        match parse_title(raw) {
            Ok(title) => patch.title = Some(title),
            Err(e) => errors.push(e),
        }
    }

    if let Some(raw) = body.get("completed") {
        match raw {
            Value::Bool(completed) => patch.completed = Some(*completed),
            _ => errors.push(FieldError::body("completed", COMPLETED_NOT_BOOLEAN)),
        }
    }

    errors.into_result(patch)
}

/// パスパラメータ `id` を検証します。
pub fn validate_id(raw: &str) -> Result<TodoId, ValidationErrors> {
    TodoId::parse_canonical(raw).ok_or_else(|| FieldError::params("id", ID_NOT_UUID).into())
}

/// 更新リクエスト全体を検証します。
/// id のエラーを先に、続けて本文のエラーを 1 つの一覧にまとめます。
pub fn validate_update_request(
    raw_id: &str,
    body: &Value,
) -> Result<(TodoId, TodoPatch), ValidationErrors> {
    match (validate_id(raw_id), validate_update(body)) {
        (Ok(id), Ok(patch)) => Ok((id, patch)),
        (id, patch) => {
            let mut errors = ValidationErrors::new();
            if let Err(e) = id {
                errors.extend(e);
            }
            if let Err(e) = patch {
                errors.extend(e);
            }
            Err(errors)
        }
    }
}

fn parse_title(raw: &Value) -> Result<Title, FieldError> {
    let Value::String(text) = raw else {
        return Err(FieldError::body("title", TITLE_NOT_TEXT));
    };
    Title::parse(text).map_err(|e| title_error(&e))
}

fn title_error(error: &TitleError) -> FieldError {
    FieldError::body("title", &error.to_string())
}
