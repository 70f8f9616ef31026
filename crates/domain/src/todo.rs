use crate::errors::TitleError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// タイトルの最大文字数（前後の空白を除いた後）
pub const TITLE_MAX_CHARS: usize = 120;

/// UUID の文字列表現を保持する ID
///
/// 比較は文字列として行うため、大文字で指定された ID は
/// 小文字で発行された ID と一致しません。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// ハイフン区切りの正規形式（36 文字）のみを受け付けます。
    /// 形式の検査では大文字・小文字を区別しません。
    pub fn parse_canonical(raw: &str) -> Option<Self> {
        if raw.len() != 36 {
            return None;
        }
        Uuid::parse_str(raw).ok()?;
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

/// 正規化済みのタイトル
///
/// 前後の空白を取り除いた 1〜120 文字の文字列であることを保証します。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Title(String);

impl Title {
    pub fn parse(raw: &str) -> Result<Self, TitleError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TitleError::Empty);
        }
        if trimmed.chars().count() > TITLE_MAX_CHARS {
            return Err(TitleError::TooLong);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Title {
    type Error = TitleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Title> for String {
    fn from(title: Title) -> Self {
        title.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: Title,
    pub completed: bool,
    #[serde(with = "iso8601_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso8601_millis")]
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// 新しい未完了の Todo を作成します（createdAt == updatedAt）。
    pub fn new(title: Title, now: DateTime<Utc>) -> Self {
        Self {
            id: TodoId::new(),
            title,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// パッチを適用した新しいレコードを返します。
    /// 指定されたフィールドだけを置き換え、updatedAt は後退させません。
    pub fn apply_patch(&self, patch: &TodoPatch, now: DateTime<Utc>) -> Self {
        Self {
            id: self.id.clone(),
            title: patch.title.clone().unwrap_or_else(|| self.title.clone()),
            completed: patch.completed.unwrap_or(self.completed),
            created_at: self.created_at,
            updated_at: now.max(self.updated_at),
        }
    }
}

/// 部分更新（指定されたフィールドのみ変更）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<Title>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }
}

/// `2024-01-01T00:00:00.000Z` 形式（ミリ秒精度・UTC）
mod iso8601_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
