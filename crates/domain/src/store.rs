use crate::todo::{Title, Todo, TodoId, TodoPatch};
use chrono::{DateTime, SubsecRound, Utc};
use std::sync::{PoisonError, RwLock};

/// Todo ストアの抽象
///
/// 「見つからない」は `None` で表し、エラーとしては扱いません。
pub trait TodoStore: Send + Sync {
    /// 新しい Todo を末尾に追加して返す
    fn create(&self, title: Title) -> Todo;
    /// 挿入順の全件
    fn list(&self) -> Vec<Todo>;
    fn find_by_id(&self, id: &TodoId) -> Option<Todo>;
    /// パッチを適用したレコードで置き換えて返す
    fn update(&self, id: &TodoId, patch: &TodoPatch) -> Option<Todo>;
}

/// プロセス内のみで保持する実装（再起動で空に戻る）
#[derive(Debug, Default)]
pub struct InMemoryTodoStore {
    todos: RwLock<Vec<Todo>>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.todos.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TodoStore for InMemoryTodoStore {
    fn create(&self, title: Title) -> Todo {
        let todo = Todo::new(title, now());
        self.todos
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(todo.clone());
        todo
    }

    fn list(&self) -> Vec<Todo> {
        self.todos
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn find_by_id(&self, id: &TodoId) -> Option<Todo> {
        self.todos
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|todo| &todo.id == id)
            .cloned()
    }

    fn update(&self, id: &TodoId, patch: &TodoPatch) -> Option<Todo> {
        let mut todos = self.todos.write().unwrap_or_else(PoisonError::into_inner);
        let slot = todos.iter_mut().find(|todo| &todo.id == id)?;
        // 途中状態を見せないよう、マージ済みのレコードで丸ごと置き換える
        let merged = slot.apply_patch(patch, now());
        *slot = merged.clone();
        Some(merged)
    }
}

/// 応答の表現（ミリ秒）に揃えた現在時刻
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
