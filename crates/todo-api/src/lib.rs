//! HTTP API（axum）
//!
//! プロセス内のリストに対する Todo の作成・一覧・取得・更新を提供します。
//! ストアは `AppState` 経由で注入され、テストごとに差し替えられます。

use std::sync::Arc;

use axum::{routing::get, Router};
use domain::{InMemoryTodoStore, TodoStore};
use tower_http::trace::TraceLayer;

pub mod envelope;
pub mod error;
pub mod extract;
pub mod handlers;

pub use error::ApiError;

/// ルータを構築して返します（空のインメモリストア付き）。
pub fn app() -> Router {
    app_with_state(AppState::default())
}

/// 外部から状態を注入できる版
pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/todos",
            get(handlers::list_todos)
                .post(handlers::create_todo)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/todos/:id",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::route_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// アプリケーションの共有状態
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TodoStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn TodoStore {
        self.store.as_ref()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryTodoStore::new()))
    }
}
