//! Todo ドメイン
//!
//! タイトル・完了フラグ・タイムスタンプを持つ Todo と、
//! その入力検証ルール、プロセス内ストアを提供します。

pub mod errors;
pub mod store;
pub mod todo;
pub mod validation;

pub use errors::*;
pub use store::*;
pub use todo::*;
pub use validation::*;
