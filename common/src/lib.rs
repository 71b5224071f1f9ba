//! 工事細目判定 共通ライブラリ
//!
//! キーワード規則による判定エンジンと、行単位の一括判定。
//! Excel入出力やCLIは持たない（上位クレートの担当）。

pub mod batch;
pub mod category;
pub mod classifier;
pub mod error;
pub mod keywords;
pub mod rules;

pub use batch::{
    process_rows, resolve_contexts, BatchResult, ClassificationResult, Classifications,
    ParentContext, Row, Tally,
};
pub use category::Category;
pub use classifier::{classify, Classifier, Decision, FALLBACK_RULE};
pub use error::{Error, Result};
pub use rules::{Rule, RuleInput, RULES};
