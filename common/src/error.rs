//! エラー型定義
//!
//! 判定処理そのものは失敗しない。ここにあるのは周辺（カテゴリ名の解釈）の失敗のみ。

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unknown_category() {
        let error = Error::UnknownCategory("9.9 不明".to_string());
        assert_eq!(format!("{}", error), "Unknown category: 9.9 不明");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::UnknownCategory("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("UnknownCategory"));
        assert!(debug.contains("テスト"));
    }
}
