use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaimokuError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("シートが見つかりません: {sheet}（シート一覧: {available}）")]
    SheetNotFound { sheet: String, available: String },

    #[error("列が見つかりません: {0}")]
    ColumnNotFound(String),

    #[error("列指定が不正です: {0}")]
    InvalidColumn(String),

    #[error("見出し行がシートの範囲外です: {0}行目")]
    HeaderRowOutOfRange(usize),

    #[error("Excel読み込みエラー: {0}")]
    ExcelRead(String),

    #[error("Excel書き込みエラー: {0}")]
    ExcelWrite(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] saimoku_common::Error),
}

pub type Result<T> = std::result::Result<T, SaimokuError>;
