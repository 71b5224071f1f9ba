use crate::error::{Result, SaimokuError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 対象シート（未指定は先頭シート）
    pub sheet: Option<String>,
    /// 見出し行（1始まり）
    pub header_row: usize,
    /// 項目名の列（見出し名または列記号）
    pub name_column: String,
    /// 工事区分の列
    pub work_column: String,
    /// 判定結果を書き込む列
    pub result_column: String,
    /// 集計シート名
    pub summary_sheet: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet: None,
            header_row: 1,
            name_column: "名称".into(),
            work_column: "工種".into(),
            result_column: "判定結果".into(),
            summary_sheet: "集計".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SaimokuError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("saimoku").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        if self.header_row == 0 {
            return Err(SaimokuError::Config("見出し行は1以上で指定してください".into()));
        }
        if self.name_column.trim().is_empty() || self.result_column.trim().is_empty() {
            return Err(SaimokuError::Config("項目名列と判定結果列は必須です".into()));
        }
        if self.summary_sheet.trim().is_empty() {
            return Err(SaimokuError::Config("集計シート名が空です".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.header_row, 1);
        assert_eq!(config.name_column, "名称");
        assert_eq!(config.result_column, "判定結果");
        assert!(config.sheet.is_none());
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            sheet: Some("内訳".into()),
            header_row: 3,
            name_column: "B".into(),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "header_row": 2 }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.header_row, 2);
        assert_eq!(config.name_column, "名称");
    }

    #[test]
    fn test_invalid_header_row_rejected() {
        let config = Config { header_row: 0, ..Default::default() };
        let dir = tempfile::tempdir().unwrap();
        let err = config.save_to(&dir.path().join("config.json")).unwrap_err();
        assert!(matches!(err, SaimokuError::Config(_)));
    }
}
