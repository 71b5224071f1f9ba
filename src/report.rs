//! 判定結果のレポート
//!
//! コンソールへの集計表示と、JSONレポートの保存。

use crate::error::Result;
use saimoku_common::{BatchResult, Category, ClassificationResult, Tally};
use serde::Serialize;
use std::path::Path;

/// JSONレポート
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    pub generated_at: String,
    pub input: String,
    pub sheet: &'a str,
    /// 判定した行数
    pub total: usize,
    pub tally: &'a Tally,
    pub results: &'a [ClassificationResult],
}

impl<'a> Report<'a> {
    pub fn new(input: &Path, sheet: &'a str, batch: &'a BatchResult) -> Self {
        Self {
            generated_at: chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%:z").to_string(),
            input: input.display().to_string(),
            sheet,
            total: batch.tally.total(),
            tally: &batch.tally,
            results: &batch.results,
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// 集計表（細目の順位順、件数0の細目も含む）
pub fn format_tally(tally: &Tally) -> String {
    let total = tally.total();
    let mut lines = Vec::with_capacity(Category::ALL.len() + 2);
    for (category, count) in tally.iter() {
        lines.push(format!(
            "  {:<14} {:>6}件 {:>6.1}%",
            category.label(),
            count,
            tally.ratio(category) * 100.0
        ));
    }
    lines.push(format!("  {}", "-".repeat(32)));
    lines.push(format!("  {:<14} {:>6}件", "合計", total));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use saimoku_common::{process_rows, Row};

    fn sample_batch() -> BatchResult {
        let rows = vec![
            Row::new(1, "電気設備工事", ""),
            Row::new(2, "分電盤", ""),
            Row::new(3, "屋上防水", ""),
        ];
        process_rows(&rows)
    }

    #[test]
    fn test_format_tally_lists_every_category() {
        let batch = sample_batch();
        let text = format_tally(&batch.tally);

        for category in Category::ALL {
            assert!(text.contains(category.label()), "{} がない", category);
        }
        assert!(text.contains("合計"));
        // 電気設備 → 屋根 → 対象外 の順
        let electric = text.find("4.1 電気設備").unwrap();
        let roof = text.find("2.1 屋根・屋上").unwrap();
        let excluded = text.find("0.0 対象外").unwrap();
        assert!(roof < electric);
        assert!(electric < excluded);
    }

    #[test]
    fn test_report_json() {
        let batch = sample_batch();
        let report = Report::new(Path::new("見積.xlsx"), "内訳", &batch);
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();

        assert_eq!(json["input"], "見積.xlsx");
        assert_eq!(json["sheet"], "内訳");
        assert_eq!(json["total"], 3);
        assert_eq!(json["tally"]["4.1 電気設備"], 2);
        assert_eq!(json["tally"]["2.1 屋根・屋上"], 1);
        assert_eq!(json["results"][0]["category"], "4.1 電気設備");
        assert!(json["generatedAt"].as_str().is_some());
    }

    #[test]
    fn test_report_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let batch = sample_batch();

        Report::new(Path::new("見積.xlsx"), "内訳", &batch).save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("4.1 電気設備"));
    }
}
