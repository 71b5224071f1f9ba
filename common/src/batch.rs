//! 行単位の一括判定
//!
//! 行順に「直近の設備工事見出し」を引き継ぎながら判定し、細目ごとの件数を集計する。
//!
//! ## 処理フロー
//! 1. 項目名が空の行は読み飛ばす（見出しも更新しない）
//! 2. 項目名に「設備工事」を含む行は、その行自身を判定する前に見出しを差し替える
//! 3. 判定して (行番号, 細目) を出力し、件数を加算する

use crate::category::Category;
use crate::classifier::{Classifier, Decision};
use crate::keywords::EQUIPMENT_SECTION_MARKER;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;

/// 入力行
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// 行番号（シート上の行番号など、呼び出し側の採番）
    pub index: usize,
    /// 項目名
    #[serde(default)]
    pub name: Option<String>,
    /// 工事区分
    #[serde(default)]
    pub work_category: Option<String>,
}

impl Row {
    pub fn new(index: usize, name: impl Into<String>, work_category: impl Into<String>) -> Self {
        Self {
            index,
            name: Some(name.into()),
            work_category: Some(work_category.into()),
        }
    }

    /// 項目名（未設定は空文字）
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// 工事区分（未設定は空文字）
    pub fn work_category(&self) -> &str {
        self.work_category.as_deref().unwrap_or_default()
    }

    /// 判定対象外の空行か
    pub fn is_blank(&self) -> bool {
        self.name().trim().is_empty()
    }
}

/// 1行分の判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub index: usize,
    pub category: Category,
    /// 一致したルール名
    pub rule: &'static str,
}

impl ClassificationResult {
    fn new(index: usize, decision: Decision) -> Self {
        Self {
            index,
            category: decision.category,
            rule: decision.rule,
        }
    }
}

/// 直近の設備工事見出し
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentContext(String);

impl ParentContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 見出し行なら差し替えて `true`
    pub fn observe(&mut self, name: &str) -> bool {
        if name.contains(EQUIPMENT_SECTION_MARKER) {
            self.0 = name.to_string();
            true
        } else {
            false
        }
    }
}

/// 細目ごとの件数
///
/// 16細目すべてを0件で初期化しておく（該当なしの細目も集計表に出すため）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tally {
    counts: BTreeMap<Category, usize>,
}

impl Default for Tally {
    fn default() -> Self {
        Self {
            counts: Category::ALL.iter().map(|&c| (c, 0)).collect(),
        }
    }
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, category: Category) {
        *self.counts.entry(category).or_insert(0) += 1;
    }

    pub fn get(&self, category: Category) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// 総件数
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// 表示順に (細目, 件数)
    pub fn iter(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        self.counts.iter().map(|(&c, &n)| (c, n))
    }

    /// 全体に占める割合（0.0-1.0）
    pub fn ratio(&self, category: Category) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.get(category) as f64 / total as f64
    }
}

impl FromIterator<Category> for Tally {
    fn from_iter<T: IntoIterator<Item = Category>>(iter: T) -> Self {
        let mut tally = Tally::new();
        for category in iter {
            tally.record(category);
        }
        tally
    }
}

/// 一括判定の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub results: Vec<ClassificationResult>,
    pub tally: Tally,
}

/// 行を順に判定する遅延イテレータ
///
/// 見出しの状態はイテレータ自身が持つ。途中で打ち切ってよいが、再開は先頭からやり直す。
pub struct Classifications<'c, I> {
    classifier: &'c Classifier,
    rows: I,
    context: ParentContext,
}

impl<'c, I> Classifications<'c, I> {
    /// 現在の見出し
    pub fn context(&self) -> &str {
        self.context.as_str()
    }
}

impl<'c, I> Iterator for Classifications<'c, I>
where
    I: Iterator,
    I::Item: Borrow<Row>,
{
    type Item = ClassificationResult;

    fn next(&mut self) -> Option<Self::Item> {
        for row in self.rows.by_ref() {
            let row = row.borrow();
            let name = row.name().trim();
            if name.is_empty() {
                continue;
            }

            self.context.observe(name);
            if let Some(decision) =
                self.classifier
                    .decide(name, row.work_category(), self.context.as_str())
            {
                return Some(ClassificationResult::new(row.index, decision));
            }
        }
        None
    }
}

impl Classifier {
    /// 行を順に判定するイテレータを作る
    pub fn classify_rows<I>(&self, rows: I) -> Classifications<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Borrow<Row>,
    {
        Classifications {
            classifier: self,
            rows: rows.into_iter(),
            context: ParentContext::new(),
        }
    }

    /// 全行を判定して集計する
    pub fn process_rows<I>(&self, rows: I) -> BatchResult
    where
        I: IntoIterator,
        I::Item: Borrow<Row>,
    {
        let mut tally = Tally::new();
        let results: Vec<ClassificationResult> = self
            .classify_rows(rows)
            .inspect(|r| tally.record(r.category))
            .collect();
        BatchResult { results, tally }
    }

    /// 見出しを先に確定させてから並列に判定する
    ///
    /// 結果は `process_rows` と同じ順序・同じ内容になる。
    #[cfg(feature = "parallel")]
    pub fn process_rows_parallel(&self, rows: &[Row]) -> BatchResult {
        use rayon::prelude::*;

        let contexts = resolve_contexts(rows);
        let results: Vec<ClassificationResult> = rows
            .par_iter()
            .zip(contexts.par_iter())
            .filter_map(|(row, context)| {
                self.decide(row.name(), row.work_category(), context)
                    .map(|decision| ClassificationResult::new(row.index, decision))
            })
            .collect();
        let tally = results.iter().map(|r| r.category).collect();
        BatchResult { results, tally }
    }
}

/// 各行の判定時点で有効な見出しを求める
///
/// 見出し行は自分自身が見出しになる。空行にはその時点の見出しを入れておく（判定には使わない）。
pub fn resolve_contexts(rows: &[Row]) -> Vec<&str> {
    let mut current = "";
    rows.iter()
        .map(|row| {
            let name = row.name().trim();
            if name.contains(EQUIPMENT_SECTION_MARKER) {
                current = name;
            }
            current
        })
        .collect()
}

/// 標準ルールで全行を判定して集計する
pub fn process_rows(rows: &[Row]) -> BatchResult {
    Classifier::default().process_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<Row> {
        vec![
            Row::new(1, "電気設備工事", ""),
            Row::new(2, "分電盤", ""),
            Row::new(3, "", ""),
            Row::new(4, "屋上防水", ""),
        ]
    }

    #[test]
    fn test_parent_context_observe() {
        let mut context = ParentContext::new();
        assert_eq!(context.as_str(), "");
        assert!(!context.observe("分電盤"));
        assert_eq!(context.as_str(), "");
        assert!(context.observe("電気設備工事"));
        assert_eq!(context.as_str(), "電気設備工事");
        assert!(context.observe("給排水衛生設備工事"));
        assert_eq!(context.as_str(), "給排水衛生設備工事");
    }

    #[test]
    fn test_tally_seeded() {
        let tally = Tally::new();
        assert_eq!(tally.iter().count(), 16);
        assert_eq!(tally.total(), 0);
        assert_eq!(tally.ratio(Category::Roof), 0.0);
    }

    #[test]
    fn test_tally_from_iter() {
        let tally: Tally = [Category::Roof, Category::Roof, Category::Rebar].into_iter().collect();
        assert_eq!(tally.get(Category::Roof), 2);
        assert_eq!(tally.get(Category::Rebar), 1);
        assert_eq!(tally.get(Category::Ceiling), 0);
        assert_eq!(tally.total(), 3);
        assert!((tally.ratio(Category::Roof) - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_tally_serializes_with_labels() {
        let tally: Tally = [Category::Roof].into_iter().collect();
        let json = serde_json::to_value(&tally).unwrap();
        assert_eq!(json["2.1 屋根・屋上"], 1);
        assert_eq!(json["0.0 対象外"], 0);

        let back: Tally = serde_json::from_value(json).unwrap();
        assert_eq!(back, tally);
    }

    #[test]
    fn test_row_from_json() {
        let row: Row = serde_json::from_str(r#"{"index": 3, "name": "分電盤"}"#).unwrap();
        assert_eq!(row.index, 3);
        assert_eq!(row.name(), "分電盤");
        assert_eq!(row.work_category, None);
        assert_eq!(row.work_category(), "");
    }

    #[test]
    fn test_tally_iter_in_display_order() {
        let tally = Tally::new();
        let order: Vec<Category> = tally.iter().map(|(c, _)| c).collect();
        assert_eq!(order, Category::ALL.to_vec());
    }

    #[test]
    fn test_process_rows_scenario() {
        let output = process_rows(&sample_rows());

        let pairs: Vec<(usize, Category)> =
            output.results.iter().map(|r| (r.index, r.category)).collect();
        assert_eq!(
            pairs,
            vec![
                (1, Category::ElectricEquipment),
                (2, Category::ElectricEquipment),
                (4, Category::Roof),
            ]
        );
        assert_eq!(output.tally.get(Category::ElectricEquipment), 2);
        assert_eq!(output.tally.get(Category::Roof), 1);
        assert_eq!(output.tally.total(), 3);
        for (category, count) in output.tally.iter() {
            if category != Category::ElectricEquipment && category != Category::Roof {
                assert_eq!(count, 0);
            }
        }
    }

    #[test]
    fn test_context_progression() {
        let rows = sample_rows();
        let classifier = Classifier::default();
        let mut iter = classifier.classify_rows(&rows);
        assert_eq!(iter.context(), "");
        iter.next();
        assert_eq!(iter.context(), "電気設備工事");
        iter.next();
        assert_eq!(iter.context(), "電気設備工事");
        // 空行を飛ばして4行目
        let fourth = iter.next().unwrap();
        assert_eq!(fourth.index, 4);
        assert_eq!(iter.context(), "電気設備工事");
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_header_row_uses_own_context() {
        let rows = vec![
            Row::new(1, "屋上防水", ""),
            Row::new(2, "給排水衛生設備工事", ""),
            Row::new(3, "配管", ""),
            Row::new(4, "電気設備工事", ""),
            Row::new(5, "衛生器具", ""),
        ];
        let categories: Vec<Category> =
            process_rows(&rows).results.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![
                Category::Roof,
                Category::MechanicalEquipment,
                Category::MechanicalEquipment,
                Category::ElectricEquipment,
                Category::ElectricEquipment,
            ]
        );
    }

    #[test]
    fn test_blank_and_missing_names_skipped() {
        let rows = vec![
            Row { index: 1, name: None, work_category: Some("杭工事".into()) },
            Row::new(2, "  ", ""),
            Row::new(3, "\u{3000}", ""),
            Row { index: 4, name: Some("施工費".into()), work_category: Some("杭工事".into()) },
        ];
        let output = process_rows(&rows);
        assert_eq!(output.results.len(), 1);
        assert_eq!(output.results[0].index, 4);
        assert_eq!(output.results[0].category, Category::Pile);
    }

    #[test]
    fn test_lazy_early_stop() {
        let classifier = Classifier::default();
        let rows = sample_rows();
        let first: Vec<_> = classifier.classify_rows(&rows).take(1).collect();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].index, 1);
    }

    #[test]
    fn test_owned_rows() {
        let classifier = Classifier::default();
        let output = classifier.process_rows(sample_rows());
        assert_eq!(output.results.len(), 3);
    }

    #[test]
    fn test_idempotent() {
        let rows = sample_rows();
        assert_eq!(process_rows(&rows), process_rows(&rows));
    }

    #[test]
    fn test_resolve_contexts() {
        let rows = vec![
            Row::new(1, "屋上防水", ""),
            Row::new(2, "電気設備工事", ""),
            Row::new(3, "", ""),
            Row::new(4, "分電盤", ""),
            Row::new(5, " 空調設備工事 ", ""),
        ];
        assert_eq!(
            resolve_contexts(&rows),
            vec!["", "電気設備工事", "電気設備工事", "電気設備工事", "空調設備工事"]
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let mut rows = Vec::new();
        let names = [
            "電気設備工事", "分電盤", "", "屋上防水", "給排水衛生設備工事", "衛生器具",
            "鉄筋足場", "建築工事", "巾木", "バルコニー巾木", "屋上コンクリート金鏝押え",
        ];
        for i in 0..200 {
            rows.push(Row::new(i + 1, names[i % names.len()], ""));
        }

        let classifier = Classifier::default();
        assert_eq!(classifier.process_rows_parallel(&rows), classifier.process_rows(&rows));
    }
}
