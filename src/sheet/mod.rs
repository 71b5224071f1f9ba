//! 見積明細シートの入出力
//!
//! - reader: calamineでシートを読み、判定用の行を取り出す
//! - writer: rust_xlsxwriterで全シートを写し、判定結果列と集計シートを付けて書き出す

pub mod reader;
pub mod writer;

use crate::error::SaimokuError;
use regex::Regex;
use saimoku_common::Row;
use std::collections::BTreeMap;

/// セル値
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// 判定用の文字列（空セル・空白のみは `None`）
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) if s.trim().is_empty() => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) => Some(format_number(*n)),
            CellValue::Bool(b) => Some(b.to_string()),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// 列指定（見出し名または列記号）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    Header(String),
    /// 列記号として書かれた指定（"B", "NO" など）
    ///
    /// 同じ文字列の見出しがあればそちらを優先する。
    Letters(String),
    /// 0始まりの列番号
    Index(usize),
}

impl std::str::FromStr for ColumnRef {
    type Err = SaimokuError;

    /// 半角大文字1〜3文字は列記号の候補、それ以外は見出し名とみなす
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static::lazy_static! {
            static ref LETTERS_RE: Regex = Regex::new(r"^[A-Z]{1,3}$").unwrap();
        }

        let s = s.trim();
        if s.is_empty() {
            return Err(SaimokuError::InvalidColumn("空の列指定".into()));
        }
        if LETTERS_RE.is_match(s) {
            // XFDより右は見出し名としてだけ扱う
            if column_index(s).is_none() {
                return Ok(ColumnRef::Header(s.to_string()));
            }
            return Ok(ColumnRef::Letters(s.to_string()));
        }
        Ok(ColumnRef::Header(s.to_string()))
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnRef::Header(name) => write!(f, "「{}」", name),
            ColumnRef::Letters(letters) => write!(f, "{}列", letters),
            ColumnRef::Index(i) => write!(f, "{}列", column_letter(*i)),
        }
    }
}

/// Excelの最終列（XFD）
const MAX_COLUMNS: usize = 16_384;

/// 列記号 → 0始まりの列番号
pub fn column_index(letters: &str) -> Option<usize> {
    let mut index = 0usize;
    for c in letters.chars() {
        if !c.is_ascii_uppercase() {
            return None;
        }
        index = index * 26 + (c as usize - 'A' as usize + 1);
    }
    if index == 0 || index > MAX_COLUMNS {
        return None;
    }
    Some(index - 1)
}

/// 0始まりの列番号 → 列記号
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// シート1枚分のセル
///
/// 位置はシート上の絶対位置（0始まり）。
#[derive(Debug, Clone, Default)]
pub struct SheetCells {
    pub name: String,
    /// 値（数式セルは保存時の計算結果）
    pub cells: Vec<Vec<CellValue>>,
    /// 数式（先頭の `=` なし）
    pub formulas: BTreeMap<(usize, usize), String>,
}

impl SheetCells {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// 使用中の列数
    pub fn width(&self) -> usize {
        let formula_width = self.formulas.keys().map(|&(_, c)| c + 1).max().unwrap_or(0);
        self.cells
            .iter()
            .map(|r| r.len())
            .max()
            .unwrap_or(0)
            .max(formula_width)
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.cells.get(row).and_then(|r| r.get(col)).unwrap_or(&EMPTY)
    }

    pub fn formula(&self, row: usize, col: usize) -> Option<&str> {
        self.formulas.get(&(row, col)).map(String::as_str)
    }
}

/// 判定対象として読み込んだシート
#[derive(Debug, Clone, Default)]
pub struct SheetTable {
    pub sheet: SheetCells,
    /// 見出し行（0始まり）
    pub header_row: usize,
    /// 項目名の列
    pub name_col: usize,
    /// 工事区分の列
    pub work_col: Option<usize>,
}

impl SheetTable {
    pub fn sheet_name(&self) -> &str {
        &self.sheet.name
    }

    /// 見出しの文字列
    pub fn headers(&self) -> Vec<String> {
        (0..self.sheet.width())
            .map(|col| self.sheet.cell(self.header_row, col).as_text().unwrap_or_default())
            .collect()
    }

    /// 列指定を列番号に解決する
    ///
    /// 見出し名は完全一致を優先し、なければ見出しに含まれるものを使う。
    /// 列記号は同名の見出し（完全一致）があればそれを、なければ記号どおりの列を使う。
    pub fn find_column(&self, column: &ColumnRef) -> Option<usize> {
        let headers = self.headers();
        let exact = |name: &str| headers.iter().position(|h| h.trim() == name);
        match column {
            ColumnRef::Index(i) => Some(*i),
            ColumnRef::Letters(letters) => {
                exact(letters.as_str()).or_else(|| column_index(letters))
            }
            ColumnRef::Header(name) => exact(name.as_str())
                .or_else(|| headers.iter().position(|h| h.contains(name.as_str()))),
        }
    }

    /// 判定結果の書き込み先（既存の列がなければ右端に追加）
    pub fn result_column(&self, column: &ColumnRef) -> usize {
        self.find_column(column).unwrap_or_else(|| self.sheet.width())
    }

    /// 判定結果列の見出し
    ///
    /// 書き込み先に見出しがあればそのまま残す。なければ見出し名の指定、
    /// 列記号・列番号の指定なら `default` を使う。
    pub fn result_header(&self, column: &ColumnRef, default: &str) -> String {
        let col = self.result_column(column);
        self.sheet
            .cell(self.header_row, col)
            .as_text()
            .unwrap_or_else(|| match column {
                ColumnRef::Header(name) => name.clone(),
                ColumnRef::Letters(_) | ColumnRef::Index(_) => default.to_string(),
            })
    }

    /// 見出し行より下の全行を判定用の行にする
    ///
    /// `Row::index` はシート上の行番号（1始まり）。
    pub fn rows(&self) -> Vec<Row> {
        (self.header_row + 1..self.sheet.cells.len())
            .map(|r| Row {
                index: r + 1,
                name: self.sheet.cell(r, self.name_col).as_text(),
                work_category: self.work_col.and_then(|c| self.sheet.cell(r, c).as_text()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn sample_table() -> SheetTable {
        let mut sheet = SheetCells::new("内訳");
        sheet.cells = vec![
            vec![text("内訳明細書")],
            vec![text("No"), text("名称・規格"), text("工種"), text("数量")],
            vec![CellValue::Number(1.0), text("電気設備工事"), CellValue::Empty, CellValue::Empty],
            vec![CellValue::Number(2.0), text("分電盤"), text("電気"), CellValue::Number(3.0)],
            vec![CellValue::Number(3.0), text("  ")],
        ];
        SheetTable {
            sheet,
            header_row: 1,
            name_col: 1,
            work_col: Some(2),
        }
    }

    /// 見出しが英大文字だけのシート
    fn letter_header_table() -> SheetTable {
        let mut sheet = SheetCells::new("明細");
        sheet.cells = vec![
            vec![text("NO"), text("QTY"), text("名称"), text("SD")],
            vec![CellValue::Number(1.0), CellValue::Number(2.0), text("鋼製建具"), text("SD-1")],
        ];
        SheetTable {
            sheet,
            header_row: 0,
            name_col: 2,
            work_col: None,
        }
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A"), Some(0));
        assert_eq!(column_index("Z"), Some(25));
        assert_eq!(column_index("AA"), Some(26));
        assert_eq!(column_index("XFD"), Some(16_383));
        assert_eq!(column_index("XFE"), None);
        assert_eq!(column_index("a"), None);
    }

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn test_column_ref_parse() {
        assert_eq!("B".parse::<ColumnRef>().unwrap(), ColumnRef::Letters("B".into()));
        assert_eq!("NO".parse::<ColumnRef>().unwrap(), ColumnRef::Letters("NO".into()));
        assert_eq!("名称".parse::<ColumnRef>().unwrap(), ColumnRef::Header("名称".into()));
        assert_eq!("Name".parse::<ColumnRef>().unwrap(), ColumnRef::Header("Name".into()));
        // XFDより右は列記号になりえない
        assert_eq!("ZZZ".parse::<ColumnRef>().unwrap(), ColumnRef::Header("ZZZ".into()));
        assert!("".parse::<ColumnRef>().is_err());
    }

    #[test]
    fn test_letters_prefer_exact_header() {
        let table = letter_header_table();
        let column = |s: &str| table.find_column(&s.parse::<ColumnRef>().unwrap());

        // 同名の見出しがあれば見出しとして解決
        assert_eq!(column("NO"), Some(0));
        assert_eq!(column("QTY"), Some(1));
        assert_eq!(column("SD"), Some(3));
        // 見出しになければ列記号
        assert_eq!(column("C"), Some(2));
        assert_eq!(column("AB"), Some(27));
    }

    #[test]
    fn test_result_header_keeps_existing() {
        let table = sample_table();
        // 既存列の見出しはそのまま
        assert_eq!(table.result_header(&"D".parse().unwrap(), "判定結果"), "数量");
        // 追加する列は指定名
        assert_eq!(table.result_header(&ColumnRef::Header("細目".into()), "判定結果"), "細目");
        // 列記号で空き列を指定したときは既定名
        assert_eq!(table.result_header(&"F".parse().unwrap(), "判定結果"), "判定結果");
    }

    #[test]
    fn test_width_includes_formulas() {
        let mut sheet = SheetCells::new("計算");
        sheet.cells = vec![vec![CellValue::Number(1.0)]];
        sheet.formulas.insert((0, 2), "A1*2".into());
        assert_eq!(sheet.width(), 3);
        assert_eq!(sheet.formula(0, 2), Some("A1*2"));
        assert_eq!(sheet.formula(0, 0), None);
    }

    #[test]
    fn test_cell_as_text() {
        assert_eq!(CellValue::Empty.as_text(), None);
        assert_eq!(text(" ").as_text(), None);
        assert_eq!(text("分電盤").as_text(), Some("分電盤".into()));
        assert_eq!(CellValue::Number(3.0).as_text(), Some("3".into()));
        assert_eq!(CellValue::Number(2.5).as_text(), Some("2.5".into()));
    }

    #[test]
    fn test_find_column() {
        let table = sample_table();
        // 部分一致
        assert_eq!(table.find_column(&ColumnRef::Header("名称".into())), Some(1));
        // 完全一致
        assert_eq!(table.find_column(&ColumnRef::Header("工種".into())), Some(2));
        assert_eq!(table.find_column(&ColumnRef::Header("単価".into())), None);
        assert_eq!(table.find_column(&ColumnRef::Index(5)), Some(5));
    }

    #[test]
    fn test_result_column_appends() {
        let table = sample_table();
        assert_eq!(table.result_column(&ColumnRef::Header("判定結果".into())), 4);
        assert_eq!(table.result_column(&ColumnRef::Header("数量".into())), 3);
    }

    #[test]
    fn test_rows() {
        let rows = sample_table().rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            Row {
                index: 3,
                name: Some("電気設備工事".into()),
                work_category: None,
            }
        );
        assert_eq!(rows[1].index, 4);
        assert_eq!(rows[1].work_category(), "電気");
        assert!(rows[2].is_blank());
    }
}
