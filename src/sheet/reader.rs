//! 見積明細シートの読み込み（calamine）

use super::{CellValue, ColumnRef, SheetCells, SheetTable};
use crate::error::{Result, SaimokuError};
use calamine::{open_workbook_auto, Data, Reader, Sheets};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// 読み込み設定
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// 対象シート（未指定は先頭シート）
    pub sheet: Option<String>,
    /// 見出し行（1始まり）
    pub header_row: usize,
    pub name_column: ColumnRef,
    /// 見つからなければ工事区分なしで判定する
    pub work_column: Option<ColumnRef>,
}

/// シート名の一覧
pub fn sheet_names(path: &Path) -> Result<Vec<String>> {
    Ok(open(path)?.sheet_names())
}

/// 全シートのセル（値と数式）をシート順に読み込む
pub fn read_workbook(path: &Path) -> Result<Vec<SheetCells>> {
    let mut workbook = open(path)?;
    let names = workbook.sheet_names();
    names.iter().map(|name| load_sheet(&mut workbook, name)).collect()
}

/// シートを読み込み、見出し行から列を解決する
pub fn read_sheet(path: &Path, options: &ReadOptions) -> Result<SheetTable> {
    if options.header_row == 0 {
        return Err(SaimokuError::HeaderRowOutOfRange(0));
    }

    let mut workbook = open(path)?;

    let sheets = workbook.sheet_names();
    let sheet_name = match &options.sheet {
        Some(name) if sheets.iter().any(|s| s == name) => name.clone(),
        Some(name) => {
            return Err(SaimokuError::SheetNotFound {
                sheet: name.clone(),
                available: sheets.join(", "),
            })
        }
        None => sheets.first().cloned().ok_or_else(|| SaimokuError::SheetNotFound {
            sheet: "(先頭シート)".into(),
            available: String::new(),
        })?,
    };

    let sheet = load_sheet(&mut workbook, &sheet_name)?;

    let header_row = options.header_row - 1;
    if header_row >= sheet.cells.len() {
        return Err(SaimokuError::HeaderRowOutOfRange(options.header_row));
    }

    let mut table = SheetTable {
        sheet,
        header_row,
        name_col: 0,
        work_col: None,
    };

    table.name_col = table
        .find_column(&options.name_column)
        .ok_or_else(|| SaimokuError::ColumnNotFound(options.name_column.to_string()))?;
    table.work_col = options
        .work_column
        .as_ref()
        .and_then(|column| table.find_column(column));

    Ok(table)
}

fn read_err(e: impl std::fmt::Display) -> SaimokuError {
    SaimokuError::ExcelRead(e.to_string())
}

fn open(path: &Path) -> Result<Sheets<BufReader<File>>> {
    if !path.exists() {
        return Err(SaimokuError::FileNotFound(path.display().to_string()));
    }
    open_workbook_auto(path).map_err(read_err)
}

fn load_sheet<RS: Read + Seek>(workbook: &mut Sheets<RS>, name: &str) -> Result<SheetCells> {
    let range = workbook.worksheet_range(name).map_err(read_err)?;
    let formula_range = workbook.worksheet_formula(name).map_err(read_err)?;

    // 使用範囲の左上がA1とは限らないので絶対位置に並べ直す
    let (row_offset, col_offset) = offset(range.start());
    let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut values = vec![CellValue::Empty; col_offset];
        values.extend(row.iter().map(cell_value));
        cells.push(values);
    }

    let (row_offset, col_offset) = offset(formula_range.start());
    let formulas = formula_range
        .used_cells()
        .map(|(r, c, formula)| ((r + row_offset, c + col_offset), formula.clone()))
        .collect();

    Ok(SheetCells {
        name: name.to_string(),
        cells,
        formulas,
    })
}

fn offset(start: Option<(u32, u32)>) -> (usize, usize) {
    start.map(|(r, c)| (r as usize, c as usize)).unwrap_or((0, 0))
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(v) => CellValue::Number(*v),
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Bool(v) => CellValue::Bool(*v),
        Data::DateTime(v) => CellValue::Number(v.as_f64()),
        other => CellValue::Text(other.to_string()),
    }
}
