//! 判定結果付きブックの書き出し（rust_xlsxwriter）
//!
//! 入力ブックの全シートの値と数式をそのまま写し、対象シートに判定結果列、
//! 末尾に集計シートを加える。書式は引き継がない。

use super::{CellValue, SheetCells, SheetTable};
use crate::error::{Result, SaimokuError};
use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatBorder, Formula, Workbook, Worksheet, XlsxError,
};
use saimoku_common::{ClassificationResult, Tally};
use std::path::Path;

/// 書き出し設定
#[derive(Debug, Clone)]
pub struct WriteOptions<'a> {
    /// 判定結果を書く列（0始まり）
    pub result_col: usize,
    /// 判定結果列の見出し
    pub result_header: &'a str,
    /// 同名のシートが入力にあれば作り直す
    pub summary_sheet: &'a str,
}

fn xlsx_err(e: XlsxError) -> SaimokuError {
    SaimokuError::ExcelWrite(e.to_string())
}

/// 判定結果を書き込んだブックを保存
///
/// `sheets` は入力ブックの全シート（`reader::read_workbook`）。対象シートは `table` の内容で書く。
pub fn write_workbook(
    sheets: &[SheetCells],
    table: &SheetTable,
    results: &[ClassificationResult],
    tally: &Tally,
    options: &WriteOptions,
    output_path: &Path,
) -> Result<()> {
    if options.summary_sheet == table.sheet_name() {
        return Err(SaimokuError::Config(format!(
            "集計シート名が対象シートと同じです: {}",
            options.summary_sheet
        )));
    }

    let mut workbook = Workbook::new();

    if !sheets.iter().any(|s| s.name == table.sheet_name()) {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(table.sheet_name()).map_err(xlsx_err)?;
        write_detail_sheet(worksheet, table, results, options).map_err(xlsx_err)?;
    }

    let mut summary_written = false;
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name).map_err(xlsx_err)?;

        if sheet.name == table.sheet_name() {
            write_detail_sheet(worksheet, table, results, options).map_err(xlsx_err)?;
        } else if sheet.name == options.summary_sheet {
            // 前回の集計は作り直す
            write_summary_sheet(worksheet, tally).map_err(xlsx_err)?;
            summary_written = true;
        } else {
            copy_sheet(worksheet, sheet, |_, _| false).map_err(xlsx_err)?;
        }
    }

    if !summary_written {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(options.summary_sheet).map_err(xlsx_err)?;
        write_summary_sheet(worksheet, tally).map_err(xlsx_err)?;
    }

    workbook.save(output_path).map_err(xlsx_err)?;
    Ok(())
}

/// シートの値と数式を写す（`skip` が真のセルは写さない）
fn copy_sheet(
    worksheet: &mut Worksheet,
    sheet: &SheetCells,
    skip: impl Fn(usize, usize) -> bool,
) -> std::result::Result<(), XlsxError> {
    for (r, row) in sheet.cells.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if skip(r, c) || sheet.formula(r, c).is_some() {
                continue;
            }
            write_cell(worksheet, r as u32, c as u16, value)?;
        }
    }

    for (&(r, c), text) in &sheet.formulas {
        if skip(r, c) {
            continue;
        }
        // 保存時の計算結果も残す（再計算しないビューア向け）
        let cached = sheet.cell(r, c).as_text().unwrap_or_default();
        let formula = Formula::new(text).set_result(cached);
        worksheet.write_formula(r as u32, c as u16, formula)?;
    }
    Ok(())
}

fn write_detail_sheet(
    worksheet: &mut Worksheet,
    table: &SheetTable,
    results: &[ClassificationResult],
    options: &WriteOptions,
) -> std::result::Result<(), XlsxError> {
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin);

    // 既存の判定結果列は見出しから下を書き直す
    let result_col = options.result_col;
    copy_sheet(worksheet, &table.sheet, |r, c| c == result_col && r >= table.header_row)?;

    let col = result_col as u16;
    worksheet.write_string_with_format(
        table.header_row as u32,
        col,
        options.result_header,
        &header_format,
    )?;
    worksheet.set_column_width(col, 18)?;

    for result in results {
        // Row::index はシート上の行番号（1始まり）
        let row = result.index.saturating_sub(1) as u32;
        worksheet.write_string(row, col, result.category.label())?;
    }

    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
) -> std::result::Result<(), XlsxError> {
    match value {
        CellValue::Empty => {}
        CellValue::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
        CellValue::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        CellValue::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
    }
    Ok(())
}

fn write_summary_sheet(
    worksheet: &mut Worksheet,
    tally: &Tally,
) -> std::result::Result<(), XlsxError> {
    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin);
    let cell_format = Format::new().set_border(FormatBorder::Thin);
    let percent_format = Format::new()
        .set_num_format("0.0%")
        .set_border(FormatBorder::Thin);
    let total_format = Format::new().set_bold().set_border(FormatBorder::Thin);

    let headers = ["細目", "件数", "割合"];
    for (c, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, c as u16, *header, &header_format)?;
    }

    let mut row = 1u32;
    for (category, count) in tally.iter() {
        worksheet.write_string_with_format(row, 0, category.label(), &cell_format)?;
        worksheet.write_number_with_format(row, 1, count as f64, &cell_format)?;
        worksheet.write_number_with_format(row, 2, tally.ratio(category), &percent_format)?;
        row += 1;
    }

    worksheet.write_string_with_format(row, 0, "合計", &total_format)?;
    worksheet.write_number_with_format(row, 1, tally.total() as f64, &total_format)?;

    worksheet.set_column_width(0, 20)?;
    worksheet.set_column_width(1, 10)?;
    worksheet.set_column_width(2, 10)?;
    Ok(())
}
