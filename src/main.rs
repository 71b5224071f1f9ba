use anyhow::{bail, Context};
use clap::Parser;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};
use saimoku::cli::{Cli, Commands};
use saimoku::config::Config;
use saimoku::report::{self, Report};
use saimoku::sheet::reader::{self, ReadOptions};
use saimoku::sheet::writer::{self, WriteOptions};
use saimoku::sheet::ColumnRef;
use saimoku_common::{BatchResult, Category, Classifier, Row};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Classify {
            input,
            output,
            sheet,
            select_sheet,
            name_column,
            work_column,
            result_column,
            header_row,
            parallel,
            json,
        } => {
            println!("📋 saimoku - 工事細目判定\n");
            let config = Config::load()?;

            let sheet = if select_sheet {
                Some(select_sheet_interactive(&input)?)
            } else {
                sheet.or_else(|| config.sheet.clone())
            };
            let name_column = name_column.unwrap_or_else(|| config.name_column.clone());
            let work_column = work_column.unwrap_or_else(|| config.work_column.clone());
            let result_column = result_column.unwrap_or_else(|| config.result_column.clone());
            let read_options = ReadOptions {
                sheet,
                header_row: header_row.unwrap_or(config.header_row),
                name_column: name_column.parse()?,
                work_column: Some(work_column.parse()?),
            };
            let result_ref: ColumnRef = result_column.parse()?;

            // 1. 読み込み
            println!("[1/3] シートを読み込み中...");
            let table = reader::read_sheet(&input, &read_options)?;
            let sheets = reader::read_workbook(&input)?;
            let rows = table.rows();
            println!(
                "✔ {}行を読み込み（シート: {}、項目名: {}列）",
                rows.len(),
                table.sheet_name(),
                saimoku::sheet::column_letter(table.name_col)
            );
            if table.work_col.is_none() {
                println!("  ⚠ 工事区分の列が見つかりません（工事区分なしで判定）");
            }
            println!();

            // 2. 判定
            println!("[2/3] 判定中...{}", if parallel { " (並列)" } else { "" });
            let classifier = Classifier::default();
            let batch = if parallel {
                classifier.process_rows_parallel(&rows)
            } else {
                classify_with_progress(&classifier, &rows)
            };
            if cli.verbose {
                print_decisions(&rows, &batch);
            }
            println!("✔ {}件を判定\n", batch.results.len());

            // 3. 書き出し
            println!("[3/3] 結果を保存中...");
            let output = output.unwrap_or_else(|| default_output_path(&input));
            let result_header = table.result_header(&result_ref, &config.result_column);
            let write_options = WriteOptions {
                result_col: table.result_column(&result_ref),
                result_header: &result_header,
                summary_sheet: &config.summary_sheet,
            };
            writer::write_workbook(
                &sheets,
                &table,
                &batch.results,
                &batch.tally,
                &write_options,
                &output,
            )?;
            println!("✔ 結果を保存: {}", output.display());

            if let Some(json_path) = json {
                Report::new(&input, table.sheet_name(), &batch).save(&json_path)?;
                println!("✔ レポートを保存: {}", json_path.display());
            }

            println!("\n集計:");
            println!("{}", report::format_tally(&batch.tally));
            println!("\n✅ 判定完了");
        }

        Commands::Check { name, work, context, expect } => {
            let classifier = Classifier::default();
            let Some(decision) = classifier.decide(&name, &work, &context) else {
                bail!("項目名が空です");
            };

            println!("{}", decision.category);
            if cli.verbose {
                eprintln!("  ルール: {}", decision.rule);
                eprintln!("  工事区分: {}", or_none(&work));
                eprintln!("  見出し: {}", or_none(&context));
            }

            if let Some(expected) = expect {
                if expected != decision.category {
                    bail!(
                        "判定が期待と異なります: 期待 {} / 判定 {}（ルール: {}）",
                        expected,
                        decision.category,
                        decision.rule
                    );
                }
                println!("✔ 期待どおり");
            }
        }

        Commands::Rules => {
            println!("判定ルール（上から順に評価、最初に一致したものを採用）:");
            for (i, rule) in Classifier::default().rules().iter().enumerate() {
                println!("  {:>2}. {:<12} → {}", i + 1, rule.name, rule.category);
            }
            println!("  --. {:<12} → {}", saimoku_common::FALLBACK_RULE, Category::Excluded);
        }

        Commands::Config {
            show,
            sheet,
            header_row,
            name_column,
            work_column,
            result_column,
            summary_sheet,
            reset,
        } => {
            let mut config = if reset { Config::default() } else { Config::load()? };
            let mut changed = reset;

            if let Some(sheet) = sheet {
                // 空文字は「先頭シート」に戻す
                config.sheet = if sheet.trim().is_empty() { None } else { Some(sheet) };
                changed = true;
            }
            if let Some(row) = header_row {
                config.header_row = row;
                changed = true;
            }
            if let Some(column) = name_column {
                config.name_column = column;
                changed = true;
            }
            if let Some(column) = work_column {
                config.work_column = column;
                changed = true;
            }
            if let Some(column) = result_column {
                config.result_column = column;
                changed = true;
            }
            if let Some(name) = summary_sheet {
                config.summary_sheet = name;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  対象シート: {}", config.sheet.as_deref().unwrap_or("(先頭シート)"));
                println!("  見出し行: {}", config.header_row);
                println!("  項目名列: {}", config.name_column);
                println!("  工事区分列: {}", config.work_column);
                println!("  判定結果列: {}", config.result_column);
                println!("  集計シート: {}", config.summary_sheet);
            }
        }
    }

    Ok(())
}

/// 逐次判定（進捗バー付き）
fn classify_with_progress(classifier: &Classifier, rows: &[Row]) -> BatchResult {
    let pb = ProgressBar::new(rows.len() as u64);
    let style =
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ");
    pb.set_style(style);

    let batch = classifier.process_rows(pb.wrap_iter(rows.iter()));
    pb.finish_and_clear();
    batch
}

fn print_decisions(rows: &[Row], batch: &BatchResult) {
    let names: HashMap<usize, &str> = rows.iter().map(|r| (r.index, r.name())).collect();
    for result in &batch.results {
        eprintln!(
            "  {:>5}行 {} → {}（{}）",
            result.index,
            names.get(&result.index).copied().unwrap_or_default(),
            result.category,
            result.rule
        );
    }
}

fn or_none(s: &str) -> &str {
    if s.is_empty() {
        "(なし)"
    } else {
        s
    }
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "見積".into());
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let file_name = format!("{}_判定結果_{}.xlsx", stem, timestamp);
    input.with_file_name(file_name)
}

fn select_sheet_interactive(input: &Path) -> anyhow::Result<String> {
    let sheets = reader::sheet_names(input)?;
    if sheets.is_empty() {
        bail!("シートがありません: {}", input.display());
    }

    let index = Select::new()
        .with_prompt("対象シートを選択")
        .items(&sheets)
        .default(0)
        .interact()
        .context("シート選択に失敗しました")?;
    Ok(sheets[index].clone())
}
