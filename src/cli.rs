use clap::{Parser, Subcommand};
use saimoku_common::Category;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "saimoku")]
#[command(about = "工事細目自動判定ツール（見積明細の細目分類）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 見積明細のExcelを判定し、判定結果列と集計シートを付けて出力
    Classify {
        /// 入力Excelファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル（デフォルト: 入力名_判定結果_日時.xlsx）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 対象シート（省略時は設定値、未設定なら先頭シート）
        #[arg(short, long)]
        sheet: Option<String>,

        /// シートを一覧から選択
        #[arg(long, conflicts_with = "sheet")]
        select_sheet: bool,

        /// 項目名の列（見出し名または列記号）
        #[arg(short, long)]
        name_column: Option<String>,

        /// 工事区分の列（見出し名または列記号）
        #[arg(short, long)]
        work_column: Option<String>,

        /// 判定結果を書き込む列（見出し名または列記号）
        #[arg(short, long)]
        result_column: Option<String>,

        /// 見出し行（1始まり）
        #[arg(long)]
        header_row: Option<usize>,

        /// 並列判定
        #[arg(short, long)]
        parallel: bool,

        /// JSONレポートの出力先
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// 1項目だけ判定し、一致したルールを表示
    Check {
        /// 項目名
        #[arg(required = true)]
        name: String,

        /// 工事区分
        #[arg(short, long, default_value = "")]
        work: String,

        /// 直近の設備工事見出し
        #[arg(short, long, default_value = "")]
        context: String,

        /// 期待する細目（ラベル・番号・名称）。一致しなければエラー終了
        #[arg(short, long)]
        expect: Option<Category>,
    },

    /// ルールの評価順を表示
    Rules,

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 既定の対象シート
        #[arg(long)]
        sheet: Option<String>,

        /// 見出し行（1始まり）
        #[arg(long)]
        header_row: Option<usize>,

        /// 項目名の列
        #[arg(long)]
        name_column: Option<String>,

        /// 工事区分の列
        #[arg(long)]
        work_column: Option<String>,

        /// 判定結果列
        #[arg(long)]
        result_column: Option<String>,

        /// 集計シート名
        #[arg(long)]
        summary_sheet: Option<String>,

        /// 初期設定に戻す
        #[arg(long)]
        reset: bool,
    },
}
