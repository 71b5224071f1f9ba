//! 工事細目自動判定ツール
//!
//! 判定エンジンは `saimoku-common`、こちらはExcel入出力・設定・CLIを持つ。

pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod sheet;
