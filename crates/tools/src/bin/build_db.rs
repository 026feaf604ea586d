//! 勝敗データベース構築ツール
//!
//! 空点 1..=N 個の全盤面を探索して `<dir>/<k>.db` に保存する。
//! レベル k の構築にはレベル 1..k-1 の結果を使うので、小さい順に作る。

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Result, ensure};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use rlgo_core::Database;
use rlgo_core::db::{MAX_SUPPORTED_EMPTY, level_size};

#[derive(Parser, Debug)]
#[command(name = "build_db")]
#[command(about = "空点数ごとの勝敗データベースを構築する")]
struct Cli {
    /// 出力ディレクトリ
    #[arg(long, default_value = "./db")]
    dir: PathBuf,

    /// 構築する最大空点数
    #[arg(long, default_value_t = 10)]
    max_empty: usize,

    /// 1盤面ごとに `盤面<TAB>勝敗クラス` を標準出力に書く
    #[arg(long, default_value_t = false)]
    verbose: bool,

    /// ファイルに保存しない
    #[arg(long, default_value_t = false)]
    no_store: bool,

    /// デバッグログを有効化
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .init();

    ensure!(
        (1..=MAX_SUPPORTED_EMPTY).contains(&cli.max_empty),
        "--max-empty は 1..={MAX_SUPPORTED_EMPTY} で指定してください: {}",
        cli.max_empty
    );

    let mut db = Database::new(cli.max_empty);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for k in 1..=cli.max_empty {
        let progress = ProgressBar::new(level_size(k) as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] level {msg} {bar:40.cyan/blue} {pos}/{len}")?,
        );
        progress.set_message(k.to_string());

        let mut write_err = None;
        db.build_level_with(k, |board, outcome| {
            if cli.verbose
                && write_err.is_none()
                && let Err(e) = writeln!(out, "{board}\t{outcome}")
            {
                write_err = Some(e);
            }
            progress.inc(1);
        });
        progress.finish_and_clear();
        if let Some(e) = write_err {
            return Err(e.into());
        }

        if !cli.no_store {
            db.store_level(&cli.dir, k)?;
        }
    }

    if !cli.no_store {
        log::info!("database written to {}", cli.dir.display());
    }
    Ok(())
}
