//! 1×n 盤の連続求解
//!
//! `.x` の後ろに空点を並べた盤面を大きさ順に解き、結果を1行ずつ出力する。

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Result, ensure};
use clap::Parser;

use rlgo_core::db::MAX_SUPPORTED_EMPTY;
use rlgo_core::search::prepare_games;
use rlgo_core::{
    Board, Color, Database, DatabaseConfig, HashSearch, SumState, TranspositionTable, TtConfig,
    ZobristTable,
};

#[derive(Parser, Debug)]
#[command(name = "solve_linears")]
#[command(about = ".x + 空点 の盤面を大きさ順に解く")]
struct Cli {
    /// 最小の盤サイズ
    #[arg(long, default_value_t = 16)]
    from: usize,

    /// 最大の盤サイズ（この値は含まない）
    #[arg(long, default_value_t = 40)]
    to: usize,

    /// 先手（b = Left, w = Right）
    #[arg(long, default_value = "w")]
    player: String,

    /// DBディレクトリ
    #[arg(long, default_value = "./db")]
    db_dir: PathBuf,

    /// DBの最大空点数
    #[arg(long, default_value_t = 15)]
    max_empty: usize,

    /// 置換表のエントリ数 = 2^N
    #[arg(long, default_value_t = 24)]
    tt_index_bits: u32,

    /// デバッグログを有効化
    #[arg(short, long)]
    debug: bool,
}

fn linear_board(size: usize) -> Result<Board> {
    let text = format!(".x{}", ".".repeat(size - 2));
    Ok(text.parse()?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .init();

    ensure!(cli.from >= 2, "--from は 2 以上で指定してください");
    ensure!(cli.max_empty <= MAX_SUPPORTED_EMPTY, "--max-empty は {MAX_SUPPORTED_EMPTY} 以下で指定してください");
    let to_play = Color::from_player(&cli.player)?;
    let db = Database::open(&DatabaseConfig {
        dir: cli.db_dir.clone(),
        max_empty: cli.max_empty,
    })?;
    let config = TtConfig {
        index_bits: cli.tt_index_bits,
        ..TtConfig::default()
    };
    let mut tt = TranspositionTable::new(&config)?;
    let zobrist = ZobristTable::new();

    for size in cli.from..cli.to {
        println!("solving boardsize: 1x{size}");
        let board = linear_board(size)?;

        // 盤サイズごとに表を作り直す
        tt.clear();
        let mut state = SumState::with_games(&db, prepare_games(&db, [board]));
        state.set_to_play(to_play);
        let mut search = HashSearch::new(state, &mut tt, &zobrist);

        let start = Instant::now();
        let win = search.solve();
        let elapsed = start.elapsed();
        println!(
            "boardsize: 1x{size}\n{}\t{}s\t{} nodes\n",
            u8::from(win),
            elapsed.as_secs(),
            search.stores()
        );
    }
    Ok(())
}
