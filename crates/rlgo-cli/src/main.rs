//! 一次元囲碁の局面和ソルバー
//!
//! ```text
//! solver [OPTIONS] <position>... <player>
//! ```
//!
//! 標準出力には結果行だけを書き、ログは標準エラーに出す。

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, ensure};
use clap::Parser;

use rlgo_core::db::MAX_SUPPORTED_EMPTY;
use rlgo_core::search::prepare_games;
use rlgo_core::{
    Board, Color, Database, DatabaseConfig, Game, HashSearch, SumState, TranspositionTable, TtConfig,
    ZobristTable,
};

const USAGE: &str = "usage: solver [OPTIONS] <position>... <player>

    position\tstring of .xo
    player\tb or w

  example: solver .x..ox. b
";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Directory holding <k>.db files
    #[arg(long, default_value = "./db")]
    db_dir: PathBuf,

    /// Largest number of empty points kept in the database
    #[arg(long, default_value_t = 15)]
    max_empty: usize,

    /// Transposition table has 2^N entries
    #[arg(long, default_value_t = 24)]
    tt_index_bits: u32,

    /// Bits of the key stored in each entry
    #[arg(long, default_value_t = 27)]
    tt_code_bits: u32,

    /// Bytes per transposition table entry
    #[arg(long, default_value_t = 4)]
    tt_entry_bytes: usize,

    /// Positions followed by the player to move first (b = Left, w = Right)
    #[arg(num_args = 0..)]
    args: Vec<String>,
}

fn init_logging(debug: bool) {
    let log_level = if debug { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    );
    builder
        .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Stderr)
        .init();
}

/// `盤面=勝敗クラス` を空白区切りで並べたもの（ログ用）
fn describe_games(games: &[Game]) -> String {
    games
        .iter()
        .map(|g| format!("{g}={}", g.outcome()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.args.len() < 2 {
        print!("{USAGE}");
        return Ok(());
    }

    init_logging(args.debug);

    let (player, positions) = args.args.split_last().context("missing player")?;
    let to_play = Color::from_player(player)?;
    let boards = positions
        .iter()
        .map(|s| s.parse::<Board>().with_context(|| format!("invalid position {s:?}")))
        .collect::<Result<Vec<_>>>()?;

    ensure!(
        args.max_empty <= MAX_SUPPORTED_EMPTY,
        "--max-empty must be at most {MAX_SUPPORTED_EMPTY}"
    );
    let db = Database::open(&DatabaseConfig {
        dir: args.db_dir.clone(),
        max_empty: args.max_empty,
    })
    .with_context(|| format!("failed to load database from {}", args.db_dir.display()))?;

    let mut tt = TranspositionTable::new(&TtConfig {
        index_bits: args.tt_index_bits,
        code_bits: args.tt_code_bits,
        entry_bytes: args.tt_entry_bytes,
    })?;
    let zobrist = ZobristTable::new();

    log::debug!(
        "transposition table: 2^{} entries, {} code bits, {} bytes/entry",
        args.tt_index_bits,
        args.tt_code_bits,
        args.tt_entry_bytes
    );

    let games = prepare_games(&db, boards);
    log::debug!(
        "{} sub-positions, {to_play:?} to play: {}",
        games.len(),
        describe_games(&games)
    );
    let mut state = SumState::with_games(&db, games);
    state.set_to_play(to_play);
    let mut search = HashSearch::new(state, &mut tt, &zobrist);

    let start = Instant::now();
    let win = search.solve();
    let elapsed = start.elapsed();
    let stats = *search.stats();
    let stores = search.stores();
    log::debug!(
        "{stats} in {:.3}s, {} of {} entries used",
        elapsed.as_secs_f64(),
        tt.occupied(),
        tt.capacity()
    );

    println!("{}\t{}s\t{} nodes", u8::from(win), elapsed.as_secs(), stores);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlgo_core::Outcome;

    #[test]
    fn test_describe_games() {
        let games = [
            Game::with_outcome(".x.".parse().unwrap(), Outcome::L),
            Game::new("..".parse().unwrap()),
        ];
        assert_eq!(describe_games(&games), ".x.=L ..=U");
        assert_eq!(describe_games(&[]), "");
    }
}
