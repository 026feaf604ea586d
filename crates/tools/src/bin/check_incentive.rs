//! 着手のインセンティブ診断
//!
//! DB中の局面 g に Left が（眼を埋めずに）打った結果 g' について、
//! `g' - g + 1` が R（どちらが先手でも Right の勝ち）になる例を探す。
//! 見つかれば最初の1例を表示する。

use std::path::PathBuf;

use anyhow::{Result, ensure};
use clap::Parser;

use rlgo_core::db::MAX_SUPPORTED_EMPTY;
use rlgo_core::{Board, Color, Database, DatabaseConfig, Game, PlainSearch, SumState};

#[derive(Parser, Debug)]
#[command(name = "check_incentive")]
#[command(about = "g' - g + 1 < 0 となる Left の着手を探す")]
struct Cli {
    /// DBディレクトリ
    #[arg(long, default_value = "./db")]
    dir: PathBuf,

    /// 調べる最大空点数（DBはこのレベルまで構築済みであること）
    #[arg(long, default_value_t = 8)]
    num_empty: usize,

    /// デバッグログを有効化
    #[arg(short, long)]
    debug: bool,
}

/// `g` から `point` への Left の着手が条件を満たすか
fn violates_incentive(db: &Database, game: &Game, point: usize, one: Game) -> bool {
    let mut list = Vec::new();
    for mut sub in game.play(point, Color::Left) {
        db.lookup(&mut sub, true);
        if !sub.is_computed_zero() {
            list.push(sub);
        }
    }
    if !game.is_zero() {
        // -g の勝敗クラスは g の L と R を入れ替えたもの
        list.push(Game::with_outcome(game.board().inverse(), game.outcome().negate()));
    }
    list.push(one);

    let mut state = SumState::with_games(db, list);
    state.set_to_play(Color::Left);
    if PlainSearch::new(&mut state).negamax() {
        return false;
    }
    state.set_to_play(Color::Right);
    PlainSearch::new(&mut state).negamax()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .init();

    ensure!(
        (1..=MAX_SUPPORTED_EMPTY).contains(&cli.num_empty),
        "--num-empty は 1..={MAX_SUPPORTED_EMPTY} で指定してください: {}",
        cli.num_empty
    );
    let db = Database::open(&DatabaseConfig {
        dir: cli.dir.clone(),
        max_empty: cli.num_empty,
    })?;

    // .x. = +1
    let plus_one: Board = ".x.".parse()?;
    let one = Game::with_outcome(plus_one, db.get(&plus_one).map(|e| e.outcome).unwrap_or_default());
    ensure!(one.is_computed(), "{} にレベル2が見つかりません", cli.dir.display());

    for k in 1..=cli.num_empty {
        if !db.is_level_loaded(k) {
            log::warn!("level {k} is not loaded; stopping");
            break;
        }
        log::info!("checking level {k}");
        for board in db.boards(k) {
            let Some(entry) = db.get(&board) else {
                continue;
            };
            let game = Game::with_outcome(board, entry.outcome);
            for point in game.legal_points(Color::Left) {
                if game.is_eye(point, Color::Left) {
                    continue;
                }
                if violates_incentive(&db, &game, point, one) {
                    println!("example game: {game} {point}");
                    return Ok(());
                }
            }
        }
    }

    println!("no example found up to {} empty points", cli.num_empty);
    Ok(())
}
