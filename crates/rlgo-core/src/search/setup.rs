//! 入力盤面から初期の局面和を作る

use crate::board::Board;
use crate::db::Database;
use crate::game::Game;

/// 入力盤面を simplify / split して部分局面に分け、DBで引く
///
/// 値 0 の部分局面は捨て、互いに色反転な組は両方とも捨てる。
/// 残った部分局面（正規形・active）を入力順に返す。
pub fn prepare_games<I>(db: &Database, boards: I) -> Vec<Game>
where
    I: IntoIterator<Item = Board>,
{
    let mut games: Vec<Game> = Vec::new();
    for board in boards {
        for part in board.simplify().split() {
            let mut game = Game::new(part);
            db.lookup(&mut game, true);
            if game.is_computed_zero() {
                continue;
            }
            game.canonicalize();
            match games.iter_mut().find(|g| g.is_active() && g.is_inverse(&game)) {
                Some(partner) => partner.set_active(false),
                None => games.push(game),
            }
        }
    }
    games.retain(Game::is_active);
    log::debug!("prepared {} sub-positions", games.len());
    games
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boards(list: &[&str]) -> Vec<Board> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn names(games: &[Game]) -> Vec<String> {
        games.iter().map(|g| g.board().to_string()).collect()
    }

    #[test]
    fn test_split_and_canonicalize() {
        let db = Database::new(1);
        let games = prepare_games(&db, boards(&["x...ox."]));
        // x...ox. -> [x...o] [x.] -> 正規形にすると x...o と .x
        assert_eq!(names(&games), vec!["x...o", ".x"]);
        assert!(games.iter().all(Game::is_active));
    }

    #[test]
    fn test_inverse_pairs_cancel() {
        let db = Database::new(1);
        let games = prepare_games(&db, boards(&["..x.", ".o..", "...."]));
        assert_eq!(names(&games), vec!["...."]);
    }

    #[test]
    fn test_zero_parts_are_dropped() {
        let mut db = Database::new(2);
        db.build(2, None).unwrap();
        // "." は P、".x." は L
        let games = prepare_games(&db, boards(&[".", ".x."]));
        assert_eq!(names(&games), vec![".x."]);
        assert!(games[0].is_positive());
    }
}
