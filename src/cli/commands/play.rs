//! Play command - Play games between strategies or against a human

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use crate::{
    app::{App, GameConfig},
    cli::{
        args::{BoardArgs, IndexArgs, parse_player_token},
        output::{print_kv, print_section, render_board},
    },
    pipeline::{GameObserver, ProgressObserver, play_game, play_numbered_game},
    ports::Strategy,
    strategy::{StrategyKind, StrategyResult},
    tictactoe::{Board, Game, GameOutcome, Move, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Play a game")]
pub struct PlayArgs {
    /// Who plays X: human, random, minimax or vector
    #[arg(long, short = 'x', default_value = "human")]
    pub x: String,

    /// Who plays O: human, random, minimax or vector
    #[arg(long, short = 'o', default_value = "vector")]
    pub o: String,

    /// Which token makes the first move (`x` or `o`)
    #[arg(long = "first-player", default_value = "x")]
    pub first_player: String,

    /// Number of games when no human is playing
    #[arg(long, short = 'g', default_value_t = 1)]
    pub games: usize,

    #[command(flatten)]
    pub board: BoardArgs,

    #[command(flatten)]
    pub index: IndexArgs,
}

enum Seat {
    Human,
    Bot(Box<dyn Strategy>),
}

impl Seat {
    fn label(&self) -> String {
        match self {
            Seat::Human => "You".to_string(),
            Seat::Bot(strategy) => strategy.name().to_string(),
        }
    }
}

/// One line of human input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HumanInput {
    Move(Move),
    Undo,
    Quit,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = args.board.to_config()?;
    let first_player = parse_player_token(&args.first_player, "--first-player")?;
    let app = args.index.build_app()?;

    // Offset O's seed so mirrored strategies do not make identical choices
    let o_config = match config.seed {
        Some(seed) => config.clone().with_seed(seed.wrapping_add(1)),
        None => config.clone(),
    };
    let mut x = create_seat(&args.x, &app, &config)?;
    let mut o = create_seat(&args.o, &app, &o_config)?;

    print_section("Vector-OX");
    print_kv("Board", &format!("{0}x{0}", config.size));
    print_kv("Win length", &config.win_length().to_string());
    print_kv("X", &x.label());
    print_kv("O", &o.label());

    if let (Seat::Bot(xs), Seat::Bot(os)) = (&mut x, &mut o) {
        if args.games > 1 {
            return run_series(&config, &mut **xs, &mut **os, first_player, args.games);
        }

        let mut observers: Vec<Box<dyn GameObserver>> = vec![Box::new(MovePrinter)];
        let record = play_game(
            config.new_board()?,
            &mut **xs,
            &mut **os,
            first_player,
            &mut observers,
        )?;
        let final_board = Board::from_state_string(&record.final_state, Some(config.win_length()))?;
        println!("\n{}", render_board(&final_board));
        announce(record.outcome, xs.name(), os.name());
        return Ok(());
    }

    play_interactive(&config, &mut x, &mut o, first_player)
}

fn create_seat(token: &str, app: &App, config: &GameConfig) -> Result<Seat> {
    if token.trim().eq_ignore_ascii_case("human") {
        return Ok(Seat::Human);
    }
    let kind: StrategyKind = token.parse()?;
    Ok(Seat::Bot(app.create_strategy(kind, config)?))
}

fn run_series(
    config: &GameConfig,
    x: &mut dyn Strategy,
    o: &mut dyn Strategy,
    first_player: Player,
    games: usize,
) -> Result<()> {
    let mut observers: Vec<Box<dyn GameObserver>> = vec![Box::new(ProgressObserver::new())];
    for observer in &mut observers {
        observer.on_run_start(games)?;
    }

    let (mut x_wins, mut o_wins, mut draws) = (0, 0, 0);
    for game_num in 0..games {
        let record =
            play_numbered_game(game_num, config.new_board()?, x, o, first_player, &mut observers)?;
        match record.outcome {
            GameOutcome::Win(Player::X) => x_wins += 1,
            GameOutcome::Win(Player::O) => o_wins += 1,
            _ => draws += 1,
        }
    }
    for observer in &mut observers {
        observer.on_run_end()?;
    }

    print_kv(&format!("{} (X) wins", x.name()), &x_wins.to_string());
    print_kv(&format!("{} (O) wins", o.name()), &o_wins.to_string());
    print_kv("Ties", &draws.to_string());
    Ok(())
}

fn play_interactive(
    config: &GameConfig,
    x: &mut Seat,
    o: &mut Seat,
    first_player: Player,
) -> Result<()> {
    println!("\nEnter moves as `row,col` or a cell number (1 = top left).");
    println!("`u` takes back your last move, `q` quits.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut game = Game::new(config.new_board()?, first_player);

    loop {
        println!("\n{}", render_board(game.board()));
        let outcome = game.outcome();
        if outcome.is_terminal() {
            announce(outcome, &x.label(), &o.label());
            return Ok(());
        }

        let player = game.to_move();
        let seat = match player {
            Player::X => &mut *x,
            Player::O => &mut *o,
        };

        match seat {
            Seat::Bot(strategy) => {
                let result = strategy.select_move(game.board(), player)?;
                println!("{} ({player}) {}", strategy.name(), result.summary());
                game.play(result.mv)?;
            }
            Seat::Human => {
                print!("{player} to move> ");
                io::stdout().flush()?;
                let Some(line) = lines.next() else {
                    return Ok(());
                };
                let line = line.context("failed to read move from stdin")?;

                match parse_human_input(&line, game.board().size()) {
                    Ok(HumanInput::Quit) => return Ok(()),
                    Ok(HumanInput::Undo) => take_back_turn(&mut game, player)?,
                    Ok(HumanInput::Move(mv)) => {
                        if let Err(err) = game.play(mv) {
                            println!("{err}");
                        }
                    }
                    Err(err) => println!("{err}"),
                }
            }
        }
    }
}

/// Undo moves until `player`'s most recent move has been removed.
///
/// Leaves the game untouched when `player` has not moved yet.
fn take_back_turn(game: &mut Game, player: Player) -> Result<()> {
    if !game.moves().iter().any(|m| m.player == player) {
        println!("nothing to take back");
        return Ok(());
    }
    while let Some(undone) = game.take_back()? {
        if undone.player == player {
            return Ok(());
        }
    }
    println!("nothing to take back");
    Ok(())
}

fn parse_human_input(line: &str, size: usize) -> Result<HumanInput> {
    let input = line.trim().to_ascii_lowercase();
    match input.as_str() {
        "q" | "quit" | "exit" => return Ok(HumanInput::Quit),
        "u" | "undo" => return Ok(HumanInput::Undo),
        _ => {}
    }

    if input.contains(',') {
        return Ok(HumanInput::Move(input.parse()?));
    }
    let cell: usize = input
        .parse()
        .map_err(|_| anyhow!("'{}' is not a move (try `row,col` or 1-{})", line.trim(), size * size))?;
    if !(1..=size * size).contains(&cell) {
        return Err(anyhow!("cell {cell} is off the board (1-{})", size * size));
    }
    Ok(HumanInput::Move(Move::from_index(cell - 1, size)))
}

fn announce(outcome: GameOutcome, x: &str, o: &str) {
    match outcome {
        GameOutcome::Win(Player::X) => println!("{x} (X) wins!"),
        GameOutcome::Win(Player::O) => println!("{o} (O) wins!"),
        _ => println!("It's a tie."),
    }
}

/// Prints each bot move as it happens
struct MovePrinter;

impl GameObserver for MovePrinter {
    fn on_move(
        &mut self,
        _game_num: usize,
        ply: usize,
        board: &Board,
        player: Player,
        result: &StrategyResult,
    ) -> crate::Result<()> {
        println!("\n{}", render_board(board));
        println!("{}. {player}: {}", ply + 1, result.summary());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_human_input() {
        assert_eq!(
            parse_human_input("1,2", 3).unwrap(),
            HumanInput::Move(Move::new(1, 2))
        );
        assert_eq!(
            parse_human_input(" 5 ", 3).unwrap(),
            HumanInput::Move(Move::new(1, 1))
        );
        assert_eq!(
            parse_human_input("16", 4).unwrap(),
            HumanInput::Move(Move::new(3, 3))
        );
        assert_eq!(parse_human_input("Q", 3).unwrap(), HumanInput::Quit);
        assert_eq!(parse_human_input("undo", 3).unwrap(), HumanInput::Undo);
        assert!(parse_human_input("0", 3).is_err());
        assert!(parse_human_input("10", 3).is_err());
        assert!(parse_human_input("middle", 3).is_err());
    }

    #[test]
    fn test_take_back_turn_removes_bot_reply_too() {
        let mut game = Game::new(Board::new(3).unwrap(), Player::X);
        game.play(Move::new(0, 0)).unwrap();
        game.play(Move::new(1, 1)).unwrap();

        take_back_turn(&mut game, Player::X).unwrap();
        assert!(game.moves().is_empty());
        assert_eq!(game.to_move(), Player::X);
    }

    #[test]
    fn test_take_back_before_first_move_keeps_opening() {
        let mut game = Game::new(Board::new(3).unwrap(), Player::X);
        game.play(Move::new(1, 1)).unwrap();

        take_back_turn(&mut game, Player::O).unwrap();
        assert_eq!(game.moves().len(), 1);
        assert_eq!(game.to_move(), Player::O);
    }
}
