//! Tests for the generate → index → play pipeline through the app container

use std::{
    fs,
    io::{BufRead, BufReader},
};

use tempfile::TempDir;
use vector_ox::{
    adapters::{InMemoryIndex, load_examples, save_examples},
    app::{App, GameConfig},
    pipeline::{
        DataGenerator, GameObserver, JsonlObserver, MetricsObserver, Observation, Tournament,
        play_game,
    },
    ports::Strategy,
    strategy::StrategyKind,
    tictactoe::{Board, GameOutcome, Player},
};

fn generate(num_games: usize, seed: u64) -> Vec<vector_ox::adapters::TrainingExample> {
    let config = GameConfig::new(3).with_seed(seed);
    DataGenerator::new(config)
        .unwrap()
        .generate(num_games)
        .unwrap()
}

#[test]
fn test_generated_data_survives_file_roundtrip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("training_data.txt");

    let examples = generate(20, 42);
    save_examples(&path, &examples).unwrap();
    let loaded = load_examples(&path).unwrap();

    assert_eq!(loaded, examples);
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), examples.len());
}

#[test]
fn test_malformed_lines_are_skipped_on_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("training_data.txt");

    let examples = generate(3, 7);
    save_examples(&path, &examples).unwrap();
    let mut text = fs::read_to_string(&path).unwrap();
    text.push_str("not a training line\n\n");
    fs::write(&path, text).unwrap();

    assert_eq!(load_examples(&path).unwrap(), examples);
}

#[test]
fn test_index_built_from_file_answers_queries() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("training_data.txt");
    let examples = generate(30, 3);
    save_examples(&path, &examples).unwrap();

    let app = App::from_training_file(&path).unwrap();
    let index = app.index();
    assert_eq!(index.len(), examples.len());

    let empty = Board::new(3).unwrap();
    let neighbours = index.query_nearest(&empty.to_vector(), 5).unwrap();
    assert_eq!(neighbours.len(), 5);
    // Every game opens from the empty board, so the nearest records are exact
    assert!(neighbours.iter().all(|r| r.vector == empty.to_vector()));
}

#[test]
fn test_trained_vector_strategy_mostly_retrieves() {
    let examples = generate(50, 11);
    let app = App::for_testing()
        .with_index(InMemoryIndex::from_examples(&examples).unwrap())
        .with_default_seed(1)
        .build();
    let config = GameConfig::new(3);

    let mut vector = app.create_strategy(StrategyKind::Vector, &config).unwrap();
    let mut random = app.create_strategy(StrategyKind::Random, &config).unwrap();
    let mut observers: Vec<Box<dyn GameObserver>> = Vec::new();

    let record = play_game(
        config.new_board().unwrap(),
        &mut *vector,
        &mut *random,
        Player::X,
        &mut observers,
    )
    .unwrap();

    assert!(record.outcome.is_terminal());
    let vector_moves = record
        .moves
        .iter()
        .filter(|m| m.player == Player::X)
        .count();
    assert!(record.fallback_count() < vector_moves);
}

#[test]
fn test_untrained_app_vector_strategy_falls_back() {
    let app = App::new();
    let config = GameConfig::new(3).with_seed(5);
    let mut x = app.create_strategy(StrategyKind::Vector, &config).unwrap();
    let mut o = app.create_strategy(StrategyKind::Vector, &config.clone().with_seed(6)).unwrap();
    let mut observers: Vec<Box<dyn GameObserver>> = vec![Box::new(MetricsObserver::new())];

    let record = play_game(
        config.new_board().unwrap(),
        &mut *x,
        &mut *o,
        Player::X,
        &mut observers,
    )
    .unwrap();

    assert_eq!(record.fallback_count(), record.len());
}

#[test]
fn test_jsonl_log_of_generated_games() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("games.jsonl");

    let examples = DataGenerator::new(GameConfig::new(3).with_seed(9))
        .unwrap()
        .with_observer(Box::new(JsonlObserver::new(&path).unwrap()))
        .generate(4)
        .unwrap();

    let file = fs::File::open(&path).unwrap();
    let observations: Vec<Observation> = BufReader::new(file)
        .lines()
        .map(|line| serde_json::from_str(&line.unwrap()).unwrap())
        .collect();

    assert_eq!(observations.len(), 4);
    let logged_moves: usize = observations.iter().map(|o| o.moves.len()).sum();
    assert_eq!(logged_moves, examples.len());
    for (i, observation) in observations.iter().enumerate() {
        assert_eq!(observation.game_num, i);
        assert_eq!(observation.moves[0].state, ".........");
    }
}

#[test]
fn test_tournament_between_all_kinds() {
    let examples = generate(20, 13);
    let app = App::for_testing()
        .with_index(InMemoryIndex::from_examples(&examples).unwrap())
        .with_default_seed(2)
        .build();
    let config = GameConfig::new(3);
    let entrants: Vec<Box<dyn Strategy>> = StrategyKind::ALL
        .iter()
        .map(|&kind| app.create_strategy(kind, &config).unwrap())
        .collect();

    let report = Tournament::new(entrants, config).unwrap().run(4).unwrap();

    assert_eq!(report.matchups.len(), 6);
    for stats in &report.stats {
        assert_eq!(stats.total_games, 16);
        assert_eq!(stats.wins + stats.losses + stats.ties, stats.total_games);
    }
    let minimax = report.stats_for("Minimax").unwrap();
    assert_eq!(minimax.losses, 0);

    let total_wins: usize = report.stats.iter().map(|s| s.wins).sum();
    let total_losses: usize = report.stats.iter().map(|s| s.losses).sum();
    assert_eq!(total_wins, total_losses);

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("report.json");
    report.save_json(&path).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["games_per_matchup"], 4);
}

#[test]
fn test_generated_examples_carry_final_outcome() {
    let examples = generate(10, 17);
    for example in &examples {
        assert!(matches!(
            example.outcome,
            GameOutcome::Win(_) | GameOutcome::Draw
        ));
    }
}

#[test]
fn test_tournament_between_two_random_entrants() {
    let app = App::new();
    let config = GameConfig::new(3).with_seed(1);
    let entrants = app
        .create_entrants(&[StrategyKind::Random, StrategyKind::Random], &config)
        .unwrap();

    let report = Tournament::new(entrants, config).unwrap().run(5).unwrap();

    assert_eq!(report.matchups.len(), 2);
    assert_eq!(report.matchups[0].x, "Random #1");
    assert_eq!(report.matchups[0].o, "Random #2");
    for stats in &report.stats {
        assert_eq!(stats.total_games, 10);
    }
}

#[test]
fn test_large_board_without_depth_limit_plays_random_against_vector() {
    let app = App::new();
    let config = GameConfig::new(4).with_seed(4);
    let mut x = app.create_strategy(StrategyKind::Random, &config).unwrap();
    let mut o = app.create_strategy(StrategyKind::Vector, &config).unwrap();
    let mut observers: Vec<Box<dyn GameObserver>> = Vec::new();

    let record = play_game(
        config.new_board().unwrap(),
        &mut *x,
        &mut *o,
        Player::X,
        &mut observers,
    )
    .unwrap();

    assert!(record.outcome.is_terminal());
    assert!(DataGenerator::new(config).is_err());
}
