//! Output formatting for CLI

use crate::{
    pipeline::TournamentReport,
    tictactoe::{Board, Cell},
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Render a board as a grid with row and column indices
pub fn render_board(board: &Board) -> String {
    let size = board.size();
    let width = (size - 1).to_string().len();
    let mut out = format!("{:width$}  ", "");
    out.push_str(
        &(0..size)
            .map(|c| format!("{c:>width$}"))
            .collect::<Vec<_>>()
            .join(" "),
    );
    out.push('\n');

    for (row, cells) in board.cells().chunks(size).enumerate() {
        out.push_str(&format!("{row:>width$}  "));
        let line: Vec<String> = cells
            .iter()
            .map(|cell| {
                let c = match cell {
                    Cell::Empty => '·',
                    other => other.to_char(),
                };
                format!("{c:>width$}")
            })
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

/// ASCII bar scaled against `max`
pub fn bar(value: f64, max: f64, width: usize) -> String {
    let filled = if max > 0.0 {
        ((value / max) * width as f64).round() as usize
    } else {
        0
    };
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Print per-strategy totals, matchups and the performance summary
pub fn print_tournament_report(report: &TournamentReport) {
    print_subsection("Strategy Performance");
    println!(
        "  {:<12} {:>7} {:>6} {:>7} {:>6} {:>9}",
        "Strategy", "Games", "Wins", "Losses", "Ties", "Win rate"
    );
    for s in &report.stats {
        println!(
            "  {:<12} {:>7} {:>6} {:>7} {:>6} {:>8.1}%",
            s.name,
            format_number(s.total_games),
            s.wins,
            s.losses,
            s.ties,
            s.win_rate * 100.0
        );
    }

    print_subsection("Win Rate Comparison");
    let max_rate = report
        .stats
        .iter()
        .map(|s| s.win_rate)
        .fold(0.0_f64, f64::max);
    let mut ranked: Vec<_> = report.stats.iter().collect();
    ranked.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate));
    for s in ranked {
        println!(
            "  {:<12} {} {:.1}%",
            s.name,
            bar(s.win_rate, max_rate, 40),
            s.win_rate * 100.0
        );
    }

    print_subsection("Matchups (X moves first)");
    for m in &report.matchups {
        println!(
            "  {:<10} vs {:<10} | X {:>4}  O {:>4}  ties {:>4}",
            m.x, m.o, m.x_wins, m.o_wins, m.ties
        );
    }

    print_subsection("Summary");
    if let Some(best) = report.best() {
        print_kv(
            "Best performer",
            &format!("{} ({:.1}%)", best.name, best.win_rate * 100.0),
        );
    }
    if let Some(worst) = report.worst() {
        print_kv(
            "Worst performer",
            &format!("{} ({:.1}%)", worst.name, worst.win_rate * 100.0),
        );
    }
    let average = report.average_win_rate();
    print_kv("Average win rate", &format!("{:.1}%", average * 100.0));
    for s in &report.stats {
        let verdict = if s.win_rate > average {
            "above average"
        } else if s.win_rate < average {
            "below average"
        } else {
            "average"
        };
        print_kv(&s.name, verdict);
    }
}
