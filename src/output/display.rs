//! Display functions for game statistics

use super::formatters::{create_progress_bar, format_percentage};
use crate::core::MAX_GUESSES;
use crate::stats::Stats;
use colored::Colorize;
use std::path::Path;

/// Print a statistics snapshot with its guess distribution
pub fn print_stats(stats: &Stats, source: &Path) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "DAILY WORDLE STATS".bright_cyan().bold(),
        stats.last_reset_date.to_string().bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Summary:".bright_cyan().bold());
    println!("   Players:          {}", stats.total_players);
    println!("   Winners:          {}", stats.total_winners);
    println!(
        "   Win rate:         {}",
        format_percentage(stats.win_percentage()).bright_yellow().bold()
    );
    println!(
        "   Average guesses:  {}",
        format!("{:.1}", stats.average_guesses()).bright_yellow().bold()
    );

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    let most = (1..=MAX_GUESSES)
        .map(|attempts| stats.guess_count(attempts))
        .max()
        .unwrap_or(0);

    for attempts in 1..=MAX_GUESSES {
        let count = stats.guess_count(attempts);
        let bar = create_progress_bar(f64::from(count), f64::from(most), 40);
        println!("   {attempts}: {} {count:4}", bar.green());
    }

    println!("\n   {}", format!("Source: {}", source.display()).bright_black());
}
