use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dashboard::{ActivityRecommendation, Dashboard};
use recommender::{RandomSource, RecommendError, SeededRandom, ThreadRandom};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// LifeLog - activity diary dashboard
#[derive(Parser)]
#[command(name = "life-log")]
#[command(about = "Life-log dashboard with content-based activity suggestions", long_about = None)]
struct Cli {
    /// Directory holding the worksheet CSV exports
    #[arg(short, long, default_value = "data/sheets")]
    data_dir: PathBuf,

    /// Use the built-in sample workbook instead of reading the worksheets
    #[arg(long)]
    sample: bool,

    /// Fail when the worksheets cannot be loaded instead of using sample data
    #[arg(long, conflicts_with = "sample")]
    strict: bool,

    /// Print JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest the next activity
    Recommend {
        /// Show how the suggestion was chosen
        #[arg(long)]
        explain: bool,

        /// Seed for the random fallback, for reproducible picks
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show diary size and progress
    Status,

    /// Show ratings over time
    Timeline,

    /// List diary entries as calendar events
    Calendar,

    /// Show restaurant scores
    Food,

    /// List the activities available for logging
    Activities,
}

fn main() -> Result<()> {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let dashboard = if cli.sample {
        Dashboard::sample()
    } else if cli.strict {
        Dashboard::load(&cli.data_dir).context("Failed to open the life-log workbook")?
    } else {
        Dashboard::load_or_sample(&cli.data_dir)
    };
    tracing::debug!("Workbook ready in {:?}", start.elapsed());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend { explain, seed } => handle_recommend(&dashboard, explain, seed, cli.json)?,
        Commands::Status => handle_status(&dashboard, cli.json)?,
        Commands::Timeline => handle_timeline(&dashboard, cli.json)?,
        Commands::Calendar => handle_calendar(&dashboard, cli.json)?,
        Commands::Food => handle_food(&dashboard, cli.json)?,
        Commands::Activities => handle_activities(&dashboard, cli.json)?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(dashboard: &Dashboard, explain: bool, seed: Option<u64>, json: bool) -> Result<()> {
    let random: Box<dyn RandomSource> = match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };

    match dashboard.recommend(random) {
        Ok(rec) if json => print_json(&rec),
        Ok(rec) => {
            print_recommendation(&rec, explain);
            Ok(())
        }
        Err(RecommendError::EmptyCatalog) => {
            if json {
                print_json(&serde_json::json!({ "recommendation": null }))
            } else {
                println!("{}", "Nothing to recommend yet: add some activities first.".yellow());
                Ok(())
            }
        }
    }
}

/// Handle the 'status' command
fn handle_status(dashboard: &Dashboard, json: bool) -> Result<()> {
    let status = dashboard.status();
    if json {
        return print_json(&status);
    }

    println!("{}", "System Status".bold().blue());
    println!("{}Version: {}", "• ".green(), status.version);
    println!("{}Logs: {}", "• ".green(), status.log_count);
    println!(
        "{}Progress: {} {:.0}%",
        "• ".green(),
        progress_bar(status.progress, 20),
        status.progress * 100.0
    );
    Ok(())
}

/// Handle the 'timeline' command
fn handle_timeline(dashboard: &Dashboard, json: bool) -> Result<()> {
    let timeline = dashboard.rating_timeline();
    if json {
        return print_json(&timeline);
    }

    println!("{}", "Ratings over time:".bold().blue());
    if timeline.is_empty() {
        println!("  (no diary entries)");
    }
    for point in &timeline {
        println!(
            "  {}  {:<5} {}",
            point.date.format("%Y-%m-%d"),
            "★".repeat(point.rating.clamp(0, 5) as usize).yellow(),
            point.activity
        );
    }
    Ok(())
}

/// Handle the 'calendar' command
fn handle_calendar(dashboard: &Dashboard, json: bool) -> Result<()> {
    let events = dashboard.calendar_events();
    if json {
        return print_json(&events);
    }

    println!("{}", "Calendar:".bold().blue());
    for event in &events {
        println!("  {}  {}", event.start.cyan(), event.title);
    }
    Ok(())
}

/// Handle the 'food' command
fn handle_food(dashboard: &Dashboard, json: bool) -> Result<()> {
    let profiles = dashboard.restaurant_profiles();
    if json {
        return print_json(&profiles);
    }

    println!("{}", "Food Inspector:".bold().blue());
    for profile in &profiles {
        println!(
            "{} - {}/10 ({}, {})",
            profile.name.bold(),
            profile.total,
            profile.cuisine,
            profile.location
        );
        // The polygon repeats its first axis to close the shape; skip it here
        for point in profile.radar.iter().take(profile.radar.len().saturating_sub(1)) {
            println!(
                "  {:<9} {} {}",
                point.axis,
                progress_bar(point.value / 10.0, 10),
                point.value
            );
        }
        if !profile.review.is_empty() {
            println!("  \"{}\"", profile.review.italic());
        }
    }
    Ok(())
}

/// Handle the 'activities' command
fn handle_activities(dashboard: &Dashboard, json: bool) -> Result<()> {
    let choices = dashboard.activity_choices();
    if json {
        return print_json(&choices);
    }

    println!("{}", "Activities:".bold().blue());
    for name in &choices {
        println!("{}{}", "• ".green(), name);
    }
    Ok(())
}

/// Helper function to format and print a recommendation
fn print_recommendation(rec: &ActivityRecommendation, explain: bool) {
    println!("{} {}", "Suggested:".bold().green(), rec.name.bold());
    if !rec.description.is_empty() {
        println!("  {}", rec.description);
    }
    if !rec.location.is_empty() {
        println!("  Where: {}", rec.location);
    }
    println!("  Energy: {}  Budget: {:.2}", rec.energy_level, rec.budget);
    if explain {
        println!("  {} {}", "Why:".cyan(), rec.explanation);
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

/// Text progress bar for a fraction in 0.0..=1.0
fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_recommend_flags() {
        let cli = Cli::parse_from(["life-log", "--sample", "recommend", "--explain", "--seed", "7"]);
        assert!(cli.sample);
        match cli.command {
            Commands::Recommend { explain, seed } => {
                assert!(explain);
                assert_eq!(seed, Some(7));
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn test_sample_conflicts_with_strict() {
        assert!(Cli::try_parse_from(["life-log", "--sample", "--strict", "status"]).is_err());
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 4), "[----]");
        assert_eq!(progress_bar(0.5, 4), "[##--]");
        assert_eq!(progress_bar(2.0, 4), "[####]");
    }
}
