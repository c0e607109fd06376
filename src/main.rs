// Entry point and high-level CLI flow.
//
// A one-shot run loads the payload, prints a preview of every dashboard
// section and exports each section to CSV plus a JSON summary. With
// `--interactive` the same steps sit behind a menu, together with card
// browsers that keep per-card expand/collapse and quote carousel state.
mod config;
mod error;
mod icons;
mod insights;
mod loader;
mod output;
mod projection;
mod reports;
mod types;
mod util;
mod view;

use clap::Parser;
use config::{Cli, ReportConfig};
use error::{ReportError, ReportResult};
use once_cell::sync::Lazy;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::{Mutex, PoisonError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use types::ReviewAnalyticsData;

// Loaded once, reused by every menu action in the same run.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { data: None }));

struct AppState {
    data: Option<ReviewAnalyticsData>,
}

fn loaded_data() -> Option<ReviewAnalyticsData> {
    let state = APP_STATE.lock().unwrap_or_else(PoisonError::into_inner);
    state.data.clone()
}

/// Read one trimmed line after printing `prompt`. `None` once the input is
/// closed or unreadable.
fn read_line(input: &mut impl BufRead, prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match input.read_line(&mut buf) {
        Ok(0) => None,
        Ok(_) => Some(buf.trim().to_string()),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read input");
            None
        }
    }
}

/// Ask whether to return to the main menu. `true` for `Y`, `false` for `N`
/// or closed input.
fn prompt_back_to_menu(input: &mut impl BufRead) -> bool {
    loop {
        let Some(answer) = read_line(input, "Back to main menu (Y/N): ") else {
            return false;
        };
        match answer.to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Zero-based card index plus an optional quote action: `"2"` toggles card
/// two, `"2n"` / `"2p"` page its quotes.
fn parse_card_command(choice: &str) -> Option<(usize, Option<char>)> {
    let choice = choice.trim();
    let (number, action) = match choice.strip_suffix(|c: char| c == 'n' || c == 'p') {
        Some(number) => (number, choice.chars().last()),
        None => (choice, None),
    };
    let idx = number.trim().parse::<usize>().ok()?.checked_sub(1)?;
    Some((idx, action))
}

/// Load and validate the payload, store it in `APP_STATE` and print what the
/// loader found.
fn handle_load(config: &ReportConfig) -> ReportResult<()> {
    tracing::info!(input = %config.input.display(), "loading review analytics");
    let (data, report) = loader::load_analytics(&config.input)?;
    println!(
        "Loaded review analytics: {} competitor advantages, {} strengths ({} patient quotes), {} employees, {} recommendations, {} seasonal tips.",
        util::format_int(report.competitor_advantages),
        util::format_int(report.clinic_strengths),
        util::format_int(report.patient_quotes),
        util::format_int(report.employees),
        util::format_int(report.recommendations),
        util::format_int(report.seasonal_tips),
    );
    if report.warnings() > 0 {
        println!(
            "Note: {} values were out of range or unreadable ({} ratings clamped).",
            util::format_int(report.warnings()),
            util::format_int(report.clamped_ratings),
        );
    }
    println!();
    let mut state = APP_STATE.lock().unwrap_or_else(PoisonError::into_inner);
    state.data = Some(data);
    Ok(())
}

/// Build every section, print its preview and, unless disabled, export it.
fn handle_generate_reports(config: &ReportConfig) -> ReportResult<()> {
    let data = loaded_data().ok_or(ReportError::NoData)?;
    let rows = config.preview_rows;
    let export = |file: &str| config.export.then(|| config.out_dir.join(file));
    if config.export {
        output::ensure_dir(&config.out_dir)?;
    }
    tracing::info!(export = config.export, out_dir = %config.out_dir.display(), "generating reports");

    let comparison = &data.competitive_comparison;
    println!("{}\n", comparison.summary);
    println!("Focus areas: {}\n", reports::quick_access_chips(comparison).join(" | "));
    let improvements = reports::build_improvements(comparison);
    output::preview_table(1, "Areas for Improvement", Some("ranked by payload order"), &improvements, rows);
    if let Some(path) = export("improvements.csv") {
        output::write_csv(&path, &improvements)?;
    }

    let strengths = reports::build_strengths(&data.clinic_strengths, config.today, config.time_ago);
    output::preview_table(2, "Your Strengths", None, &strengths, rows);
    if let Some(path) = export("strengths.csv") {
        output::write_csv(&path, &strengths)?;
    }

    let employees = reports::build_employees(&data.top_rated_employees);
    output::preview_table(3, "Top Employee Highlights", None, &employees, rows);
    if let Some(path) = export("employees.csv") {
        output::write_csv(&path, &employees)?;
    }

    let trend = &data.improving_trend;
    let metrics = reports::build_metrics(&data.metrics);
    let gap_note = format!("Behind by {}, {}", trend.behind_by, trend.percentile);
    println!("Review Gap: {}", trend.message);
    if let Some(sentiment) = reports::build_sentiment(&data.metrics) {
        println!(
            "Positive sentiment: {}% vs {}% ({})",
            sentiment.your_percent,
            sentiment.competitor_percent,
            sentiment.badge()
        );
    }
    output::preview_table(4, "Review Metrics", Some(gap_note.as_str()), &metrics, metrics.len());
    if let Some(path) = export("metrics.csv") {
        output::write_csv(&path, &metrics)?;
    }

    let ranks = reports::build_market_ranks(&data.metrics);
    if !ranks.is_empty() {
        output::preview_table(5, "Market Position", None, &ranks, ranks.len());
        if let Some(path) = export("market_position.csv") {
            output::write_csv(&path, &ranks)?;
        }
    }
    if let Some(score) = &data.marketing_score {
        let (position, board) = reports::build_scoreboard(score);
        let mut note = format!(
            "Your marketing score {}/10, {}, {}",
            util::format_plain(score.you),
            position.badge(),
            position.average_note()
        );
        if let (Some(trend), Some(value)) = (score.trend, &score.trend_value) {
            note.push_str(&format!(", {} {}", trend.arrow(), value));
        }
        output::preview_table(6, "Marketing Score", Some(note.as_str()), &board, board.len());
        if !position.is_first() {
            println!("{:.1} points to reach #1\n", position.gap_to_first);
        }
        if let Some(path) = export("marketing_score.csv") {
            output::write_csv(&path, &board)?;
        }
    }

    let target = &data.monthly_review_target;
    println!(
        "Monthly Target: current {}, target {} ({} increase)",
        target.current, target.target, target.percentage_increase
    );
    if let Some(message) = &target.seasonal_message {
        println!("  {}", message);
    }
    println!();

    let swot = reports::build_swot(&data.swot_analysis);
    output::preview_table(7, "SWOT Analysis", None, &swot, swot.len());
    if let Some(path) = export("swot.csv") {
        output::write_csv(&path, &swot)?;
    }

    let recommendations = reports::build_recommendations(&data.marketing_recommendations);
    output::preview_table(8, "Marketing Recommendations", Some("high priority first"), &recommendations, rows);
    if let Some(path) = export("recommendations.csv") {
        output::write_csv(&path, &recommendations)?;
    }

    let tips = reports::build_seasonal_tips(data.seasonal_tips.as_deref());
    if !tips.is_empty() {
        output::preview_table(9, "Seasonal Tips", None, &tips, rows);
        if let Some(path) = export("seasonal_tips.csv") {
            output::write_csv(&path, &tips)?;
        }
    }

    let monthly = reports::build_trend(trend);
    if !monthly.is_empty() {
        output::preview_table(10, "Monthly Review Trend", None, &monthly, monthly.len());
        if let Some(path) = export("monthly_trend.csv") {
            output::write_csv(&path, &monthly)?;
        }
    }

    let summary = reports::generate_summary(&data);
    if let Some(path) = export("summary.json") {
        output::write_json(&path, &summary)?;
        println!("Outputs saved to {}\n", config.out_dir.display());
    }
    tracing::info!(
        advantages = summary.competitor_advantages,
        recommendations = summary.recommendations,
        "reports generated"
    );
    Ok(())
}

/// Browse improvement cards: a card number toggles it, `b` goes back.
fn browse_improvements(input: &mut impl BufRead) -> ReportResult<()> {
    let data = loaded_data().ok_or(ReportError::NoData)?;
    let mut cards: Vec<view::ImprovementCard> = data
        .competitive_comparison
        .competitor_advantages
        .iter()
        .enumerate()
        .map(|(idx, a)| view::ImprovementCard::new(a, idx + 1))
        .collect();
    loop {
        for card in &cards {
            println!("{}\n", card.render());
        }
        let Some(choice) = read_line(input, "Card number to expand/collapse, or b to go back: ")
        else {
            return Ok(());
        };
        if choice.eq_ignore_ascii_case("b") {
            return Ok(());
        }
        match choice.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
            Some(idx) if idx < cards.len() => cards[idx].toggle(),
            _ => println!("Invalid choice.\n"),
        }
    }
}

/// Browse strength cards: `<n>` toggles, `<n>n` / `<n>p` page quotes.
fn browse_strengths(config: &ReportConfig, input: &mut impl BufRead) -> ReportResult<()> {
    let data = loaded_data().ok_or(ReportError::NoData)?;
    let mut cards: Vec<view::StrengthCard> =
        data.clinic_strengths.iter().map(view::StrengthCard::new).collect();
    loop {
        for (idx, card) in cards.iter().enumerate() {
            println!("[{}] {}\n", idx + 1, card.render(config.today, config.time_ago));
        }
        let Some(choice) = read_line(
            input,
            "Card number (add n/p for next/previous quote), or b to go back: ",
        ) else {
            return Ok(());
        };
        if choice.eq_ignore_ascii_case("b") {
            return Ok(());
        }
        let Some((idx, action)) = parse_card_command(&choice) else {
            println!("Invalid choice.\n");
            continue;
        };
        let Some(card) = cards.get_mut(idx) else {
            println!("Invalid choice.\n");
            continue;
        };
        match action {
            Some('n') => card.next_quote(),
            Some('p') => card.prev_quote(),
            _ => card.toggle(),
        }
    }
}

fn run_interactive(config: &ReportConfig, input: &mut impl BufRead) {
    loop {
        println!("Review Report");
        println!("[1] Load the file");
        println!("[2] Generate Reports");
        println!("[3] Browse Areas for Improvement");
        println!("[4] Browse Strengths");
        println!("[5] Exit\n");
        let Some(choice) = read_line(input, "Enter choice: ") else {
            println!("Exiting the program.");
            return;
        };
        let result = match choice.as_str() {
            "1" => handle_load(config),
            "2" => {
                println!();
                let result = handle_generate_reports(config);
                if result.is_ok() && !prompt_back_to_menu(input) {
                    println!("Exiting the program.");
                    return;
                }
                result
            }
            "3" => browse_improvements(input),
            "4" => browse_strengths(config, input),
            "5" => {
                println!("Exiting the program.");
                return;
            }
            _ => {
                println!("Invalid choice. Please enter 1-5.\n");
                Ok(())
            }
        };
        if let Err(e) = result {
            tracing::error!(error = %e, "menu action failed");
            println!("Error: {}\n", e);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("review_report=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let config = ReportConfig::from(Cli::parse());

    if config.interactive {
        run_interactive(&config, &mut io::stdin().lock());
        return ExitCode::SUCCESS;
    }

    match handle_load(&config).and_then(|()| handle_generate_reports(&config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "report run failed");
            ExitCode::FAILURE
        }
    }
}
