//! Command-line configuration.
//!
//! Everything is resolved once at startup into a `ReportConfig` and passed
//! down, so report builders never read the environment themselves.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::insights::TimeAgoStyle;

#[derive(Debug, Parser)]
#[command(
    name = "review_report",
    version,
    about = "Competitive review analysis report for a dental practice"
)]
pub struct Cli {
    /// Review analytics payload (JSON).
    #[arg(long, env = "REVIEW_REPORT_INPUT", default_value = "data/review_analytics.json")]
    pub input: PathBuf,

    /// Directory that receives the CSV exports and summary.json.
    #[arg(long, env = "REVIEW_REPORT_OUT_DIR", default_value = "reports")]
    pub out_dir: PathBuf,

    /// Reference date for relative review dates (YYYY-MM-DD). Defaults to today.
    #[arg(long, env = "REVIEW_REPORT_TODAY", value_parser = parse_day)]
    pub today: Option<NaiveDate>,

    /// Wording for relative review dates.
    #[arg(long, value_enum, default_value_t = TimeAgoStyle::Natural)]
    pub time_ago: TimeAgoStyle,

    /// Rows shown per section in the console preview.
    #[arg(long, default_value_t = 3)]
    pub preview_rows: usize,

    /// Print previews only; write no files.
    #[arg(long)]
    pub no_export: bool,

    /// Start the interactive menu instead of a one-shot run.
    #[arg(long, short)]
    pub interactive: bool,
}

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// Settings resolved at startup.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub today: NaiveDate,
    pub time_ago: TimeAgoStyle,
    pub preview_rows: usize,
    pub export: bool,
    pub interactive: bool,
}

impl From<Cli> for ReportConfig {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.input,
            out_dir: cli.out_dir,
            today: cli
                .today
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
            time_ago: cli.time_ago,
            preview_rows: cli.preview_rows,
            export: !cli.no_export,
            interactive: cli.interactive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve() {
        let cli = Cli::try_parse_from(["review_report", "--today", "2025-01-19"]).unwrap();
        let config = ReportConfig::from(cli);
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2025, 1, 19).unwrap());
        assert_eq!(config.time_ago, TimeAgoStyle::Natural);
        assert_eq!(config.preview_rows, 3);
        assert!(config.export);
        assert!(!config.interactive);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "review_report",
            "--input",
            "payload.json",
            "--out-dir",
            "out",
            "--time-ago",
            "plain",
            "--preview-rows",
            "10",
            "--no-export",
            "-i",
        ])
        .unwrap();
        let config = ReportConfig::from(cli);
        assert_eq!(config.input, PathBuf::from("payload.json"));
        assert_eq!(config.out_dir, PathBuf::from("out"));
        assert_eq!(config.time_ago, TimeAgoStyle::Plain);
        assert_eq!(config.preview_rows, 10);
        assert!(!config.export);
        assert!(config.interactive);
    }

    #[test]
    fn rejects_malformed_today() {
        assert!(Cli::try_parse_from(["review_report", "--today", "19/01/2025"]).is_err());
    }
}
