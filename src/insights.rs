//! Derived display values.
//!
//! Every function here is a pure function of the payload (and, for relative
//! dates, of "today"). Report builders compose them into rows.

use std::cmp::Ordering;

use chrono::NaiveDate;
use clap::ValueEnum;

use crate::types::{MarketingRecommendation, MetricValue};
use crate::util::{average, days_diff, format_plain, parse_date_safe};

/// Urgency bucket for a 1-based rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityTier {
    Important,
    NeedsImprovement,
    Consider,
}

impl PriorityTier {
    /// Ranks are 1-based. Rank 1 is the top tier, ranks 2 and 3 the middle
    /// tier, everything after that the bottom tier.
    pub fn from_rank(rank: usize) -> Self {
        match rank {
            0 | 1 => PriorityTier::Important,
            2..=3 => PriorityTier::NeedsImprovement,
            _ => PriorityTier::Consider,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriorityTier::Important => "Important",
            PriorityTier::NeedsImprovement => "Needs Improvement",
            PriorityTier::Consider => "Consider",
        }
    }
}

/// Recommendations ordered high, medium, low. Equal priorities keep their
/// input order.
pub fn sort_recommendations(recs: &[MarketingRecommendation]) -> Vec<&MarketingRecommendation> {
    let mut sorted: Vec<&MarketingRecommendation> = recs.iter().collect();
    // `sort_by_key` is stable.
    sorted.sort_by_key(|r| r.priority.weight());
    sorted
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaStatus {
    Ahead,
    Behind,
    Tied,
}

impl DeltaStatus {
    pub fn label(self) -> &'static str {
        match self {
            DeltaStatus::Ahead => "Ahead",
            DeltaStatus::Behind => "Behind",
            DeltaStatus::Tied => "Tied",
        }
    }
}

/// How a metric is displayed: raw counts or percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Count,
    Percentage,
}

/// You-vs-competitor comparison for one metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delta {
    pub difference: f64,
    pub status: DeltaStatus,
    pub percent_of_competitor: f64,
}

impl Delta {
    pub fn between(yours: f64, competitor: f64) -> Self {
        let difference = yours - competitor;
        let status = if difference > 0.0 {
            DeltaStatus::Ahead
        } else if difference < 0.0 {
            DeltaStatus::Behind
        } else {
            DeltaStatus::Tied
        };
        let percent_of_competitor = if competitor > 0.0 {
            (yours / competitor) * 100.0
        } else {
            100.0
        };
        Self {
            difference,
            status,
            percent_of_competitor,
        }
    }

    /// Parses both sides first; `None` when either side has no numeric value.
    pub fn from_values(yours: &MetricValue, competitor: &MetricValue) -> Option<Self> {
        Some(Self::between(yours.as_f64()?, competitor.as_f64()?))
    }

    /// Width of "your" bar, capped at a full bar.
    pub fn bar_percent(&self) -> f64 {
        self.percent_of_competitor.min(100.0)
    }

    pub fn describe(&self, kind: MetricKind) -> String {
        let suffix = match kind {
            MetricKind::Count => "",
            MetricKind::Percentage => "%",
        };
        let magnitude = format_plain(self.difference.abs());
        match self.status {
            DeltaStatus::Ahead => format!("Ahead by {}{}", magnitude, suffix),
            DeltaStatus::Behind => format!("{}{} to catch up", magnitude, suffix),
            DeltaStatus::Tied => "Tied".to_string(),
        }
    }
}

/// Positive-review share for you and the competitor, in whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentimentBreakdown {
    pub your_percent: i64,
    pub competitor_percent: i64,
}

impl SentimentBreakdown {
    pub fn new(positive: f64, total: f64, competitor_positive: f64, competitor_total: f64) -> Self {
        Self {
            your_percent: rounded_share(positive, total),
            competitor_percent: rounded_share(competitor_positive, competitor_total),
        }
    }

    pub fn difference(&self) -> i64 {
        self.your_percent - self.competitor_percent
    }

    pub fn badge(&self) -> String {
        let diff = self.difference();
        match diff.cmp(&0) {
            Ordering::Greater => format!("+{}%", diff),
            Ordering::Less => format!("-{}%", diff.abs()),
            Ordering::Equal => "=".to_string(),
        }
    }
}

fn rounded_share(part: f64, total: f64) -> i64 {
    if total > 0.0 {
        ((part / total) * 100.0).round() as i64
    } else {
        0
    }
}

/// Color band behind a 0-10 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub fn of(score: f64) -> Self {
        if score >= 7.0 {
            ScoreBand::Strong
        } else if score >= 5.0 {
            ScoreBand::Moderate
        } else {
            ScoreBand::Weak
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Strong => "Strong",
            ScoreBand::Moderate => "Moderate",
            ScoreBand::Weak => "Weak",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub name: String,
    pub score: f64,
    pub is_you: bool,
}

/// Where "you" sit among a set of scored practices.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketPosition {
    /// Everyone, best first.
    pub standings: Vec<Standing>,
    pub rank: usize,
    pub average: f64,
    pub above_average: bool,
    pub gap_to_first: f64,
}

impl MarketPosition {
    /// Ranks `yours` among `competitors`, highest score first.
    ///
    /// "You" is inserted ahead of the competitors and the sort is stable, so
    /// a tie always resolves in your favour and competitors that tie keep
    /// their input order.
    pub fn rank(your_name: &str, yours: f64, competitors: &[(String, f64)]) -> Self {
        let mut standings = Vec::with_capacity(competitors.len() + 1);
        standings.push(Standing {
            name: your_name.to_string(),
            score: yours,
            is_you: true,
        });
        standings.extend(competitors.iter().map(|(name, score)| Standing {
            name: name.clone(),
            score: *score,
            is_you: false,
        }));
        standings.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let rank = standings
            .iter()
            .position(|s| s.is_you)
            .map(|idx| idx + 1)
            .unwrap_or(1);
        let scores: Vec<f64> = standings.iter().map(|s| s.score).collect();
        let average = average(&scores);
        let top = standings.first().map(|s| s.score).unwrap_or(yours);
        let gap_to_first = if rank == 1 { 0.0 } else { top - yours };
        Self {
            standings,
            rank,
            average,
            above_average: yours > average,
            gap_to_first,
        }
    }

    pub fn size(&self) -> usize {
        self.standings.len()
    }

    pub fn is_first(&self) -> bool {
        self.rank == 1
    }

    pub fn is_last(&self) -> bool {
        self.rank == self.size()
    }

    pub fn badge(&self) -> String {
        if self.is_first() {
            "#1 in Market".to_string()
        } else {
            format!("#{} of {}", self.rank, self.size())
        }
    }

    pub fn average_note(&self) -> String {
        let side = if self.above_average { "Above" } else { "Below" };
        format!("{} market average ({:.1})", side, self.average)
    }
}

/// Relative-date wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimeAgoStyle {
    /// days, weeks, months, years with no special cases ("1 days ago").
    Plain,
    /// adds "today", singular forms and wider single-unit windows.
    Natural,
}

pub fn time_ago(days: i64, style: TimeAgoStyle) -> String {
    match style {
        TimeAgoStyle::Plain => {
            if days < 7 {
                format!("{} days ago", days)
            } else if days < 30 {
                format!("{} weeks ago", days / 7)
            } else if days < 365 {
                format!("{} months ago", days / 30)
            } else {
                format!("{} years ago", days / 365)
            }
        }
        TimeAgoStyle::Natural => match days {
            d if d < 1 => "today".to_string(),
            1 => "1 day ago".to_string(),
            d if d < 7 => format!("{} days ago", d),
            d if d < 14 => "1 week ago".to_string(),
            d if d < 30 => format!("{} weeks ago", d / 7),
            d if d < 60 => "1 month ago".to_string(),
            d if d < 365 => format!("{} months ago", d / 30),
            d if d < 730 => "1 year ago".to_string(),
            d => format!("{} years ago", d / 365),
        },
    }
}

/// Relative wording for an ISO review date; anything else is shown as given.
pub fn review_age(raw: &str, today: NaiveDate, style: TimeAgoStyle) -> String {
    match parse_date_safe(raw) {
        Some(date) => time_ago(days_diff(date, today), style),
        None => raw.to_string(),
    }
}
