use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::util::{format_plain, parse_leading_f64};

// ---------------------------------------------------------------------------
// Input payload. Field names follow the camelCase JSON the dashboard API
// returns; everything here is read-only once the loader hands it out.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAnalyticsData {
    pub competitive_comparison: CompetitiveComparison,
    #[serde(default)]
    pub clinic_strengths: Vec<ClinicStrength>,
    #[serde(default)]
    pub top_rated_employees: Vec<TopRatedEmployee>,
    pub improving_trend: ImprovingTrend,
    pub metrics: ReviewMetrics,
    pub monthly_review_target: MonthlyTarget,
    pub swot_analysis: SwotAnalysis,
    #[serde(default)]
    pub marketing_recommendations: Vec<MarketingRecommendation>,
    #[serde(default)]
    pub seasonal_tips: Option<Vec<SeasonalTip>>,
    #[serde(default)]
    pub marketing_score: Option<MarketingScore>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitiveComparison {
    pub summary: String,
    #[serde(default)]
    pub competitor_advantages: Vec<CompetitorAdvantage>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorAdvantage {
    pub category: String,
    pub icon: String,
    pub insight: String,
    pub user_complaint: UserComplaint,
    pub competitor_quote: CompetitorQuote,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserComplaint {
    pub quote: String,
    pub rating: u8,
    pub reviewer_name: String,
    pub review_date: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorQuote {
    pub quote: String,
    pub competitor_name: String,
    pub review_date: String,
    pub recommendation: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicStrength {
    pub category: String,
    pub icon: String,
    pub description: String,
    #[serde(default)]
    pub patient_feedback: Vec<PatientFeedback>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientFeedback {
    pub quote: String,
    pub stars: u8,
    pub reviewer: String,
    pub date: String,
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopRatedEmployee {
    pub name: String,
    pub rating: f64,
    pub mention_count: u32,
    #[serde(default)]
    pub top_praise_keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrendPoint {
    pub month: String,
    pub you: f64,
    pub competitor: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovingTrend {
    pub message: String,
    pub behind_by: String,
    pub percentile: String,
    #[serde(default)]
    pub monthly_data: Option<Vec<MonthlyTrendPoint>>,
}

/// A metric as the API sends it: sometimes a number, sometimes a display
/// string such as `"99%"`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    /// Numeric reading of the value; `None` when a string has no numeric prefix.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            MetricValue::Text(s) => parse_leading_f64(s),
        }
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Number(n) => f.write_str(&format_plain(*n)),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewMetrics {
    pub total_reviews: MetricValue,
    pub total_reviews_competitor: MetricValue,
    pub last12_months_reviews: MetricValue,
    pub last12_months_reviews_competitor: MetricValue,
    pub positive_reviews12_mo: MetricValue,
    pub positive_reviews12_mo_competitor: MetricValue,
    pub positive_rate: MetricValue,
    pub positive_rate_competitor: MetricValue,
    /// Per-practice breakdown backing the market position charts.
    #[serde(default)]
    pub you: Option<MarketSnapshot>,
    #[serde(default)]
    pub competitors: Vec<MarketSnapshot>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    #[serde(default)]
    pub name: Option<String>,
    pub total_reviews: f64,
    pub last12_months_reviews: f64,
    pub positive_reviews12_mo: f64,
    pub positive_rate: MetricValue,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTarget {
    pub current: String,
    pub target: String,
    pub percentage_increase: String,
    #[serde(default)]
    pub seasonal_message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwotAnalysis {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub threats: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingRecommendation {
    pub priority: Priority,
    pub timeframe: Timeframe,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub audience: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalTip {
    pub month: String,
    pub tip: String,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingScore {
    pub you: f64,
    #[serde(default)]
    pub trend: Option<Trend>,
    #[serde(default)]
    pub trend_value: Option<String>,
    #[serde(default)]
    pub competitors: Vec<CompetitorScore>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompetitorScore {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort weight: high sorts first.
    pub fn weight(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Timeframe {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl Timeframe {
    pub fn label(self) -> &'static str {
        match self {
            Timeframe::ShortTerm => "1-3 months",
            Timeframe::MediumTerm => "3-6 months",
            Timeframe::LongTerm => "6-12 months",
        }
    }

    /// Dampens projected impact for work that pays off later.
    pub fn impact_multiplier(self) -> f64 {
        match self {
            Timeframe::ShortTerm => 1.0,
            Timeframe::MediumTerm => 0.9,
            Timeframe::LongTerm => 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn arrow(self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Stable => "→",
        }
    }
}

// ---------------------------------------------------------------------------
// Report rows. Each row is both a CSV record and a preview table row.
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ImprovementRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Icon")]
    #[tabled(rename = "Icon")]
    pub icon: String,
    #[serde(rename = "Category")]
    #[tabled(rename = "Category")]
    pub category: String,
    #[serde(rename = "Tier")]
    #[tabled(rename = "Tier")]
    pub tier: String,
    #[serde(rename = "Priority")]
    #[tabled(rename = "Priority")]
    pub priority: String,
    #[serde(rename = "PatientRating")]
    #[tabled(rename = "PatientRating")]
    pub patient_rating: String,
    #[serde(rename = "Competitor")]
    #[tabled(rename = "Competitor")]
    pub competitor: String,
    #[serde(rename = "Recommendation")]
    #[tabled(rename = "Recommendation")]
    pub recommendation: String,
    #[serde(rename = "ProjectedUplift")]
    #[tabled(rename = "ProjectedUplift")]
    pub projected_uplift: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct StrengthRow {
    #[serde(rename = "Icon")]
    #[tabled(rename = "Icon")]
    pub icon: String,
    #[serde(rename = "Category")]
    #[tabled(rename = "Category")]
    pub category: String,
    #[serde(rename = "Reviews")]
    #[tabled(rename = "Reviews")]
    pub reviews: usize,
    #[serde(rename = "Quote")]
    #[tabled(rename = "Quote")]
    pub quote: String,
    #[serde(rename = "Stars")]
    #[tabled(rename = "Stars")]
    pub stars: String,
    #[serde(rename = "Reviewer")]
    #[tabled(rename = "Reviewer")]
    pub reviewer: String,
    #[serde(rename = "When")]
    #[tabled(rename = "When")]
    pub when: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct EmployeeRow {
    #[serde(rename = "Name")]
    #[tabled(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    #[tabled(rename = "Description")]
    pub description: String,
    #[serde(rename = "Stars")]
    #[tabled(rename = "Stars")]
    pub stars: String,
    #[serde(rename = "Rating")]
    #[tabled(rename = "Rating")]
    pub rating: String,
    #[serde(rename = "Mentions")]
    #[tabled(rename = "Mentions")]
    pub mentions: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct MetricRow {
    #[serde(rename = "Metric")]
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[serde(rename = "You")]
    #[tabled(rename = "You")]
    pub you: String,
    #[serde(rename = "Competitor")]
    #[tabled(rename = "Competitor")]
    pub competitor: String,
    #[serde(rename = "Status")]
    #[tabled(rename = "Status")]
    pub status: String,
    #[serde(rename = "Difference")]
    #[tabled(rename = "Difference")]
    pub difference: String,
    #[serde(rename = "PctOfCompetitor")]
    #[tabled(rename = "PctOfCompetitor")]
    pub pct_of_competitor: String,
    #[serde(rename = "Bar")]
    #[tabled(rename = "Bar")]
    pub bar: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct MarketRankRow {
    #[serde(rename = "Metric")]
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[serde(rename = "YourValue")]
    #[tabled(rename = "YourValue")]
    pub your_value: String,
    #[serde(rename = "Badge")]
    #[tabled(rename = "Badge")]
    pub badge: String,
    #[serde(rename = "Leader")]
    #[tabled(rename = "Leader")]
    pub leader: String,
    #[serde(rename = "Standing")]
    #[tabled(rename = "Standing")]
    pub standing: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ScoreboardRow {
    #[serde(rename = "Position")]
    #[tabled(rename = "Position")]
    pub position: usize,
    #[serde(rename = "Practice")]
    #[tabled(rename = "Practice")]
    pub practice: String,
    #[serde(rename = "Score")]
    #[tabled(rename = "Score")]
    pub score: String,
    #[serde(rename = "Band")]
    #[tabled(rename = "Band")]
    pub band: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct RecommendationRow {
    #[serde(rename = "Order")]
    #[tabled(rename = "Order")]
    pub order: usize,
    #[serde(rename = "Priority")]
    #[tabled(rename = "Priority")]
    pub priority: String,
    #[serde(rename = "Timeframe")]
    #[tabled(rename = "Timeframe")]
    pub timeframe: String,
    #[serde(rename = "Title")]
    #[tabled(rename = "Title")]
    pub title: String,
    #[serde(rename = "Impact")]
    #[tabled(rename = "Impact")]
    pub impact: String,
    #[serde(rename = "Audience")]
    #[tabled(rename = "Audience")]
    pub audience: String,
    #[serde(rename = "ProjectedUplift")]
    #[tabled(rename = "ProjectedUplift")]
    pub projected_uplift: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct SwotRow {
    #[serde(rename = "Quadrant")]
    #[tabled(rename = "Quadrant")]
    pub quadrant: String,
    #[serde(rename = "Item")]
    #[tabled(rename = "Item")]
    pub item: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct SeasonalTipRow {
    #[serde(rename = "Icon")]
    #[tabled(rename = "Icon")]
    pub icon: String,
    #[serde(rename = "Month")]
    #[tabled(rename = "Month")]
    pub month: String,
    #[serde(rename = "Tip")]
    #[tabled(rename = "Tip")]
    pub tip: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct TrendRow {
    #[serde(rename = "Month")]
    #[tabled(rename = "Month")]
    pub month: String,
    #[serde(rename = "You")]
    #[tabled(rename = "You")]
    pub you: String,
    #[serde(rename = "Competitor")]
    #[tabled(rename = "Competitor")]
    pub competitor: String,
    #[serde(rename = "Gap")]
    #[tabled(rename = "Gap")]
    pub gap: String,
    #[serde(rename = "CumulativeGap")]
    #[tabled(rename = "CumulativeGap")]
    pub cumulative_gap: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub competitor_advantages: usize,
    pub clinic_strengths: usize,
    pub patient_quotes: usize,
    pub positive_quotes: usize,
    pub recommendations: usize,
    pub high_priority_recommendations: usize,
    pub total_reviews_delta: Option<f64>,
    pub positive_rate_delta: Option<f64>,
    pub sentiment_delta_points: Option<i64>,
    pub market_rank: Option<usize>,
    pub market_size: Option<usize>,
    pub market_average_score: Option<f64>,
    pub above_market_average: Option<bool>,
}
