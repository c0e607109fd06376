use crate::icons::CategoryIcon;
use crate::insights::{
    review_age, sort_recommendations, Delta, MarketPosition, MetricKind, PriorityTier,
    ScoreBand, SentimentBreakdown, TimeAgoStyle,
};
use crate::projection::{advantage_impact, recommendation_impact};
use crate::types::{
    ClinicStrength, CompetitiveComparison, EmployeeRow, ImprovementRow, ImprovingTrend,
    MarketRankRow, MarketSnapshot, MarketingRecommendation, MarketingScore, MetricRow,
    MetricValue, Priority, RecommendationRow, ReviewAnalyticsData, ReviewMetrics,
    ScoreboardRow, SeasonalTip, SeasonalTipRow, Sentiment, StrengthRow, SummaryStats,
    SwotAnalysis, SwotRow, TopRatedEmployee, TrendRow,
};
use crate::util::{
    format_int, format_number, format_plain, praise_blurb, progress_bar, star_bar,
};
use chrono::NaiveDate;

/// Areas for improvement, in payload order. Rank is the 1-based position.
pub fn build_improvements(comparison: &CompetitiveComparison) -> Vec<ImprovementRow> {
    comparison
        .competitor_advantages
        .iter()
        .enumerate()
        .map(|(idx, a)| {
            let rank = idx + 1;
            ImprovementRow {
                rank,
                icon: CategoryIcon::for_advantage(&a.icon, &a.category)
                    .glyph()
                    .to_string(),
                category: a.category.clone(),
                tier: PriorityTier::from_rank(rank).label().to_string(),
                priority: a.competitor_quote.priority.label().to_string(),
                patient_rating: star_bar(a.user_complaint.rating),
                competitor: a.competitor_quote.competitor_name.clone(),
                recommendation: a.competitor_quote.recommendation.clone(),
                projected_uplift: advantage_impact(&a.category, rank).label(),
            }
        })
        .collect()
}

/// Quick-access chips shown above the improvement cards: the first four.
pub fn quick_access_chips(comparison: &CompetitiveComparison) -> Vec<String> {
    comparison
        .competitor_advantages
        .iter()
        .take(4)
        .map(|a| {
            format!(
                "{} {}",
                CategoryIcon::for_advantage(&a.icon, &a.category).glyph(),
                a.category
            )
        })
        .collect()
}

/// One row per strength, showing its first patient quote.
pub fn build_strengths(
    strengths: &[ClinicStrength],
    today: NaiveDate,
    style: TimeAgoStyle,
) -> Vec<StrengthRow> {
    strengths
        .iter()
        .map(|s| {
            let first = s.patient_feedback.first();
            StrengthRow {
                icon: CategoryIcon::for_strength(&s.category, &s.icon).glyph().to_string(),
                category: s.category.clone(),
                reviews: s.patient_feedback.len(),
                quote: first.map(|f| f.quote.clone()).unwrap_or_default(),
                stars: first.map(|f| star_bar(f.stars)).unwrap_or_default(),
                reviewer: first.map(|f| f.reviewer.clone()).unwrap_or_default(),
                when: first
                    .map(|f| review_age(&f.date, today, style))
                    .unwrap_or_default(),
            }
        })
        .collect()
}

pub fn build_employees(employees: &[TopRatedEmployee]) -> Vec<EmployeeRow> {
    employees
        .iter()
        .map(|e| EmployeeRow {
            name: e.name.clone(),
            description: praise_blurb(&e.top_praise_keywords),
            // Partially filled stars do not exist; a 4.9 average shows four.
            stars: star_bar(e.rating.clamp(0.0, 5.0).floor() as u8),
            rating: format_number(e.rating, 1),
            mentions: format_int(e.mention_count),
        })
        .collect()
}

fn metric_row(title: &str, yours: &MetricValue, theirs: &MetricValue, kind: MetricKind) -> MetricRow {
    let delta = Delta::from_values(yours, theirs);
    MetricRow {
        metric: title.to_string(),
        you: yours.to_string(),
        competitor: theirs.to_string(),
        status: delta
            .map(|d| d.status.label().to_string())
            .unwrap_or_else(|| "n/a".to_string()),
        difference: delta
            .map(|d| d.describe(kind))
            .unwrap_or_else(|| "n/a".to_string()),
        pct_of_competitor: delta
            .map(|d| format!("{}%", format_number(d.percent_of_competitor, 1)))
            .unwrap_or_else(|| "n/a".to_string()),
        bar: delta.map(|d| progress_bar(d.bar_percent(), 10)).unwrap_or_default(),
    }
}

/// The four headline you-vs-top-competitor metrics.
pub fn build_metrics(metrics: &ReviewMetrics) -> Vec<MetricRow> {
    vec![
        metric_row(
            "Total Reviews",
            &metrics.total_reviews,
            &metrics.total_reviews_competitor,
            MetricKind::Count,
        ),
        metric_row(
            "Last 12 Mo",
            &metrics.last12_months_reviews,
            &metrics.last12_months_reviews_competitor,
            MetricKind::Count,
        ),
        metric_row(
            "Positive (12 Mo)",
            &metrics.positive_reviews12_mo,
            &metrics.positive_reviews12_mo_competitor,
            MetricKind::Count,
        ),
        metric_row(
            "Positive Rate",
            &metrics.positive_rate,
            &metrics.positive_rate_competitor,
            MetricKind::Percentage,
        ),
    ]
}

/// Positive share of last-12-month reviews, you vs the top competitor.
/// `None` when any input has no numeric value.
pub fn build_sentiment(metrics: &ReviewMetrics) -> Option<SentimentBreakdown> {
    Some(SentimentBreakdown::new(
        metrics.positive_reviews12_mo.as_f64()?,
        metrics.last12_months_reviews.as_f64()?,
        metrics.positive_reviews12_mo_competitor.as_f64()?,
        metrics.last12_months_reviews_competitor.as_f64()?,
    ))
}

fn snapshot_name(snapshot: &MarketSnapshot, fallback: &str) -> String {
    snapshot
        .name
        .clone()
        .unwrap_or_else(|| fallback.to_string())
}

/// Market position per metric across every practice in the breakdown.
/// Empty when the payload carries no per-practice breakdown.
pub fn build_market_ranks(metrics: &ReviewMetrics) -> Vec<MarketRankRow> {
    let Some(you) = metrics.you.as_ref() else {
        return Vec::new();
    };
    type Pick = fn(&MarketSnapshot) -> Option<f64>;
    let charts: [(&str, Pick, &str); 4] = [
        ("Total Reviews", |s| Some(s.total_reviews), ""),
        ("Last 12 Mo", |s| Some(s.last12_months_reviews), ""),
        ("Positive (12 Mo)", |s| Some(s.positive_reviews12_mo), ""),
        ("Positive Rate", |s| s.positive_rate.as_f64(), "%"),
    ];

    let your_name = snapshot_name(you, "You");
    let mut rows = Vec::new();
    for (title, pick, suffix) in charts {
        let Some(yours) = pick(you) else {
            continue;
        };
        let competitors: Vec<(String, f64)> = metrics
            .competitors
            .iter()
            .enumerate()
            .filter_map(|(idx, c)| {
                pick(c).map(|v| (snapshot_name(c, &format!("Competitor {}", idx + 1)), v))
            })
            .collect();
        let position = MarketPosition::rank(&your_name, yours, &competitors);
        let badge = if position.is_first() {
            "#1".to_string()
        } else {
            format!("#{} of {}", position.rank, position.size())
        };
        let standing = if position.is_first() {
            "Leading"
        } else if position.is_last() {
            "Trailing"
        } else {
            "Mid-pack"
        };
        let leader = position
            .standings
            .first()
            .map(|s| format!("{} ({}{})", s.name, format_plain(s.score), suffix))
            .unwrap_or_default();
        rows.push(MarketRankRow {
            metric: title.to_string(),
            your_value: format!("{}{}", format_plain(yours), suffix),
            badge,
            leader,
            standing: standing.to_string(),
        });
    }
    rows
}

/// Marketing score card: overall position plus the top five standings.
pub fn build_scoreboard(score: &MarketingScore) -> (MarketPosition, Vec<ScoreboardRow>) {
    let competitors: Vec<(String, f64)> = score
        .competitors
        .iter()
        .map(|c| (c.name.clone(), c.score))
        .collect();
    let position = MarketPosition::rank("You", score.you, &competitors);
    let rows = position
        .standings
        .iter()
        .take(5)
        .enumerate()
        .map(|(idx, s)| ScoreboardRow {
            position: idx + 1,
            practice: s.name.clone(),
            score: format_plain(s.score),
            band: ScoreBand::of(s.score).label().to_string(),
        })
        .collect();
    (position, rows)
}

pub fn build_recommendations(recs: &[MarketingRecommendation]) -> Vec<RecommendationRow> {
    sort_recommendations(recs)
        .into_iter()
        .enumerate()
        .map(|(idx, r)| RecommendationRow {
            order: idx + 1,
            priority: format!("{} Priority", r.priority.label()),
            timeframe: r.timeframe.label().to_string(),
            title: r.title.clone(),
            impact: r.impact.clone(),
            audience: r.audience.clone(),
            projected_uplift: recommendation_impact(r).label(),
        })
        .collect()
}

/// SWOT items flattened quadrant by quadrant; empty quadrants add nothing.
pub fn build_swot(swot: &SwotAnalysis) -> Vec<SwotRow> {
    let quadrants: [(&str, &[String]); 4] = [
        ("Strengths", &swot.strengths),
        ("Weaknesses", &swot.weaknesses),
        ("Opportunities", &swot.opportunities),
        ("Threats", &swot.threats),
    ];
    quadrants
        .into_iter()
        .flat_map(|(quadrant, items)| {
            items.iter().map(move |item| SwotRow {
                quadrant: quadrant.to_string(),
                item: item.clone(),
            })
        })
        .collect()
}

pub fn build_seasonal_tips(tips: Option<&[SeasonalTip]>) -> Vec<SeasonalTipRow> {
    tips.unwrap_or_default()
        .iter()
        .map(|t| SeasonalTipRow {
            icon: CategoryIcon::for_seasonal_tip(t.icon.as_deref())
                .glyph()
                .to_string(),
            month: t.month.clone(),
            tip: t.tip.clone(),
        })
        .collect()
}

/// Month-by-month review counts with the running gap to the competitor.
pub fn build_trend(trend: &ImprovingTrend) -> Vec<TrendRow> {
    let mut cumulative = 0.0;
    trend
        .monthly_data
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|p| {
            let gap = p.you - p.competitor;
            cumulative += gap;
            TrendRow {
                month: p.month.clone(),
                you: format_plain(p.you),
                competitor: format_plain(p.competitor),
                gap: signed(gap),
                cumulative_gap: signed(cumulative),
            }
        })
        .collect()
}

fn signed(n: f64) -> String {
    if n > 0.0 {
        format!("+{}", format_plain(n))
    } else {
        format_plain(n)
    }
}

pub fn generate_summary(data: &ReviewAnalyticsData) -> SummaryStats {
    let metrics = &data.metrics;
    let total_delta = Delta::from_values(&metrics.total_reviews, &metrics.total_reviews_competitor);
    let rate_delta = Delta::from_values(&metrics.positive_rate, &metrics.positive_rate_competitor);
    let sentiment = build_sentiment(metrics);
    let position = data.marketing_score.as_ref().map(|s| build_scoreboard(s).0);
    SummaryStats {
        competitor_advantages: data.competitive_comparison.competitor_advantages.len(),
        clinic_strengths: data.clinic_strengths.len(),
        patient_quotes: data
            .clinic_strengths
            .iter()
            .map(|s| s.patient_feedback.len())
            .sum(),
        positive_quotes: data
            .clinic_strengths
            .iter()
            .flat_map(|s| &s.patient_feedback)
            .filter(|f| f.sentiment == Sentiment::Positive)
            .count(),
        recommendations: data.marketing_recommendations.len(),
        high_priority_recommendations: data
            .marketing_recommendations
            .iter()
            .filter(|r| r.priority == Priority::High)
            .count(),
        total_reviews_delta: total_delta.map(|d| d.difference),
        positive_rate_delta: rate_delta.map(|d| d.difference),
        sentiment_delta_points: sentiment.map(|s| s.difference()),
        market_rank: position.as_ref().map(|p| p.rank),
        market_size: position.as_ref().map(|p| p.size()),
        market_average_score: position.as_ref().map(|p| p.average),
        above_market_average: position.as_ref().map(|p| p.above_average),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::tests::sample;
    use crate::types::MonthlyTrendPoint;

    #[test]
    fn improvements_follow_payload_order_with_tiers() {
        let rows = build_improvements(&sample().competitive_comparison);
        let tiers: Vec<&str> = rows.iter().map(|r| r.tier.as_str()).collect();
        assert_eq!(
            tiers,
            vec!["Important", "Needs Improvement", "Needs Improvement", "Consider"]
        );
        assert_eq!(rows[3].category, "Wait Times & Scheduling");
        assert_eq!(rows[3].icon, "⏰");
        assert_eq!(rows[3].projected_uplift, "+5-13%");
        assert_eq!(rows[0].patient_rating, "★☆☆☆☆");
    }

    #[test]
    fn chips_stop_at_four() {
        let mut comparison = sample().competitive_comparison;
        let extra = comparison.competitor_advantages[0].clone();
        comparison.competitor_advantages.push(extra);
        assert_eq!(quick_access_chips(&comparison).len(), 4);
        assert_eq!(build_improvements(&comparison).len(), 5);
    }

    #[test]
    fn strengths_use_first_quote_and_relative_date() {
        let data = sample();
        let today = NaiveDate::from_ymd_opt(2025, 1, 19).unwrap();
        let rows = build_strengths(&data.clinic_strengths, today, TimeAgoStyle::Natural);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].reviewer, "Robert Schemitsch");
        assert_eq!(rows[0].when, "1 week ago");
        assert_eq!(rows[0].reviews, 2);
        assert_eq!(rows[1].icon, "🩺");
    }

    #[test]
    fn strength_without_feedback_renders_blank_quote() {
        let mut strengths = sample().clinic_strengths;
        strengths[0].patient_feedback.clear();
        let today = NaiveDate::from_ymd_opt(2025, 1, 19).unwrap();
        let rows = build_strengths(&strengths, today, TimeAgoStyle::Plain);
        assert_eq!(rows[0].reviews, 0);
        assert!(rows[0].quote.is_empty());
    }

    #[test]
    fn employees_get_blurbs_and_floored_stars() {
        let rows = build_employees(&sample().top_rated_employees);
        assert_eq!(rows[0].description, "Known for being thorough and patient.");
        assert_eq!(rows[0].stars, "★★★★☆");
        assert_eq!(rows[0].rating, "4.9");
    }

    #[test]
    fn headline_metrics_compare_you_to_competitor() {
        let rows = build_metrics(&sample().metrics);
        assert_eq!(rows[0].difference, "266 to catch up");
        assert_eq!(rows[0].status, "Behind");
        assert_eq!(rows[3].you, "99%");
        assert_eq!(rows[3].difference, "Ahead by 6%");
        assert_eq!(rows[3].pct_of_competitor, "106.5%");
        assert_eq!(rows[3].bar, "██████████");
        assert_eq!(rows[0].bar, "███████░░░");
    }

    #[test]
    fn unparsable_metric_renders_not_available() {
        let mut metrics = sample().metrics;
        metrics.positive_rate = MetricValue::Text("pending".into());
        let rows = build_metrics(&metrics);
        assert_eq!(rows[3].status, "n/a");
        assert_eq!(rows[3].difference, "n/a");
    }

    #[test]
    fn sentiment_from_sample() {
        let breakdown = build_sentiment(&sample().metrics).unwrap();
        assert_eq!(breakdown.badge(), "+6%");
    }

    #[test]
    fn market_ranks_cover_each_metric() {
        let rows = build_market_ranks(&sample().metrics);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].badge, "#5 of 6");
        assert_eq!(rows[0].leader, "Smile Dental Care (771)");
        assert_eq!(rows[3].badge, "#1");
        assert_eq!(rows[3].standing, "Leading");
    }

    #[test]
    fn market_ranks_need_a_breakdown() {
        let mut metrics = sample().metrics;
        metrics.you = None;
        assert!(build_market_ranks(&metrics).is_empty());
    }

    #[test]
    fn scoreboard_shows_top_five() {
        let score = sample().marketing_score.unwrap();
        let (position, rows) = build_scoreboard(&score);
        assert_eq!(position.rank, 4);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].practice, "Gentle Dentistry");
        assert_eq!(rows[0].band, "Strong");
        assert_eq!(rows[3].practice, "You");
        assert_eq!(rows[3].band, "Moderate");
    }

    #[test]
    fn recommendations_sorted_by_priority() {
        let rows = build_recommendations(&sample().marketing_recommendations);
        let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Enhance Online Review Strategy",
                "Launch Trust-Building Campaign",
                "Implement Anxiety-Friendly Protocol",
                "Price Transparency Initiative",
                "Community Outreach Program",
            ]
        );
        assert_eq!(rows[4].timeframe, "6-12 months");
        assert_eq!(rows[0].priority, "High Priority");
    }

    #[test]
    fn swot_skips_empty_quadrants() {
        let swot = SwotAnalysis {
            strengths: vec!["a".into()],
            threats: vec!["b".into(), "c".into()],
            ..SwotAnalysis::default()
        };
        let rows = build_swot(&swot);
        let quadrants: Vec<&str> = rows.iter().map(|r| r.quadrant.as_str()).collect();
        assert_eq!(quadrants, vec!["Strengths", "Threats", "Threats"]);
    }

    #[test]
    fn seasonal_tips_are_optional() {
        assert!(build_seasonal_tips(None).is_empty());
        let data = sample();
        let rows = build_seasonal_tips(data.seasonal_tips.as_deref());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].icon, "📅");
    }

    #[test]
    fn trend_tracks_running_gap() {
        let trend = ImprovingTrend {
            message: String::new(),
            behind_by: String::new(),
            percentile: String::new(),
            monthly_data: Some(vec![
                MonthlyTrendPoint { month: "Feb".into(), you: 10.0, competitor: 8.0 },
                MonthlyTrendPoint { month: "Mar".into(), you: 4.0, competitor: 6.0 },
                MonthlyTrendPoint { month: "Apr".into(), you: 8.0, competitor: 11.0 },
            ]),
        };
        let rows = build_trend(&trend);
        let gaps: Vec<&str> = rows.iter().map(|r| r.cumulative_gap.as_str()).collect();
        assert_eq!(gaps, vec!["+2", "0", "-3"]);
        assert_eq!(rows[2].gap, "-3");
    }

    #[test]
    fn trend_without_monthly_data_is_empty() {
        let mut trend = sample().improving_trend;
        trend.monthly_data = None;
        assert!(build_trend(&trend).is_empty());
    }

    #[test]
    fn summary_rolls_up_sample() {
        let summary = generate_summary(&sample());
        assert_eq!(summary.competitor_advantages, 4);
        assert_eq!(summary.patient_quotes, 5);
        assert_eq!(summary.positive_quotes, 5);
        assert_eq!(summary.high_priority_recommendations, 2);
        assert_eq!(summary.total_reviews_delta, Some(-266.0));
        assert_eq!(summary.positive_rate_delta, Some(6.0));
        assert_eq!(summary.sentiment_delta_points, Some(6));
        assert_eq!(summary.market_rank, Some(4));
        assert_eq!(summary.market_size, Some(6));
        assert_eq!(summary.above_market_average, Some(false));
    }
}
