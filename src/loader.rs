use crate::error::{ReportError, ReportResult};
use crate::types::{MetricValue, ReviewAnalyticsData};
use std::path::Path;

/// What the loader saw while reading a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub competitor_advantages: usize,
    pub clinic_strengths: usize,
    pub patient_quotes: usize,
    pub employees: usize,
    pub recommendations: usize,
    pub seasonal_tips: usize,
    pub clamped_ratings: usize,
    pub out_of_range_employee_ratings: usize,
    pub unparsed_metrics: usize,
}

impl LoadReport {
    pub fn warnings(&self) -> usize {
        self.clamped_ratings + self.out_of_range_employee_ratings + self.unparsed_metrics
    }
}

pub fn load_analytics(path: &Path) -> ReportResult<(ReviewAnalyticsData, LoadReport)> {
    let raw = std::fs::read_to_string(path).map_err(|source| ReportError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    parse_analytics(&raw, &path.display().to_string())
}

/// Parse a payload and check the invariants the report relies on.
///
/// `origin` names the source in error messages.
pub fn parse_analytics(raw: &str, origin: &str) -> ReportResult<(ReviewAnalyticsData, LoadReport)> {
    let mut data: ReviewAnalyticsData =
        serde_json::from_str(raw).map_err(|source| ReportError::ParseInput {
            origin: origin.to_string(),
            source,
        })?;
    let report = validate(&mut data);
    tracing::debug!(?report, origin, "payload validated");
    Ok((data, report))
}

/// Clamp star ratings into 1..=5 and count everything that looks off.
fn validate(data: &mut ReviewAnalyticsData) -> LoadReport {
    let mut report = LoadReport::default();

    for advantage in &mut data.competitive_comparison.competitor_advantages {
        report.competitor_advantages += 1;
        let rating = &mut advantage.user_complaint.rating;
        if clamp_stars(rating) {
            report.clamped_ratings += 1;
            tracing::warn!(
                category = %advantage.category,
                rating = *rating,
                "complaint rating outside 1-5, clamped"
            );
        }
    }

    for strength in &mut data.clinic_strengths {
        report.clinic_strengths += 1;
        for feedback in &mut strength.patient_feedback {
            report.patient_quotes += 1;
            if clamp_stars(&mut feedback.stars) {
                report.clamped_ratings += 1;
                tracing::warn!(
                    category = %strength.category,
                    reviewer = %feedback.reviewer,
                    "feedback stars outside 1-5, clamped"
                );
            }
        }
    }

    for employee in &data.top_rated_employees {
        report.employees += 1;
        if !(0.0..=5.0).contains(&employee.rating) {
            report.out_of_range_employee_ratings += 1;
            tracing::warn!(name = %employee.name, rating = employee.rating, "employee rating outside 0-5");
        }
    }

    let metrics = &data.metrics;
    let values: [(&str, &MetricValue); 8] = [
        ("totalReviews", &metrics.total_reviews),
        ("totalReviewsCompetitor", &metrics.total_reviews_competitor),
        ("last12MonthsReviews", &metrics.last12_months_reviews),
        ("last12MonthsReviewsCompetitor", &metrics.last12_months_reviews_competitor),
        ("positiveReviews12Mo", &metrics.positive_reviews12_mo),
        ("positiveReviews12MoCompetitor", &metrics.positive_reviews12_mo_competitor),
        ("positiveRate", &metrics.positive_rate),
        ("positiveRateCompetitor", &metrics.positive_rate_competitor),
    ];
    for (field, value) in values {
        if value.as_f64().is_none() {
            report.unparsed_metrics += 1;
            tracing::warn!(field, value = %value, "metric has no numeric value");
        }
    }

    report.recommendations = data.marketing_recommendations.len();
    report.seasonal_tips = data.seasonal_tips.as_ref().map_or(0, Vec::len);
    report
}

/// Returns `true` if the value had to be moved into range.
fn clamp_stars(stars: &mut u8) -> bool {
    let clamped = (*stars).clamp(1, 5);
    let changed = clamped != *stars;
    *stars = clamped;
    changed
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    pub(crate) const SAMPLE: &str = include_str!("../data/review_analytics.json");

    pub(crate) fn sample() -> ReviewAnalyticsData {
        parse_analytics(SAMPLE, "sample").unwrap().0
    }

    #[test]
    fn loads_sample_payload() {
        let (data, report) = parse_analytics(SAMPLE, "sample").unwrap();
        assert_eq!(report.competitor_advantages, 4);
        assert_eq!(report.clinic_strengths, 3);
        assert_eq!(report.patient_quotes, 5);
        assert_eq!(report.employees, 3);
        assert_eq!(report.recommendations, 5);
        assert_eq!(report.seasonal_tips, 2);
        assert_eq!(report.warnings(), 0);
        assert_eq!(data.metrics.competitors.len(), 5);
        assert_eq!(data.metrics.positive_rate, MetricValue::Text("99%".into()));
        assert!(data.marketing_score.is_some());
    }

    #[test]
    fn clamps_out_of_range_stars() {
        let mut data = sample();
        data.clinic_strengths[0].patient_feedback[0].stars = 9;
        data.competitive_comparison.competitor_advantages[0]
            .user_complaint
            .rating = 0;
        let report = validate(&mut data);
        assert_eq!(report.clamped_ratings, 2);
        assert_eq!(data.clinic_strengths[0].patient_feedback[0].stars, 5);
        assert_eq!(
            data.competitive_comparison.competitor_advantages[0]
                .user_complaint
                .rating,
            1
        );
    }

    #[test]
    fn counts_unparsable_metrics() {
        let mut data = sample();
        data.metrics.positive_rate = MetricValue::Text("unknown".into());
        data.top_rated_employees[0].rating = 7.5;
        let report = validate(&mut data);
        assert_eq!(report.unparsed_metrics, 1);
        assert_eq!(report.out_of_range_employee_ratings, 1);
        assert_eq!(report.warnings(), 2);
    }

    #[test]
    fn optional_sections_may_be_absent() {
        let mut value: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
        let obj = value.as_object_mut().unwrap();
        obj.remove("seasonalTips");
        obj.remove("marketingScore");
        obj.remove("marketingRecommendations");
        let (data, report) = parse_analytics(&value.to_string(), "trimmed").unwrap();
        assert!(data.seasonal_tips.is_none());
        assert!(data.marketing_score.is_none());
        assert!(data.marketing_recommendations.is_empty());
        assert_eq!(report.seasonal_tips, 0);
    }

    #[test]
    fn unknown_priority_is_a_parse_error() {
        let broken = SAMPLE.replacen("\"priority\": \"high\"", "\"priority\": \"urgent\"", 1);
        let err = parse_analytics(&broken, "broken").unwrap_err();
        assert!(matches!(err, ReportError::ParseInput { .. }));
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let (data, _) = load_analytics(file.path()).unwrap();
        assert_eq!(data.swot_analysis.threats.len(), 3);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_analytics(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ReportError::ReadInput { .. }));
    }
}
