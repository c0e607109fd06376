// Deterministic spread for projected impact ranges.
//
// Each item gets a fixed jitter derived from a hash of its text, so the same
// payload always renders the same ranges without a random number generator.
use crate::insights::PriorityTier;
use crate::types::{MarketingRecommendation, Priority};

/// 32-bit string hash: `h = h * 31 + c` over Unicode scalar values, wrapping.
pub fn text_hash(key: &str) -> u32 {
    key.chars()
        .fold(0u32, |h, c| h.wrapping_mul(31).wrapping_add(c as u32))
}

/// Jitter fraction in `[-0.10, 0.10]` in steps of 0.01.
pub fn jitter_fraction(key: &str) -> f64 {
    let bucket = (text_hash(key) % 21) as f64;
    (bucket - 10.0) / 100.0
}

/// A projected percentage uplift range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactRange {
    pub min: f64,
    pub max: f64,
}

impl ImpactRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.min * factor, self.max * factor)
    }

    pub fn jittered(self, key: &str) -> Self {
        self.scaled(1.0 + jitter_fraction(key))
    }

    /// Whole-number bounds for display.
    pub fn rounded(self) -> (i64, i64) {
        (self.min.round() as i64, self.max.round() as i64)
    }

    pub fn label(self) -> String {
        let (min, max) = self.rounded();
        format!("+{}-{}%", min, max)
    }
}

/// Base uplift for each tier of urgency.
pub fn base_range(tier: PriorityTier) -> ImpactRange {
    match tier {
        PriorityTier::Important => ImpactRange::new(20.0, 35.0),
        PriorityTier::NeedsImprovement => ImpactRange::new(10.0, 20.0),
        PriorityTier::Consider => ImpactRange::new(5.0, 12.0),
    }
}

/// Projection for a ranked competitor advantage, keyed by its category.
pub fn advantage_impact(category: &str, rank: usize) -> ImpactRange {
    base_range(PriorityTier::from_rank(rank)).jittered(category)
}

/// Projection for a marketing recommendation. The timeframe multiplier is
/// applied before the jitter.
pub fn recommendation_impact(rec: &MarketingRecommendation) -> ImpactRange {
    let tier = match rec.priority {
        Priority::High => PriorityTier::Important,
        Priority::Medium => PriorityTier::NeedsImprovement,
        Priority::Low => PriorityTier::Consider,
    };
    let key = format!("{}{}{}", rec.title, rec.impact, rec.audience);
    base_range(tier)
        .scaled(rec.timeframe.impact_multiplier())
        .jittered(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Timeframe;

    #[test]
    fn hash_matches_reference_values() {
        assert_eq!(text_hash(""), 0);
        assert_eq!(text_hash("a"), 97);
        assert_eq!(text_hash("Wait Times & Scheduling"), 1_861_289_235);
        assert_eq!(text_hash("Wait Times & Scheduling") % 21, 15);
    }

    #[test]
    fn jitter_is_stable_and_bounded() {
        let key = "Wait Times & Scheduling";
        let first = jitter_fraction(key);
        for _ in 0..10 {
            assert_eq!(jitter_fraction(key), first);
        }
        assert!((first - 0.05).abs() < 1e-12);
        assert!((jitter_fraction("") + 0.10).abs() < 1e-12);
        for key in ["x", "Billing & Insurance Transparency", "ünïcödé", "🦷"] {
            let j = jitter_fraction(key);
            assert!((-0.10..=0.10).contains(&j), "{key} -> {j}");
        }
    }

    #[test]
    fn advantage_projection_applies_tier_and_jitter() {
        // rank 4 -> Consider (5, 12); jitter +0.05
        let range = advantage_impact("Wait Times & Scheduling", 4);
        assert_eq!(range.rounded(), (5, 13));
        // rank 1 -> Important (20, 35); jitter -0.05
        let range = advantage_impact("Overtreatment Concerns / Trust", 1);
        assert_eq!(range.rounded(), (19, 33));
        assert_eq!(range.label(), "+19-33%");
    }

    #[test]
    fn recommendation_projection_dampens_long_term_work() {
        let mut rec = MarketingRecommendation {
            priority: Priority::Low,
            timeframe: Timeframe::ShortTerm,
            title: "Community Outreach Program".into(),
            description: String::new(),
            impact: "Long-term brand building".into(),
            audience: "Families".into(),
        };
        let short = recommendation_impact(&rec);
        rec.timeframe = Timeframe::LongTerm;
        let long = recommendation_impact(&rec);
        assert!((long.max - short.max * 0.8).abs() < 1e-9);
        assert_eq!(recommendation_impact(&rec), long);
    }
}
