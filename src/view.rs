// Interactive card state.
//
// Each card owns its own toggles: improvement cards expand and collapse,
// strength cards additionally page through their patient quotes.
use chrono::NaiveDate;

use crate::icons::CategoryIcon;
use crate::insights::{review_age, PriorityTier, TimeAgoStyle};
use crate::types::{ClinicStrength, CompetitorAdvantage};
use crate::util::star_bar;

/// Wrap-around cursor over `len` quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteCarousel {
    index: usize,
    len: usize,
}

impl QuoteCarousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn has_multiple(&self) -> bool {
        self.len > 1
    }

    pub fn next(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = if self.index + 1 >= self.len { 0 } else { self.index + 1 };
    }

    pub fn prev(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = if self.index == 0 { self.len - 1 } else { self.index - 1 };
    }

    /// "2/3"-style position marker.
    pub fn position(&self) -> String {
        format!("{}/{}", self.index + 1, self.len)
    }
}

pub struct ImprovementCard<'a> {
    advantage: &'a CompetitorAdvantage,
    rank: usize,
    expanded: bool,
}

impl<'a> ImprovementCard<'a> {
    pub fn new(advantage: &'a CompetitorAdvantage, rank: usize) -> Self {
        Self {
            advantage,
            rank,
            expanded: false,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn render(&self) -> String {
        let a = self.advantage;
        let icon = CategoryIcon::for_advantage(&a.icon, &a.category);
        let tier = PriorityTier::from_rank(self.rank);
        let marker = if self.is_expanded() { "▾" } else { "▸" };
        let mut out = format!(
            "{} #{} {} {} [{}]\n    {}",
            marker,
            self.rank,
            icon.glyph(),
            a.category,
            tier.label(),
            a.insight
        );
        if self.is_expanded() {
            let complaint = &a.user_complaint;
            let quote = &a.competitor_quote;
            out.push_str(&format!(
                "\n    Patient's experience: \"{}\"\n      {} {} • {}",
                complaint.quote,
                star_bar(complaint.rating),
                complaint.reviewer_name,
                complaint.review_date
            ));
            out.push_str(&format!(
                "\n    How {} does it: \"{}\"\n      {} {}",
                quote.competitor_name,
                quote.quote,
                star_bar(5),
                quote.review_date
            ));
            out.push_str(&format!("\n    Recommendation: {}", quote.recommendation));
        }
        out
    }
}

pub struct StrengthCard<'a> {
    strength: &'a ClinicStrength,
    expanded: bool,
    carousel: QuoteCarousel,
}

impl<'a> StrengthCard<'a> {
    pub fn new(strength: &'a ClinicStrength) -> Self {
        Self {
            strength,
            expanded: false,
            carousel: QuoteCarousel::new(strength.patient_feedback.len()),
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn next_quote(&mut self) {
        self.carousel.next();
    }

    pub fn prev_quote(&mut self) {
        self.carousel.prev();
    }

    pub fn render(&self, today: NaiveDate, style: TimeAgoStyle) -> String {
        let s = self.strength;
        let marker = if self.is_expanded() { "▾" } else { "▸" };
        let mut out = format!(
            "{} {} {} ({} reviews)\n    {}",
            marker,
            CategoryIcon::for_strength(&s.category, &s.icon).glyph(),
            s.category,
            s.patient_feedback.len(),
            s.description
        );
        if !self.is_expanded() {
            return out;
        }
        let Some(feedback) = s.patient_feedback.get(self.carousel.index()) else {
            return out;
        };
        out.push_str(&format!(
            "\n    What patients say: \"{}\"\n      {} {} • {}",
            feedback.quote,
            star_bar(feedback.stars),
            feedback.reviewer,
            review_age(&feedback.date, today, style)
        ));
        if self.carousel.has_multiple() {
            out.push_str(&format!("  [{}]", self.carousel.position()));
        }
        out
    }
}
