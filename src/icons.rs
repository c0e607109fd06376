// Category icons.
//
// The API sends free-form icon keys and category names. Both resolve to a
// closed set of icons here; anything unrecognized falls back to a default
// glyph instead of failing.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryIcon {
    Shield,
    Receipt,
    Comfort,
    Clock,
    UserCheck,
    Star,
    Smile,
    Calendar,
    Heart,
    Stethoscope,
    Team,
    Sparkles,
    Gentle,
    Dollar,
    Microscope,
    Baby,
    Siren,
    MapPin,
    Chat,
    Award,
    Pin,
}

impl CategoryIcon {
    /// Resolve a raw icon key from the payload.
    pub fn from_key(key: &str) -> Option<Self> {
        let icon = match key.trim() {
            "shield-alert" | "shield" => CategoryIcon::Shield,
            "receipt" => CategoryIcon::Receipt,
            "heart" => CategoryIcon::Heart,
            "clock" => CategoryIcon::Clock,
            "user-check" => CategoryIcon::UserCheck,
            "star" => CategoryIcon::Star,
            "smile" => CategoryIcon::Smile,
            "calendar" => CategoryIcon::Calendar,
            _ => return None,
        };
        Some(icon)
    }

    /// Icon for a competitor advantage: the icon key wins, then the known
    /// category names, then the default pin.
    pub fn for_advantage(icon_key: &str, category: &str) -> Self {
        if let Some(icon) = Self::from_key(icon_key) {
            // Advantage cards show the anxiety category with the comfort glyph
            // even though the key says "heart".
            return match icon {
                CategoryIcon::Heart => CategoryIcon::Comfort,
                other => other,
            };
        }
        match category {
            "Overtreatment Concerns / Trust" => CategoryIcon::Shield,
            "Billing & Insurance Transparency" => CategoryIcon::Receipt,
            "Dentist Anxiety & Emotional Comfort" => CategoryIcon::Comfort,
            "Wait Times & Scheduling" => CategoryIcon::Clock,
            _ => CategoryIcon::Pin,
        }
    }

    /// Icon for a clinic strength, picked by keywords in the category name.
    /// First match wins; then the icon key; the default is the award ribbon.
    pub fn for_strength(category: &str, icon_key: &str) -> Self {
        const RULES: &[(&[&str], CategoryIcon)] = &[
            (&["chairside", "manner", "bedside"], CategoryIcon::Heart),
            (&["quality", "dental work", "procedure"], CategoryIcon::Stethoscope),
            (&["friendly", "staff", "team"], CategoryIcon::Team),
            (&["clean", "hygiene", "sanit"], CategoryIcon::Sparkles),
            (&["wait", "time", "punctual"], CategoryIcon::Clock),
            (&["pain", "comfort", "gentle"], CategoryIcon::Gentle),
            (&["price", "billing", "afford"], CategoryIcon::Dollar),
            (&["technology", "modern", "equipment"], CategoryIcon::Microscope),
            (&["child", "kid", "pediatric"], CategoryIcon::Baby),
            (&["emergency", "urgent"], CategoryIcon::Siren),
            (&["location", "parking", "access"], CategoryIcon::MapPin),
            (&["communication", "explain"], CategoryIcon::Chat),
        ];
        let cat = category.to_lowercase();
        RULES
            .iter()
            .find(|(needles, _)| needles.iter().any(|n| cat.contains(n)))
            .map(|(_, icon)| *icon)
            .or_else(|| Self::from_key(icon_key))
            .unwrap_or(CategoryIcon::Award)
    }

    /// Icon for a seasonal tip; tips without a usable key get the calendar.
    pub fn for_seasonal_tip(icon_key: Option<&str>) -> Self {
        icon_key
            .and_then(Self::from_key)
            .unwrap_or(CategoryIcon::Calendar)
    }

    pub fn glyph(self) -> &'static str {
        match self {
            CategoryIcon::Shield => "🛡️",
            CategoryIcon::Receipt => "💳",
            CategoryIcon::Comfort => "💆",
            CategoryIcon::Clock => "⏰",
            CategoryIcon::UserCheck => "👤",
            CategoryIcon::Star => "⭐",
            CategoryIcon::Smile => "😊",
            CategoryIcon::Calendar => "📅",
            CategoryIcon::Heart => "❤️",
            CategoryIcon::Stethoscope => "🩺",
            CategoryIcon::Team => "👥",
            CategoryIcon::Sparkles => "✨",
            CategoryIcon::Gentle => "🤲",
            CategoryIcon::Dollar => "💲",
            CategoryIcon::Microscope => "🔬",
            CategoryIcon::Baby => "👶",
            CategoryIcon::Siren => "🚨",
            CategoryIcon::MapPin => "📍",
            CategoryIcon::Chat => "💬",
            CategoryIcon::Award => "🏅",
            CategoryIcon::Pin => "📌",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("shield-alert", "anything", CategoryIcon::Shield)]
    #[case("heart", "Dentist Anxiety & Emotional Comfort", CategoryIcon::Comfort)]
    #[case("unknown", "Wait Times & Scheduling", CategoryIcon::Clock)]
    #[case("unknown", "Parking", CategoryIcon::Pin)]
    #[case("", "", CategoryIcon::Pin)]
    fn resolves_advantage_icons(
        #[case] key: &str,
        #[case] category: &str,
        #[case] expected: CategoryIcon,
    ) {
        assert_eq!(CategoryIcon::for_advantage(key, category), expected);
    }

    #[rstest]
    #[case("Dentist Chairside Manner", "user-check", CategoryIcon::Heart)]
    #[case("Quality of Dental Work", "star", CategoryIcon::Stethoscope)]
    #[case("Friendly Staff", "smile", CategoryIcon::Team)]
    #[case("Short Wait Times", "", CategoryIcon::Clock)]
    #[case("Kid-Friendly Care", "", CategoryIcon::Team)]
    #[case("Something Else Entirely", "smile", CategoryIcon::Smile)]
    #[case("Something Else Entirely", "mystery", CategoryIcon::Award)]
    fn resolves_strength_icons(
        #[case] category: &str,
        #[case] key: &str,
        #[case] expected: CategoryIcon,
    ) {
        assert_eq!(CategoryIcon::for_strength(category, key), expected);
    }

    #[test]
    fn seasonal_tip_defaults_to_calendar() {
        assert_eq!(CategoryIcon::for_seasonal_tip(None), CategoryIcon::Calendar);
        assert_eq!(CategoryIcon::for_seasonal_tip(Some("mystery")), CategoryIcon::Calendar);
        assert_eq!(CategoryIcon::for_seasonal_tip(Some("heart")), CategoryIcon::Heart);
    }
}
