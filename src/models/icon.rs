/// Local condition icon shown in the main panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionIcon {
    Clear,
    Cloud,
    Drizzle,
    Rain,
    Snow,
}

/// Provider condition codes (day and night variants) and the icon each maps to.
pub const ICON_CODES: &[(&str, ConditionIcon)] = &[
    ("01d", ConditionIcon::Clear),
    ("01n", ConditionIcon::Clear),
    ("02d", ConditionIcon::Cloud),
    ("02n", ConditionIcon::Cloud),
    ("03d", ConditionIcon::Cloud),
    ("03n", ConditionIcon::Cloud),
    ("04d", ConditionIcon::Drizzle),
    ("04n", ConditionIcon::Drizzle),
    ("09d", ConditionIcon::Rain),
    ("09n", ConditionIcon::Rain),
    ("10d", ConditionIcon::Rain),
    ("10n", ConditionIcon::Rain),
    ("13d", ConditionIcon::Snow),
    ("13n", ConditionIcon::Snow),
];

/// Used when neither reported code is in [`ICON_CODES`].
pub const DEFAULT_ICON: ConditionIcon = ConditionIcon::Clear;

impl ConditionIcon {
    /// Look up a single provider code.
    pub fn from_code(code: &str) -> Option<Self> {
        ICON_CODES
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, icon)| *icon)
    }

    pub fn asset_path(&self) -> &'static str {
        match self {
            ConditionIcon::Clear => "./clear.png",
            ConditionIcon::Cloud => "./cloud.png",
            ConditionIcon::Drizzle => "./drizzle.png",
            ConditionIcon::Rain => "./rain.png",
            ConditionIcon::Snow => "./snow.png",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConditionIcon::Clear => "Clear",
            ConditionIcon::Cloud => "Cloudy",
            ConditionIcon::Drizzle => "Drizzle",
            ConditionIcon::Rain => "Rain",
            ConditionIcon::Snow => "Snow",
        }
    }

    /// Five-line ASCII art, each line the same width.
    pub fn art(&self) -> [&'static str; 5] {
        match self {
            ConditionIcon::Clear => [
                r"   \   /   ",
                r"    .-.    ",
                r" - (   ) - ",
                r"    `-'    ",
                r"   /   \   ",
            ],
            ConditionIcon::Cloud => [
                r"           ",
                r"    .--.   ",
                r" .-(    ). ",
                r"(___.__)__)",
                r"           ",
            ],
            ConditionIcon::Drizzle => [
                r"    .--.   ",
                r" .-(    ). ",
                r"(___.__)__)",
                r"  ' ' ' '  ",
                r"           ",
            ],
            ConditionIcon::Rain => [
                r"    .--.   ",
                r" .-(    ). ",
                r"(___.__)__)",
                r"  / / / /  ",
                r"  / / / /  ",
            ],
            ConditionIcon::Snow => [
                r"    .--.   ",
                r" .-(    ). ",
                r"(___.__)__)",
                r"  *  *  *  ",
                r" *  *  *   ",
            ],
        }
    }
}

/// Resolve the icon for a provider report: the primary code if mapped,
/// then the secondary code, then [`DEFAULT_ICON`].
pub fn resolve_icon<S: AsRef<str>>(codes: &[S]) -> ConditionIcon {
    codes
        .iter()
        .take(2)
        .find_map(|code| ConditionIcon::from_code(code.as_ref()))
        .unwrap_or(DEFAULT_ICON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mapped_code_resolves_to_its_entry() {
        for (code, icon) in ICON_CODES {
            assert_eq!(resolve_icon(&[*code]), *icon);
            assert_eq!(ConditionIcon::from_code(code), Some(*icon));
        }
    }

    #[test]
    fn unmapped_codes_fall_back_to_clear() {
        assert_eq!(resolve_icon(&["11d"]), ConditionIcon::Clear);
        assert_eq!(resolve_icon(&["50n", "11d"]), ConditionIcon::Clear);
        assert_eq!(resolve_icon::<&str>(&[]), ConditionIcon::Clear);
        assert_eq!(resolve_icon(&["zz"]).asset_path(), "./clear.png");
    }

    #[test]
    fn secondary_code_used_when_primary_unmapped() {
        assert_eq!(resolve_icon(&["50d", "10n"]), ConditionIcon::Rain);
    }

    #[test]
    fn primary_code_wins_over_secondary() {
        assert_eq!(resolve_icon(&["13d", "10n"]), ConditionIcon::Snow);
    }

    #[test]
    fn only_first_two_codes_are_considered() {
        assert_eq!(resolve_icon(&["50d", "11d", "13d"]), DEFAULT_ICON);
    }

    #[test]
    fn asset_path_per_icon() {
        assert_eq!(ConditionIcon::Cloud.asset_path(), "./cloud.png");
        assert_eq!(ConditionIcon::Drizzle.asset_path(), "./drizzle.png");
        assert_eq!(ConditionIcon::Rain.asset_path(), "./rain.png");
        assert_eq!(ConditionIcon::Snow.asset_path(), "./snow.png");
    }
}
