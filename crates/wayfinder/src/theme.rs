//! Base-layer theme selection, persisted across sessions.

/// The three tile themes the viewer ships, cycled in a fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapTheme {
    #[default]
    Streets,
    Dark,
    Satellite,
}

impl MapTheme {
    /// The next theme in the cycle: streets, dark, satellite, streets.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Streets => Self::Dark,
            Self::Dark => Self::Satellite,
            Self::Satellite => Self::Streets,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Streets => "streets",
            Self::Dark => "dark",
            Self::Satellite => "satellite",
        }
    }

    /// Parse a persisted theme name; anything unrecognized is the default.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "dark" => Self::Dark,
            "satellite" => Self::Satellite,
            _ => Self::Streets,
        }
    }

    /// The notice shown when switching to this theme.
    #[must_use]
    pub fn switch_notice(self) -> &'static str {
        match self {
            Self::Streets => "Switched to Streets view",
            Self::Dark => "Switched to Dark theme",
            Self::Satellite => "Switched to Satellite view",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_order_is_fixed() {
        assert_eq!(MapTheme::Streets.next(), MapTheme::Dark);
        assert_eq!(MapTheme::Dark.next(), MapTheme::Satellite);
        assert_eq!(MapTheme::Satellite.next(), MapTheme::Streets);
    }

    #[test]
    fn parse_round_trips_and_defaults() {
        for theme in [MapTheme::Streets, MapTheme::Dark, MapTheme::Satellite] {
            assert_eq!(MapTheme::parse(theme.as_str()), theme);
        }
        assert_eq!(MapTheme::parse("sepia"), MapTheme::Streets);
        assert_eq!(MapTheme::parse(""), MapTheme::Streets);
    }
}
