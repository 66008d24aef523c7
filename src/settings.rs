use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Per-word time limits offered to the user; zero means unlimited
pub const TIME_LIMITS: [u32; 7] = [10, 15, 20, 30, 45, 60, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TimeLimit(u32);

impl TimeLimit {
    pub const UNLIMITED: TimeLimit = TimeLimit(0);

    pub fn secs(self) -> u32 {
        self.0
    }

    pub fn is_unlimited(self) -> bool {
        self.0 == 0
    }

    /// Next option in the menu order, wrapping around
    pub fn cycle(self) -> Self {
        let pos = TIME_LIMITS.iter().position(|&s| s == self.0).unwrap_or(0);
        TimeLimit(TIME_LIMITS[(pos + 1) % TIME_LIMITS.len()])
    }
}

impl Default for TimeLimit {
    fn default() -> Self {
        TimeLimit(30)
    }
}

impl TryFrom<u32> for TimeLimit {
    type Error = ValidationError;

    fn try_from(secs: u32) -> Result<Self, Self::Error> {
        if TIME_LIMITS.contains(&secs) {
            Ok(TimeLimit(secs))
        } else {
            Err(ValidationError::TimeLimit(secs))
        }
    }
}

impl From<TimeLimit> for u32 {
    fn from(limit: TimeLimit) -> u32 {
        limit.0
    }
}

impl std::fmt::Display for TimeLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unlimited() {
            write!(f, "no limit")
        } else {
            write!(f, "{}s", self.0)
        }
    }
}

/// Cosmetic color scheme
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum VisualTheme {
    #[default]
    Default,
    Sunset,
    Ocean,
    Forest,
}

impl VisualTheme {
    pub fn cycle(self) -> Self {
        match self {
            VisualTheme::Default => VisualTheme::Sunset,
            VisualTheme::Sunset => VisualTheme::Ocean,
            VisualTheme::Ocean => VisualTheme::Forest,
            VisualTheme::Forest => VisualTheme::Default,
        }
    }
}

/// Presentation and pacing options. None of them change scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub sound_enabled: bool,
    pub animations_enabled: bool,
    pub visual_theme: VisualTheme,
    pub time_limit: TimeLimit,
    pub auto_advance: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            animations_enabled: true,
            visual_theme: VisualTheme::Default,
            time_limit: TimeLimit::default(),
            auto_advance: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert!(settings.sound_enabled);
        assert!(settings.animations_enabled);
        assert!(!settings.auto_advance);
        assert_eq!(settings.time_limit.secs(), 30);
        assert_eq!(settings.visual_theme, VisualTheme::Default);
    }

    #[test]
    fn only_listed_time_limits_are_accepted() {
        for secs in TIME_LIMITS {
            assert_eq!(TimeLimit::try_from(secs).unwrap().secs(), secs);
        }
        assert_eq!(TimeLimit::try_from(25), Err(ValidationError::TimeLimit(25)));
    }

    #[test]
    fn time_limit_cycles_through_menu() {
        let mut limit = TimeLimit::try_from(10).unwrap();
        let mut seen = vec![limit.secs()];
        for _ in 0..TIME_LIMITS.len() {
            limit = limit.cycle();
            seen.push(limit.secs());
        }
        assert_eq!(seen, vec![10, 15, 20, 30, 45, 60, 0, 10]);
        assert_eq!(TimeLimit::UNLIMITED.to_string(), "no limit");
    }

    #[test]
    fn settings_json_uses_camel_case() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["timeLimit"], 30);
        assert_eq!(json["visualTheme"], "default");
        assert_eq!(json["autoAdvance"], false);
    }

    #[test]
    fn invalid_time_limit_fails_to_deserialize() {
        let raw = r#"{"soundEnabled":true,"animationsEnabled":true,"visualTheme":"ocean","timeLimit":7,"autoAdvance":false}"#;
        assert!(serde_json::from_str::<Settings>(raw).is_err());

        let raw = raw.replace("\"timeLimit\":7", "\"timeLimit\":45");
        let settings: Settings = serde_json::from_str(&raw).unwrap();
        assert_eq!(settings.visual_theme, VisualTheme::Ocean);
        assert_eq!(settings.time_limit.secs(), 45);
    }

    #[test]
    fn visual_theme_cycles() {
        assert_eq!(VisualTheme::Forest.cycle(), VisualTheme::Default);
        assert_eq!(VisualTheme::Ocean.to_string(), "Ocean");
    }
}
