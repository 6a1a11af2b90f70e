use serde::{Deserialize, Serialize};

/// Named mood driving icon selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeelingTier {
    /// Window has not started yet.
    Angel,
    Cool,
    Smile,
    Plain,
    Worried,
    Surprise,
    /// Deadline passed, or no usable window.
    Sick,
}

/// Percent thresholds in ascending order. Lookup takes the last entry whose
/// threshold does not exceed the percent.
pub const FEELING_THRESHOLDS: &[(f64, FeelingTier)] = &[
    (0.0, FeelingTier::Cool),
    (30.0, FeelingTier::Smile),
    (60.0, FeelingTier::Plain),
    (90.0, FeelingTier::Worried),
    (95.0, FeelingTier::Surprise),
];

impl FeelingTier {
    pub const ALL: [FeelingTier; 7] = [
        FeelingTier::Angel,
        FeelingTier::Cool,
        FeelingTier::Smile,
        FeelingTier::Plain,
        FeelingTier::Worried,
        FeelingTier::Surprise,
        FeelingTier::Sick,
    ];

    /// Floor lookup of `percent` in [`FEELING_THRESHOLDS`].
    ///
    /// Percents below the first threshold fall back to the first tier.
    pub fn for_percent(percent: f64) -> Self {
        FEELING_THRESHOLDS
            .iter()
            .take_while(|(threshold, _)| *threshold <= percent)
            .last()
            .map(|(_, tier)| *tier)
            .unwrap_or(FEELING_THRESHOLDS[0].1)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeelingTier::Angel => "angel",
            FeelingTier::Cool => "cool",
            FeelingTier::Smile => "smile",
            FeelingTier::Plain => "plain",
            FeelingTier::Worried => "worried",
            FeelingTier::Surprise => "surprise",
            FeelingTier::Sick => "sick",
        }
    }

    /// Symbolic icon name from the freedesktop emote set.
    pub fn icon_name(&self) -> &'static str {
        match self {
            FeelingTier::Angel => "face-angel-symbolic",
            FeelingTier::Cool => "face-cool-symbolic",
            FeelingTier::Smile => "face-smile-symbolic",
            FeelingTier::Plain => "face-plain-symbolic",
            FeelingTier::Worried => "face-worried-symbolic",
            FeelingTier::Surprise => "face-surprise-symbolic",
            FeelingTier::Sick => "face-sick-symbolic",
        }
    }
}

impl std::fmt::Display for FeelingTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_lookup_at_every_threshold() {
        assert_eq!(FeelingTier::for_percent(0.0), FeelingTier::Cool);
        assert_eq!(FeelingTier::for_percent(29.0), FeelingTier::Cool);
        assert_eq!(FeelingTier::for_percent(30.0), FeelingTier::Smile);
        assert_eq!(FeelingTier::for_percent(59.0), FeelingTier::Smile);
        assert_eq!(FeelingTier::for_percent(60.0), FeelingTier::Plain);
        assert_eq!(FeelingTier::for_percent(89.0), FeelingTier::Plain);
        assert_eq!(FeelingTier::for_percent(90.0), FeelingTier::Worried);
        assert_eq!(FeelingTier::for_percent(94.0), FeelingTier::Worried);
        assert_eq!(FeelingTier::for_percent(95.0), FeelingTier::Surprise);
        assert_eq!(FeelingTier::for_percent(100.0), FeelingTier::Surprise);
    }

    #[test]
    fn fractional_percent_does_not_round_up_a_tier() {
        assert_eq!(FeelingTier::for_percent(29.99), FeelingTier::Cool);
        assert_eq!(FeelingTier::for_percent(99.5), FeelingTier::Surprise);
    }

    #[test]
    fn thresholds_are_strictly_ascending() {
        for pair in FEELING_THRESHOLDS.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }

    #[test]
    fn icon_names_are_distinct() {
        let mut names: Vec<_> = FeelingTier::ALL.iter().map(|t| t.icon_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FeelingTier::ALL.len());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&FeelingTier::Surprise).unwrap(),
            "\"surprise\""
        );
    }
}
