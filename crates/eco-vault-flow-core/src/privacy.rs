use std::fmt;
use std::str::FromStr;

use crate::domain::{PrivacyLevel, PrivacyTier};
use crate::error::UnknownPrivacyLevel;

const TIERS: [PrivacyTier; 3] = [
    PrivacyTier {
        level: PrivacyLevel::Standard,
        title: "Standard Privacy",
        description: "Basic encryption with standard anonymity",
        features: &["Basic encryption", "Standard mixing", "Fast processing"],
        recommended: false,
    },
    PrivacyTier {
        level: PrivacyLevel::Enhanced,
        title: "Enhanced Privacy",
        description: "Advanced encryption with improved anonymity",
        features: &[
            "Advanced encryption",
            "Enhanced mixing",
            "Medium processing",
        ],
        recommended: true,
    },
    PrivacyTier {
        level: PrivacyLevel::Maximum,
        title: "Maximum Privacy",
        description: "Military-grade encryption with maximum anonymity",
        features: &[
            "Military-grade encryption",
            "Maximum mixing",
            "Slower processing",
        ],
        recommended: false,
    },
];

impl PrivacyLevel {
    pub const ALL: [PrivacyLevel; 3] = [
        PrivacyLevel::Standard,
        PrivacyLevel::Enhanced,
        PrivacyLevel::Maximum,
    ];

    pub fn tier(self) -> &'static PrivacyTier {
        match self {
            PrivacyLevel::Standard => &TIERS[0],
            PrivacyLevel::Enhanced => &TIERS[1],
            PrivacyLevel::Maximum => &TIERS[2],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrivacyLevel::Standard => "standard",
            PrivacyLevel::Enhanced => "enhanced",
            PrivacyLevel::Maximum => "maximum",
        }
    }
}

impl fmt::Display for PrivacyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrivacyLevel {
    type Err = UnknownPrivacyLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(PrivacyLevel::Standard),
            "enhanced" => Ok(PrivacyLevel::Enhanced),
            "maximum" => Ok(PrivacyLevel::Maximum),
            other => Err(UnknownPrivacyLevel(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrivacyLevelSelector {
    selected: PrivacyLevel,
}

impl PrivacyLevelSelector {
    pub fn select(&mut self, level: PrivacyLevel) {
        self.selected = level;
    }

    pub fn selected(&self) -> PrivacyLevel {
        self.selected
    }

    pub fn options(&self) -> &'static [PrivacyTier] {
        &TIERS
    }
}
