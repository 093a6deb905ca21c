use std::fmt;

use crate::amount::format_money;
use crate::domain::{PrivacyLevel, TradeIntent};

pub const MASK: &str = "••••••";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationView {
    masked: bool,
}

impl Default for ConfirmationView {
    fn default() -> Self {
        Self { masked: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationSummary {
    pub quantity: String,
    pub privacy_title: &'static str,
    pub total: String,
    pub unit_price: String,
}

impl ConfirmationView {
    pub fn is_masked(&self) -> bool {
        self.masked
    }

    pub fn toggle(&mut self) -> bool {
        self.masked = !self.masked;
        self.masked
    }

    pub fn summary(&self, intent: &TradeIntent, privacy: PrivacyLevel) -> ConfirmationSummary {
        let (quantity, total) = if self.masked {
            (MASK.to_owned(), MASK.to_owned())
        } else {
            (intent.quantity.to_string(), format_money(intent.total))
        };
        ConfirmationSummary {
            quantity,
            privacy_title: privacy.tier().title,
            total,
            unit_price: format_money(intent.unit_price),
        }
    }
}

impl fmt::Display for ConfirmationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Amount:        {} tCO₂", self.quantity)?;
        writeln!(f, "Privacy Level: {}", self.privacy_title)?;
        writeln!(f, "Price per tCO₂: ${}", self.unit_price)?;
        write!(f, "Total:         ${}", self.total)
    }
}
