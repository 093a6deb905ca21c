use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::domain::TradeIntent;
use crate::error::FlowError;

pub const UNIT_PRICE: Decimal = dec!(45.50);

const MINOR_UNIT_SCALE: Decimal = dec!(100);

pub fn parse_quantity(raw: &str) -> Result<Decimal, FlowError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FlowError::InvalidAmount(
            "please enter an amount of carbon credits".to_owned(),
        ));
    }
    // Decimal::from_str tolerates digit-group underscores.
    if trimmed.contains('_') {
        return Err(FlowError::InvalidAmount(format!("not a number: {trimmed}")));
    }
    let quantity = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| FlowError::InvalidAmount(format!("not a number: {trimmed}")))?;
    if quantity <= Decimal::ZERO {
        return Err(FlowError::InvalidAmount(format!(
            "amount must be greater than zero, got {quantity}"
        )));
    }
    Ok(quantity)
}

// Round half-up to cents.
pub fn compute_total(quantity: Decimal) -> Result<Decimal, FlowError> {
    quantity
        .checked_mul(UNIT_PRICE)
        .map(|x| x.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .ok_or_else(|| FlowError::InvalidAmount(format!("amount too large: {quantity}")))
}

// floor(value * 100), the integer form the trade contract expects.
pub fn to_minor_units(value: Decimal) -> Option<u128> {
    value.checked_mul(MINOR_UNIT_SCALE)?.floor().to_u128()
}

pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", value)
}

impl TradeIntent {
    pub fn from_quantity(quantity: Decimal) -> Result<Self, FlowError> {
        if quantity <= Decimal::ZERO {
            return Err(FlowError::InvalidAmount(format!(
                "amount must be greater than zero, got {quantity}"
            )));
        }
        let total = compute_total(quantity)?;
        if to_minor_units(quantity).is_none() || to_minor_units(total).is_none() {
            return Err(FlowError::InvalidAmount(format!(
                "amount too large to trade: {quantity}"
            )));
        }
        Ok(Self {
            quantity,
            unit_price: UNIT_PRICE,
            total,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmountEntry {
    raw: String,
}

impl AmountEntry {
    pub fn set(&mut self, raw: impl Into<String>) {
        self.raw = raw.into();
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn clear(&mut self) {
        self.raw.clear();
    }

    pub fn intent(&self) -> Result<TradeIntent, FlowError> {
        TradeIntent::from_quantity(parse_quantity(&self.raw)?)
    }

    pub fn total_display(&self) -> String {
        self.intent()
            .map(|x| format_money(x.total))
            .unwrap_or_else(|_| format_money(Decimal::ZERO))
    }
}
