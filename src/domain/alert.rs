//! Price-crossing alerts and the crossing detector.
//!
//! An [`Alert`] remembers the price seen when it was created (`initial`) and
//! the price seen on the most recent poll (`last_observed`). The direction
//! is fixed at creation by comparing `target` with `initial`; a trigger
//! requires the previous observation to sit strictly on the starting side of
//! the target and the new one to reach or pass it.

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::AlertError;
use super::exchange::Exchange;
use super::money::Price;
use super::symbol::Symbol;

/// Which way the price has to move to reach the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Target was below the price at creation.
    Below,
    /// Target was above the price at creation.
    Above,
}

impl Direction {
    /// Derive the direction from a target and the price at creation.
    ///
    /// Returns `None` when they are equal.
    #[must_use]
    pub fn between(target: Price, initial: Price) -> Option<Self> {
        match target.cmp(&initial) {
            std::cmp::Ordering::Less => Some(Self::Below),
            std::cmp::Ordering::Greater => Some(Self::Above),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Past-tense verb for notifications.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Below => "dropped below",
            Self::Above => "rose above",
        }
    }

    /// Short label for listings, e.g. `↓ below`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Below => "↓ below",
            Self::Above => "↑ above",
        }
    }

    /// Comparison sign for confirmations.
    #[must_use]
    pub const fn sign(self) -> char {
        match self {
            Self::Below => '<',
            Self::Above => '>',
        }
    }
}

/// Crossing detector.
///
/// The boundary is inclusive: landing exactly on the target counts as a
/// cross, but the previous observation must be strictly on the far side.
#[must_use]
pub fn crossed(direction: Direction, target: Price, last_observed: Price, current: Price) -> bool {
    match direction {
        Direction::Below => last_observed > target && current <= target,
        Direction::Above => last_observed < target && current >= target,
    }
}

/// A registered price-crossing alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub symbol: Symbol,
    pub exchange: Exchange,
    pub target: Price,
    pub initial: Price,
    #[serde(rename = "last_price")]
    pub last_observed: Price,
}

impl Alert {
    /// Create an alert from a target and the price the exchange just quoted.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::InvalidPrice`] for a non-positive target and
    /// [`AlertError::DegenerateTarget`] when the target equals the quote.
    pub fn try_new(
        symbol: Symbol,
        exchange: Exchange,
        target: Price,
        current: Price,
    ) -> Result<Self, AlertError> {
        if target <= Decimal::ZERO {
            return Err(AlertError::InvalidPrice(target.to_string()));
        }
        if Direction::between(target, current).is_none() {
            return Err(AlertError::DegenerateTarget { symbol, target });
        }
        Ok(Self {
            symbol,
            exchange,
            target,
            initial: current,
            last_observed: current,
        })
    }

    /// Direction fixed at creation.
    ///
    /// A snapshot edited by hand can hold `target == initial`; such an alert
    /// has no direction and never triggers.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        Direction::between(self.target, self.initial)
    }

    /// Record a freshly fetched price and report whether it crossed.
    ///
    /// `last_observed` is advanced whether or not the alert triggers.
    pub fn observe(&mut self, current: Price) -> bool {
        let triggered = self
            .direction()
            .is_some_and(|direction| crossed(direction, self.target, self.last_observed, current));
        self.last_observed = current;
        triggered
    }
}
