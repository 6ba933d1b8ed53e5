use ordered_float::OrderedFloat;
use serde::Deserialize;

use crate::quantity::{Quantity, cost::Cost, energy::KilowattHours, rate::KilowattHourRate};

/// Marginal rates of the three usage brackets: up to 500 kWh, 500 to
/// 1000 kWh, and everything above.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct TierSchedule {
    pub first: KilowattHourRate,
    pub second: KilowattHourRate,
    pub surplus: KilowattHourRate,
}

impl TierSchedule {
    #[must_use]
    pub const fn new(first: f64, second: f64, surplus: f64) -> Self {
        Self {
            first: Quantity(OrderedFloat(first)),
            second: Quantity(OrderedFloat(second)),
            surplus: Quantity(OrderedFloat(surplus)),
        }
    }

    /// Marginal-bracket charge for the given usage total.
    ///
    /// Unreached brackets charge zero. No rounding here: dollar amounts
    /// are rounded at presentation only.
    pub fn apply(&self, usage: KilowattHours) -> TierBreakdown {
        let step = KilowattHours::TIER_STEP;
        let first = usage.min(step) * self.first;
        let second = (usage - step).max(KilowattHours::ZERO).min(step) * self.second;
        let surplus = (usage - step - step).max(KilowattHours::ZERO) * self.surplus;
        TierBreakdown { amounts: [first, second, surplus] }
    }
}

/// Per-bracket charges, in bracket order.
#[derive(Clone, Copy, Debug, Default)]
pub struct TierBreakdown {
    pub amounts: [Cost; 3],
}

impl TierBreakdown {
    pub fn total(&self) -> Cost {
        self.amounts.iter().copied().sum()
    }
}
