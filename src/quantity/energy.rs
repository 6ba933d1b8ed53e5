use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use ordered_float::OrderedFloat;

use crate::quantity::{Quantity, cost::Cost, power::Kilowatts, rate::KilowattHourRate};

pub type KilowattHours = Quantity<1, 1, 0>;

impl KilowattHours {
    /// Tier bracket width of the residential schedules.
    pub const TIER_STEP: Self = Self(OrderedFloat(500.0));

    /// Average demand over a one-hour metering interval.
    ///
    /// The export's intervals are one hour long, so an interval's
    /// kilowatt-hours figure doubles as its demand in kilowatts.
    pub const fn hourly_demand(self) -> Kilowatts {
        Quantity(self.0)
    }
}

impl Default for KilowattHours {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Display for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} kWh", self.0)
    }
}

impl Debug for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}kWh", self.0)
    }
}

impl Mul<KilowattHourRate> for KilowattHours {
    type Output = Cost;

    fn mul(self, rhs: KilowattHourRate) -> Self::Output {
        Cost::from(self.0 * rhs.0)
    }
}
