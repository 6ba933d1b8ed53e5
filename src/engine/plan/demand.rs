use crate::{
    engine::{
        calendar::{HolidayCalendar, Season},
        rates::RateBook,
        series::UsageSeries,
    },
    quantity::{cost::Cost, energy::KilowattHours, power::Kilowatts},
};

/// Billed demand of a cycle, or the lack of it.
///
/// A cycle with no on-peak intervals has no defined maximum: that is
/// reported as [`Demand::NoPeakData`] and contributes nothing to the
/// total, rather than being an error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Demand {
    Metered { peak: Kilowatts, charge: Cost },
    NoPeakData,
}

impl Demand {
    pub fn charge(&self) -> Cost {
        match *self {
            Self::Metered { charge, .. } => charge,
            Self::NoPeakData => Cost::ZERO,
        }
    }
}

/// Peak Demand plan: flat per-season energy charges plus a demand charge
/// on the highest on-peak interval.
#[derive(Debug)]
pub struct PeakDemandEstimate {
    pub summer_usage: KilowattHours,
    pub winter_usage: KilowattHours,
    pub summer_energy: Cost,
    pub winter_energy: Cost,
    pub demand: Demand,
}

impl PeakDemandEstimate {
    pub fn total(&self) -> Cost {
        self.summer_energy + self.winter_energy + self.demand.charge()
    }
}

pub fn evaluate(
    series: &UsageSeries,
    rates: &RateBook,
    holidays: &HolidayCalendar,
) -> PeakDemandEstimate {
    let mut summer_usage = KilowattHours::ZERO;
    let mut winter_usage = KilowattHours::ZERO;
    for record in series.records() {
        match Season::from_date(record.date) {
            Season::Summer => summer_usage += record.usage,
            Season::Winter => winter_usage += record.usage,
        }
    }

    let demand = series
        .records()
        .iter()
        .filter(|record| rates.peak_window.is_on_peak(record, holidays))
        .map(|record| record.usage)
        .max()
        .map_or(Demand::NoPeakData, |usage| {
            let peak = usage.hourly_demand();
            Demand::Metered { peak, charge: peak * rates.demand.rate_for(peak) }
        });

    PeakDemandEstimate {
        summer_usage,
        winter_usage,
        summer_energy: summer_usage * rates.energy.get(Season::Summer),
        winter_energy: winter_usage * rates.energy.get(Season::Winter),
        demand,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    use super::*;
    use crate::engine::series::tests::record;

    fn day(month: u32, day_of_month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, month, day_of_month).unwrap()
    }

    #[test]
    fn test_demand_is_maximum_on_peak_interval() {
        // Wednesdays; hours 15-18 are on-peak.
        let series = UsageSeries::new(vec![
            record(day(6, 1), 16, 3.0),
            record(day(6, 1), 17, 5.0),
            record(day(6, 1), 20, 9.0), // off-peak, must not drive demand
        ]);
        let estimate = evaluate(&series, &RateBook::default(), &HolidayCalendar::default());
        match estimate.demand {
            Demand::Metered { peak, charge } => {
                assert_abs_diff_eq!(peak.0.0, 5.0);
                assert_abs_diff_eq!(charge.0.0, 5.0 * 10.18);
            }
            Demand::NoPeakData => panic!("expected metered demand"),
        }
    }

    #[test]
    fn test_demand_above_threshold_uses_higher_rate() {
        let series = UsageSeries::new(vec![record(day(6, 1), 16, 8.0)]);
        let estimate = evaluate(&series, &RateBook::default(), &HolidayCalendar::default());
        assert_abs_diff_eq!(estimate.demand.charge().0.0, 8.0 * 14.79);
    }

    #[test]
    fn test_no_on_peak_records_is_not_an_error() {
        // Hour 10 is outside the peak window: no demand data, energy
        // charges still computed.
        let series = UsageSeries::new(vec![record(day(6, 1), 10, 100.0)]);
        let estimate = evaluate(&series, &RateBook::default(), &HolidayCalendar::default());
        assert_eq!(estimate.demand, Demand::NoPeakData);
        assert_eq!(estimate.demand.charge(), Cost::ZERO);
        assert_abs_diff_eq!(estimate.summer_energy.0.0, 100.0 * 0.0711);
        assert_abs_diff_eq!(estimate.total().0.0, 100.0 * 0.0711);
    }

    #[test]
    fn test_energy_charges_are_flat_per_season() {
        let series = UsageSeries::new(vec![
            record(day(6, 1), 10, 1200.0),
            record(day(1, 5), 10, 800.0),
        ]);
        let estimate = evaluate(&series, &RateBook::default(), &HolidayCalendar::default());
        assert_abs_diff_eq!(estimate.summer_energy.0.0, 1200.0 * 0.0711);
        assert_abs_diff_eq!(estimate.winter_energy.0.0, 800.0 * 0.0681);
    }
}
