use crate::{
    engine::{
        calendar::{HolidayCalendar, Season},
        rates::RateBook,
        series::UsageSeries,
        tiers::{TierBreakdown, TierSchedule},
    },
    quantity::{cost::Cost, energy::KilowattHours},
};

/// One of the four season-by-window subsets of a billing cycle.
#[derive(Debug, Default)]
pub struct WindowEstimate {
    pub usage: KilowattHours,
    /// Number of metering intervals, i.e. hours, in the subset.
    pub intervals: usize,
    pub breakdown: TierBreakdown,
}

impl WindowEstimate {
    fn evaluate(mut self, schedule: TierSchedule) -> Self {
        self.breakdown = schedule.apply(self.usage);
        self
    }

    fn add(&mut self, usage: KilowattHours) {
        self.usage += usage;
        self.intervals += 1;
    }
}

/// Time-of-Use plan: tiered energy charges per season and peak window,
/// each of the four subsets priced by its own schedule.
#[derive(Debug)]
pub struct TouEstimate {
    pub summer_on: WindowEstimate,
    pub summer_off: WindowEstimate,
    pub winter_on: WindowEstimate,
    pub winter_off: WindowEstimate,
}

impl TouEstimate {
    pub fn total(&self) -> Cost {
        self.summer_on.breakdown.total()
            + self.summer_off.breakdown.total()
            + self.winter_on.breakdown.total()
            + self.winter_off.breakdown.total()
    }
}

pub fn evaluate(
    series: &UsageSeries,
    rates: &RateBook,
    holidays: &HolidayCalendar,
) -> TouEstimate {
    let mut summer_on = WindowEstimate::default();
    let mut summer_off = WindowEstimate::default();
    let mut winter_on = WindowEstimate::default();
    let mut winter_off = WindowEstimate::default();

    for record in series.records() {
        let on_peak = rates.peak_window.is_on_peak(record, holidays);
        let subset = match (Season::from_date(record.date), on_peak) {
            (Season::Summer, true) => &mut summer_on,
            (Season::Summer, false) => &mut summer_off,
            (Season::Winter, true) => &mut winter_on,
            (Season::Winter, false) => &mut winter_off,
        };
        subset.add(record.usage);
    }

    TouEstimate {
        summer_on: summer_on.evaluate(rates.tou_on.get(Season::Summer)),
        summer_off: summer_off.evaluate(rates.tou_off.get(Season::Summer)),
        winter_on: winter_on.evaluate(rates.tou_on.get(Season::Winter)),
        winter_off: winter_off.evaluate(rates.tou_off.get(Season::Winter)),
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
    fn test_subsets_are_disjoint_and_exhaustive() {
        // 2022-06-01 is a Wednesday; hour 16 is on-peak, hour 10 is not.
        let series = UsageSeries::new(vec![
            record(day(6, 1), 16, 2.0),
            record(day(6, 1), 10, 3.0),
            record(day(1, 5), 16, 4.0), // Wednesday in winter
            record(day(1, 5), 22, 5.0),
        ]);
        let estimate = evaluate(&series, &RateBook::default(), &HolidayCalendar::default());
        assert_eq!(estimate.summer_on.intervals, 1);
        assert_eq!(estimate.summer_off.intervals, 1);
        assert_eq!(estimate.winter_on.intervals, 1);
        assert_eq!(estimate.winter_off.intervals, 1);
        let counted = estimate.summer_on.intervals
            + estimate.summer_off.intervals
            + estimate.winter_on.intervals
            + estimate.winter_off.intervals;
        assert_eq!(counted, series.len());
        assert_abs_diff_eq!(estimate.summer_on.usage.0.0, 2.0);
        assert_abs_diff_eq!(estimate.winter_off.usage.0.0, 5.0);
    }

    #[test]
    fn test_each_window_priced_by_its_own_schedule() {
        let series = UsageSeries::new(vec![
            record(day(6, 1), 16, 100.0),
            record(day(6, 1), 10, 100.0),
        ]);
        let rates = RateBook::default();
        let estimate = evaluate(&series, &rates, &HolidayCalendar::default());
        assert_abs_diff_eq!(estimate.summer_on.breakdown.total().0.0, 100.0 * 0.1416);
        assert_abs_diff_eq!(estimate.summer_off.breakdown.total().0.0, 100.0 * 0.1056);
    }

    #[test]
    fn test_total_is_sum_of_window_breakdowns() {
        let series = UsageSeries::new(vec![
            record(day(6, 1), 16, 10.0),
            record(day(1, 5), 3, 20.0),
        ]);
        let estimate = evaluate(&series, &RateBook::default(), &HolidayCalendar::default());
        let expected = estimate.summer_on.breakdown.total()
            + estimate.summer_off.breakdown.total()
            + estimate.winter_on.breakdown.total()
            + estimate.winter_off.breakdown.total();
        assert_eq!(estimate.total(), expected);
        assert!(estimate.total() >= Cost::ZERO);
    }
}
