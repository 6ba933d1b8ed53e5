use crate::{
    engine::{
        calendar::Season,
        rates::RateBook,
        series::UsageSeries,
        tiers::TierBreakdown,
    },
    quantity::{cost::Cost, energy::KilowattHours},
};

/// Basic plan: tiered energy charges per season, no time differentiation.
#[derive(Debug)]
pub struct BasicEstimate {
    pub summer: TierBreakdown,
    pub winter: TierBreakdown,
}

impl BasicEstimate {
    pub fn total(&self) -> Cost {
        self.summer.total() + self.winter.total()
    }
}

pub fn evaluate(series: &UsageSeries, rates: &RateBook) -> BasicEstimate {
    let mut summer = KilowattHours::ZERO;
    let mut winter = KilowattHours::ZERO;
    for record in series.records() {
        match Season::from_date(record.date) {
            Season::Summer => summer += record.usage,
            Season::Winter => winter += record.usage,
        }
    }
    BasicEstimate {
        summer: rates.basic.get(Season::Summer).apply(summer),
        winter: rates.basic.get(Season::Winter).apply(winter),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    use super::*;
    use crate::engine::series::tests::record;

    #[test]
    fn test_summer_cycle_1200_kwh() {
        let june = NaiveDate::from_ymd_opt(2022, 6, 15).unwrap();
        let series = UsageSeries::new(vec![
            record(june, 0, 700.0),
            record(june, 1, 500.0),
        ]);
        let estimate = evaluate(&series, &RateBook::default());
        assert_abs_diff_eq!(estimate.total().0.0, 143.09, epsilon = 1e-9);
        assert_eq!(estimate.winter.total(), Cost::ZERO);
    }

    #[test]
    fn test_total_is_sum_of_season_breakdowns() {
        let june = NaiveDate::from_ymd_opt(2022, 6, 15).unwrap();
        let january = NaiveDate::from_ymd_opt(2022, 1, 15).unwrap();
        let series = UsageSeries::new(vec![
            record(june, 0, 600.0),
            record(january, 0, 400.0),
        ]);
        let estimate = evaluate(&series, &RateBook::default());
        assert_eq!(estimate.total(), estimate.summer.total() + estimate.winter.total());
        assert!(estimate.total() >= Cost::ZERO);
    }
}
