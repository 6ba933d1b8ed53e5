use chrono::NaiveDate;

use crate::{
    engine::series::UsageSeries,
    prelude::*,
};

/// A billing cycle boundary: the caller's original date string is kept as
/// the cycle's label in the final report.
#[derive(Clone, Debug)]
pub struct CycleStart {
    pub label: String,
    pub date: NaiveDate,
}

impl CycleStart {
    pub fn parse(label: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(label.trim(), "%m/%d/%Y")
            .with_context(|| format!("failed to parse billing start date `{label}`"))?;
        Ok(Self { label: label.trim().to_string(), date })
    }

    /// Single whole-series cycle, used when the caller supplies no dates.
    #[must_use]
    pub fn covering(series: &UsageSeries) -> Option<Self> {
        series
            .first_date()
            .map(|date| Self { label: date.format("%m/%d/%Y").to_string(), date })
    }
}

/// One segmented billing cycle and its records.
#[derive(Debug)]
pub struct BillingCycle {
    pub label: String,
    pub series: UsageSeries,
}

/// Splits the series into date-bounded sub-series, one per start date.
///
/// Cycle `i` spans `[start_i, start_i+1)`; the last cycle is open-ended.
/// Cycles matching no records are dropped. The start list is taken as
/// given: an unsorted list yields whatever the interval filters yield.
#[must_use]
pub fn segment(series: &UsageSeries, starts: &[CycleStart]) -> Vec<BillingCycle> {
    starts
        .iter()
        .enumerate()
        .filter_map(|(index, start)| {
            let end = starts.get(index + 1).map(|next| next.date);
            let records = series
                .records()
                .iter()
                .filter(|record| {
                    record.date >= start.date && end.is_none_or(|end| record.date < end)
                })
                .cloned()
                .collect::<Vec<_>>();
            if records.is_empty() {
                debug!(label = %start.label, "billing cycle matched no records");
                None
            } else {
                Some(BillingCycle { label: start.label.clone(), series: UsageSeries(records) })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::series::tests::record;

    fn day(month: u32, day_of_month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, month, day_of_month).unwrap()
    }

    fn starts(labels: &[&str]) -> Vec<CycleStart> {
        labels.iter().map(|label| CycleStart::parse(label).unwrap()).collect()
    }

    #[test]
    fn test_two_cycles_partition_records_after_first_start() {
        let series = UsageSeries::new(vec![
            record(day(5, 10), 0, 1.0), // before the first cycle
            record(day(5, 11), 0, 1.0),
            record(day(6, 9), 0, 1.0),
            record(day(6, 10), 0, 1.0),
            record(day(7, 1), 0, 1.0),
        ]);
        let cycles = segment(&series, &starts(&["05/11/2022", "06/10/2022"]));
        assert_eq!(cycles.len(), 2);
        assert_eq!(cycles[0].label, "05/11/2022");
        assert_eq!(cycles[0].series.len(), 2);
        assert_eq!(cycles[1].series.len(), 2);
    }

    #[test]
    fn test_empty_cycle_is_dropped() {
        let series = UsageSeries::new(vec![record(day(6, 15), 0, 1.0)]);
        let cycles = segment(&series, &starts(&["05/11/2022", "06/10/2022"]));
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].label, "06/10/2022");
    }

    #[test]
    fn test_segmentation_is_idempotent() {
        let series = UsageSeries::new(vec![
            record(day(5, 11), 0, 1.0),
            record(day(6, 10), 0, 2.0),
        ]);
        let boundaries = starts(&["05/11/2022", "06/10/2022"]);
        let first = segment(&series, &boundaries);
        let second = segment(&series, &boundaries);
        assert_eq!(first.len(), second.len());
        for (lhs, rhs) in first.iter().zip(&second) {
            assert_eq!(lhs.label, rhs.label);
            assert_eq!(lhs.series.records(), rhs.series.records());
        }
    }

    #[test]
    fn test_covering_labels_first_record_date() {
        let series = UsageSeries::new(vec![record(day(5, 11), 0, 1.0)]);
        let start = CycleStart::covering(&series).unwrap();
        assert_eq!(start.label, "05/11/2022");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(CycleStart::parse("2022-05-11").is_err());
        assert!(CycleStart::parse("not a date").is_err());
    }
}
