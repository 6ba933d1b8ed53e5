use chrono::{NaiveDate, NaiveTime};

use crate::quantity::energy::KilowattHours;

/// One metering interval of the normalized export. Immutable once loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct UsageRecord {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub usage: KilowattHours,
}

impl UsageRecord {
    #[must_use]
    pub fn start_hour(&self) -> u32 {
        use chrono::Timelike;
        self.start_time.hour()
    }
}

/// Interval records ordered by date and start time.
#[derive(Clone, Debug, Default)]
pub struct UsageSeries(pub Vec<UsageRecord>);

impl UsageSeries {
    pub fn new(mut records: Vec<UsageRecord>) -> Self {
        records.sort_by_key(|record| (record.date, record.start_time));
        Self(records)
    }

    #[must_use]
    pub fn records(&self) -> &[UsageRecord] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn total_usage(&self) -> KilowattHours {
        self.0.iter().map(|record| record.usage).sum()
    }

    #[must_use]
    pub fn first_date(&self) -> Option<chrono::NaiveDate> {
        self.0.first().map(|record| record.date)
    }

    #[must_use]
    pub fn last_date(&self) -> Option<chrono::NaiveDate> {
        self.0.last().map(|record| record.date)
    }
}
