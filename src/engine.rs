pub mod calendar;
pub mod cycles;
pub mod plan;
pub mod rates;
pub mod series;
pub mod tiers;

use crate::{
    engine::{
        calendar::HolidayCalendar,
        cycles::CycleStart,
        plan::{BasicEstimate, PeakDemandEstimate, TouEstimate},
        rates::RateBook,
        series::UsageSeries,
    },
    prelude::*,
    quantity::energy::KilowattHours,
};

/// All three plans estimated over one billing cycle.
#[derive(Debug)]
pub struct CycleEstimate {
    pub label: String,
    pub total_usage: KilowattHours,
    pub basic: BasicEstimate,
    pub tou: TouEstimate,
    pub peak_demand: PeakDemandEstimate,
}

/// Segments the series into billing cycles and estimates every plan over
/// each of them, in the caller's cycle order. Pure: no I/O, no state
/// beyond the rate book passed in.
pub fn evaluate(
    series: &UsageSeries,
    starts: &[CycleStart],
    rates: &RateBook,
) -> Vec<CycleEstimate> {
    let holidays = HolidayCalendar::spanning(series);
    cycles::segment(series, starts)
        .into_iter()
        .map(|cycle| {
            debug!(label = %cycle.label, records = cycle.series.len(), "estimating billing cycle");
            CycleEstimate {
                total_usage: cycle.series.total_usage(),
                basic: plan::basic::evaluate(&cycle.series, rates),
                tou: plan::tou::evaluate(&cycle.series, rates, &holidays),
                peak_demand: plan::demand::evaluate(&cycle.series, rates, &holidays),
                label: cycle.label,
            }
        })
        .collect()
}
