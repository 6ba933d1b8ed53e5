use comfy_table::{Cell, CellAlignment, Table, modifiers, presets};
use itertools::izip;

use crate::{
    engine::{CycleEstimate, plan::demand::Demand},
    quantity::cost::Cost,
};

const TIER_LABELS: [&str; 3] = ["<=500 kWh", "500-1000 kWh", ">1000 kWh"];

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

fn cost_cell(cost: Cost) -> Cell {
    Cell::new(cost).set_alignment(CellAlignment::Right)
}

/// Final comparison: one row per billing cycle, in input cycle order.
pub fn build_summary_table(estimates: &[CycleEstimate]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Billing Period", "Basic", "Time-of-Use", "Peak Demand"]);
    for estimate in estimates {
        table.add_row(vec![
            Cell::new(&estimate.label),
            cost_cell(estimate.basic.total()),
            cost_cell(estimate.tou.total()),
            cost_cell(estimate.peak_demand.total()),
        ]);
    }
    table
}

/// Basic plan detail: per-tier charges, one column per season.
pub fn build_basic_table(estimate: &CycleEstimate) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Tier", "Summer", "Winter"]);
    let basic = &estimate.basic;
    for (label, summer, winter) in izip!(TIER_LABELS, basic.summer.amounts, basic.winter.amounts)
    {
        table.add_row(vec![Cell::new(label), cost_cell(summer), cost_cell(winter)]);
    }
    table.add_row(vec![
        Cell::new("Total"),
        cost_cell(basic.summer.total()),
        cost_cell(basic.winter.total()),
    ]);
    table
}

/// Time-of-Use detail: usage, interval hours, and charge per window.
pub fn build_tou_table(estimate: &CycleEstimate) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Window", "Usage", "Hours", "Charge"]);
    let tou = &estimate.tou;
    let windows = [
        ("Summer peak", &tou.summer_on),
        ("Summer off", &tou.summer_off),
        ("Winter peak", &tou.winter_on),
        ("Winter off", &tou.winter_off),
    ];
    for (label, window) in windows {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(window.usage).set_alignment(CellAlignment::Right),
            Cell::new(window.intervals).set_alignment(CellAlignment::Right),
            cost_cell(window.breakdown.total()),
        ]);
    }
    table
}

/// Peak Demand detail: flat energy charges plus the demand charge.
pub fn build_peak_demand_table(estimate: &CycleEstimate) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Component", "Basis", "Charge"]);
    let plan = &estimate.peak_demand;
    table.add_row(vec![
        Cell::new("Summer energy"),
        Cell::new(plan.summer_usage).set_alignment(CellAlignment::Right),
        cost_cell(plan.summer_energy),
    ]);
    table.add_row(vec![
        Cell::new("Winter energy"),
        Cell::new(plan.winter_usage).set_alignment(CellAlignment::Right),
        cost_cell(plan.winter_energy),
    ]);
    match plan.demand {
        Demand::Metered { peak, charge } => {
            table.add_row(vec![
                Cell::new("Demand"),
                Cell::new(peak).set_alignment(CellAlignment::Right),
                cost_cell(charge),
            ]);
        }
        Demand::NoPeakData => {
            table.add_row(vec![
                Cell::new("Demand"),
                Cell::new("no peak data").set_alignment(CellAlignment::Right),
                cost_cell(Cost::ZERO),
            ]);
        }
    }
    table
}
