use std::path::Path;

use serde::Deserialize;

use crate::{
    engine::{calendar::{PeakWindow, Season}, tiers::TierSchedule},
    prelude::*,
    quantity::{power::Kilowatts, rate::{KilowattHourRate, KilowattRate}},
};

/// Per-season values of any schedule.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Seasonal<T> {
    pub summer: T,
    pub winter: T,
}

impl<T: Copy> Seasonal<T> {
    pub const fn get(self, season: Season) -> T {
        match season {
            Season::Summer => self.summer,
            Season::Winter => self.winter,
        }
    }
}

/// Demand charge rates of the Peak Demand plan: the billed rate depends on
/// which side of the threshold the peak demand falls.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct DemandRates {
    pub below: KilowattRate,
    pub above: KilowattRate,
    pub threshold: Kilowatts,
}

impl DemandRates {
    #[must_use]
    pub fn rate_for(&self, demand: Kilowatts) -> KilowattRate {
        if demand <= self.threshold { self.below } else { self.above }
    }
}

/// Immutable rate configuration for all three plans.
///
/// [`RateBook::default`] carries the utility's published residential
/// schedule; an alternate rate year or jurisdiction is a TOML file away.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RateBook {
    pub basic: Seasonal<TierSchedule>,
    pub tou_on: Seasonal<TierSchedule>,
    pub tou_off: Seasonal<TierSchedule>,
    pub energy: Seasonal<KilowattHourRate>,
    pub demand: DemandRates,
    pub peak_window: PeakWindow,
}

impl Default for RateBook {
    fn default() -> Self {
        Self {
            basic: Seasonal {
                summer: TierSchedule::new(0.1081, 0.1254, 0.1317),
                winter: TierSchedule::new(0.1052, 0.1224, 0.1287),
            },
            tou_on: Seasonal {
                summer: TierSchedule::new(0.1416, 0.1528, 0.1592),
                winter: TierSchedule::new(0.1112, 0.1225, 0.1288),
            },
            tou_off: Seasonal {
                summer: TierSchedule::new(0.1056, 0.1169, 0.1232),
                winter: TierSchedule::new(0.1050, 0.1163, 0.1226),
            },
            energy: Seasonal {
                summer: KilowattHourRate::from(0.0711),
                winter: KilowattHourRate::from(0.0681),
            },
            demand: DemandRates {
                below: KilowattRate::from(10.18),
                above: KilowattRate::from(14.79),
                threshold: Kilowatts::from(7.0),
            },
            peak_window: PeakWindow::default(),
        }
    }
}

impl RateBook {
    /// Loads a rate book from TOML; omitted sections keep their defaults.
    ///
    /// A structurally invalid file is a configuration error and aborts
    /// startup rather than falling back silently.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read rate book from {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse rate book {}", path.display()))
    }
}
