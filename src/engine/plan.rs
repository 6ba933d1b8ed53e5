pub mod basic;
pub mod demand;
pub mod tou;

pub use self::{basic::BasicEstimate, demand::PeakDemandEstimate, tou::TouEstimate};
