mod base_price;
mod fiscal_year;
mod phase_in_schedule;
mod projection_set;

pub use base_price::{BasePrice, PriceError};
pub use fiscal_year::{FiscalYear, UnknownFiscalYear};
pub use phase_in_schedule::{ExemptionStep, PhaseInSchedule};
pub use projection_set::{ProjectionSet, StackedSegments, YearProjection};
