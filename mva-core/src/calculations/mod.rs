//! Price projection for the VAT phase-in on electric vehicles.
//!
//! The engine in [`projection`] is pure: one base price in, one
//! [`ProjectionSet`](crate::ProjectionSet) out, with no error states.

pub mod common;
pub mod projection;

pub use projection::{VatPhaseIn, project};
