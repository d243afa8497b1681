//! Card effect resolution.
//!
//! Effect computation is pure and structured: [`forecast`] predicts the
//! damage a card would deal without touching state, [`resolve`] applies
//! a card and returns a [`CardOutcome`] describing exactly what
//! happened. Narration of either is a presentation-layer concern.

mod resolve;

pub use resolve::{forecast, resolve, CardOutcome, DamageForecast, TargetReport};
