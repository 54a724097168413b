//! Fixed-rate amortizing loan analytics: level payment derivation,
//! payoff schedule simulation, and presentation-boundary views.

pub mod calendar;
pub mod payment;
pub mod schedule;
pub mod summary;
