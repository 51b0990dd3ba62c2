//! Domain layer: value objects and pure computations with no I/O.

pub mod amortization;
pub mod catalog;
pub mod lead;
pub mod money;
pub mod ports;
pub mod property;
pub mod query;
