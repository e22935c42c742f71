//! Break cycle module.
//!
//! This module contains the core of the application:
//! - `controller`: the work/break state machine, its timing loop and the
//!   side effects it sequences at phase boundaries

pub mod controller;

pub use controller::{BreakCycleController, Signals};
