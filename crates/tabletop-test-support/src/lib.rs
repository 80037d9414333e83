//! Shared test doubles and utilities for the tabletop campaign model.

mod clock;
mod logging;
mod rng;

pub use clock::{FixedClock, SteppingClock};
pub use logging::init_test_tracing;
pub use rng::{MockRng, SequenceRng};
