//! State module for tracking pagination progress
//!
//! [`DriverState`] is where the pagination driver sits in its
//! fetch/emit/advance cycle.

mod driver_state;

pub use driver_state::DriverState;
