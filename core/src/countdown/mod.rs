//! Live countdowns
//!
//! This module provides:
//! - **CountdownObserver**: remaining seconds for one end time, re-derived by
//!   a cancellable polling task
//! - **CountdownBoard**: one observer per tracked timer, synced from store
//!   snapshots

mod board;
mod observer;

pub use board::CountdownBoard;
pub use observer::{Countdown, CountdownObserver};
