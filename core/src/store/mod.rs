//! Timer store
//!
//! This module provides:
//! - **TimerStore**: owner of the five enemy slots and every mutation on them
//! - **Persistence**: the versioned state file and its restore rules
//!
//! # Timer lifecycle
//!
//! ```text
//! INACTIVE ──start──▶ RUNNING ──clock passes end──▶ EXPIRED (shown as inactive)
//!    ▲                   │
//!    └──────clear────────┘          start while RUNNING is ignored
//! ```

mod error;
mod persistence;
mod timer_store;


pub use error::PersistenceError;
pub use persistence::{PersistedState, STATE_VERSION};
pub use timer_store::TimerStore;
