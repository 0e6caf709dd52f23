//! Confession storage.
//!
//! [`ConfessionStore`] owns the ordered list and mirrors it, in full, to a
//! single key of a [`Storage`] backend after every change.

pub mod confessions;
pub mod storage;

pub use confessions::ConfessionStore;
pub use storage::{FileStorage, MemoryStorage, SlotBackend, Storage};
