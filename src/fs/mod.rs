//! Filesystem utilities for conjure.

pub mod atomic;

pub use atomic::atomic_write;
