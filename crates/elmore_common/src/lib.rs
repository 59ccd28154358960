//! Shared foundational types used across the Elmore interconnect timer.
//!
//! This crate provides the analysis corner domain (split × transition), the
//! fixed-size per-corner value grid used for every per-node timing quantity,
//! and the terminal description through which the outer timing engine
//! attaches driver and receiver pins to a net.

#![warn(missing_docs)]

pub mod corner;
pub mod terminal;

pub use corner::{Corner, CornerGrid, ParseCornerError, Split, Tran};
pub use terminal::Terminal;
