//! Payload layouts of every message the receiver emits.
//!
//! Every payload starts with `time_gps`, the GPS time of week in milliseconds of the
//! navigation epoch. All multi-byte fields are little-endian.

pub mod dops;
pub mod pos;
pub mod stat;
pub mod svi;
pub mod vel;
pub mod ver;

pub use dops::*;
pub use pos::*;
pub use stat::*;
pub use svi::*;
pub use vel::*;
pub use ver::*;
