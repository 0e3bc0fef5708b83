//! Shared layout table
//!
//! Binding slot numbers and buffer struct layouts that host code and shader code
//! must agree on bit-for-bit.

mod bindings;
mod rules;
mod types;

pub use bindings::*;
pub use rules::*;
pub use types::*;
