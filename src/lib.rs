//! cachesim: trace-driven simulation of adaptive cache replacement policies.
//!
//! See `DESIGN.md` for how the pieces fit together.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod sim;
pub mod stats;
pub mod trace;
pub mod traits;
