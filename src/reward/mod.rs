//! Reward engine: the reward table and weighted draws.

#![allow(unused_imports)]

pub mod engine;
pub mod random;
pub mod table;
pub mod types;

pub use engine::*;
pub use random::*;
pub use table::*;
pub use types::*;
