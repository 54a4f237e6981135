//! Player statistics: accumulation and fail-soft persistence.

#![allow(unused_imports)]

pub mod storage;
pub mod store;
pub mod types;

pub use storage::*;
pub use store::*;
pub use types::*;
