//! Session controller: the idle -> presenting -> resolved round lifecycle.

#![allow(unused_imports)]

pub mod controller;
pub mod presentation;
pub mod types;

pub use controller::*;
pub use presentation::*;
pub use types::*;
