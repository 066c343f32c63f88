//! Core types and constants for the needle guidance system

pub mod constants;
pub mod types;

pub use constants::*;
pub use types::*;
