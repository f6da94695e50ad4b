//! Engine-wide constants, configuration, errors and random rolls.

#![allow(unused_imports)]

pub mod config;
pub mod constants;
pub mod error;
pub mod rolls;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use rolls::*;
