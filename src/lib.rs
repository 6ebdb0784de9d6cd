//! Switch TestKit - Hardware switch diagnostic utility
//!
//! Verifies the two switches wired to a Linux input device, either as an
//! automated pass/fail sequence or by reporting a single press.

pub mod cli;
pub mod config;
pub mod logging;
pub mod report;
pub mod switch;
pub mod tests;
pub mod utils;

pub use config::Config;
