// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod file;
pub mod progress;
pub mod runner;
pub mod scrape;
pub mod store;
pub mod table;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, ParseError, Result};
