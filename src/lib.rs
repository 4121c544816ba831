//! grocery-csv - Convert saved grocery listing pages into a shared product CSV
//!
//! Each supported retailer gets a parser that maps its listing markup to
//! product records; all retailers append to the same ten-column CSV.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod retailer;
pub mod text;

pub use config::{Config, RetailerProfile};
pub use error::ConvertError;
pub use retailer::{Product, Retailer};
