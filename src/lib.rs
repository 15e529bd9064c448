//! Offerdeck — bank promotional-offer aggregation.
//!
//! Drives a headless browser to render each bank's offer listing, extracts
//! normalized offer records from the loaded markup, and serves the combined
//! result as an HTML report on a single endpoint.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod extract;
pub mod renderer;
pub mod report;
pub mod scroll;
pub mod server;
