//! Integrate module - External integration features
//!
//! - Listing mode: print one directory of a revision to stdout (--list)

pub mod listing;

pub use listing::{exit_code, listing_line, output_listing, write_listing, OutputFormat};
