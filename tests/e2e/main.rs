//! End-to-end tests for the revtree binary

mod cli_basic;
mod list_mode;
mod support;
