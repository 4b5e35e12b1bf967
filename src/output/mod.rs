//! Output formatting for subnet plans.
//!
//! This module handles rendering a [`Report`](crate::Report):
//! - [`json`] - JSON output
//! - [`terminal`] - Terminal output with colors

mod json;
mod terminal;

pub use json::render_json;
pub use terminal::{
    format_field, render_address, render_base, render_input_error, render_mask,
    render_partition, render_report, render_subnets, subnet_row,
};
