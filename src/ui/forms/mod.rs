//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `pass_form`: The pass creation form

mod field_renderer;
mod pass_form;

pub use pass_form::draw as draw_pass_form;
