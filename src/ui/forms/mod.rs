//! Form rendering module
//!
//! - `field_renderer`: single input box with its validation message
//! - `step_form`: the inputs of the contact, move details and address steps

mod field_renderer;
mod step_form;

pub use step_form::draw_step_form;
