//! Application state module

mod forms;
mod wizard;

pub use forms::*;
pub use wizard::*;
