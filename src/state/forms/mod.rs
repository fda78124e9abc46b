//! Quote form domain layer
//!
//! Field value objects and the quote form with its per-step validation.

mod field;
mod quote_form;

pub use field::{FieldId, FormField};
pub use quote_form::{MoveType, QuoteForm};
