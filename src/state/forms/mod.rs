//! Form domain layer
//!
//! Type-safe form handling for the pass creation view.

mod field;
mod form_state;

pub use field::FormField;
pub use form_state::{FieldName, Form, FormButton, PassForm, BUTTONS_ROW};
