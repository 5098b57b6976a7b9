// Value checks used by field rules
pub mod choice_field;
pub mod number_field;

pub use choice_field::ChoiceSet;
pub use number_field::{NumberError, NumberRange};
