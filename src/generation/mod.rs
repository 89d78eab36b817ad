//! Text and structured output generation.

pub mod object;
pub mod text;

pub use object::{generate_object, strip_code_fences};
pub use text::generate_text;
