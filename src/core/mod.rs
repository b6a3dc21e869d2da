// Core modules implementing the scalar parser and error modeling.
pub mod cursor;
pub mod error;
pub mod literal;
pub mod number;
pub mod parse;
pub mod status;
pub mod value;
