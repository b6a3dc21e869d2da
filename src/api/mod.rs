//! Purpose: Define the stable public Rust API boundary for tinyjson.
//! Exports: Parser entry points, value/status types, errors, and the line-batch engine.
//! Role: Public, additive-only surface; hides the internal parser modules.
//! Invariants: This module is the only public path to parser primitives.
//! Invariants: Nothing exported here retains borrowed input beyond a call.

mod batch;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::parse::{parse, parse_into};
pub use crate::core::status::{ParseError, ParseStatus};
pub use crate::core::value::{Value, ValueType, get_number, get_type};
pub use batch::{BatchConfig, BatchFailure, BatchOutcome, ErrorPolicy, parse_lines};
