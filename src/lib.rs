//! Purpose: Validating single-value JSON scalar parser shared by the `tinyjson` binaries and tests.
//! Exports: `api` (stable surface), `core` (parser internals), `notice`.
//! Role: Library backing the CLI and the conformance runner.
//! Invariants: Parsing is pure: no global state, no I/O, no allocation on the parse path.
//! Invariants: The first grammar violation ends a parse; there is no recovery.
pub mod api;
pub mod core;
pub mod notice;

pub use api::{
    ParseError, ParseStatus, Value, ValueType, get_number, get_type, parse, parse_into,
};
