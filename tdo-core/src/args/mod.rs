//! Command-line argument parsing: a flat token list in, one [`Action`] out.

mod action;
mod cursor;
mod parser;

pub use action::{Action, ActionFlag};
pub use parser::{ParseError, parse};
