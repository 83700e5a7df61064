//! The single-pass argument parser.
//!
//! Grammar:
//! - `tdo` / `tdo -l`                         list (the implicit default)
//! - `tdo -h`                                 help
//! - `tdo -a <title> [description]`           add
//! - `tdo -u <id> [-t title] [-d description]` update fields by id
//! - `tdo -d <id>...`                         delete by id
//! - `tdo -c <id>...`                         mark complete by id
//! - `tdo -r <id>...`                         mark incomplete by id

use std::str::FromStr;

use thiserror::Error;

use super::action::{Action, ActionFlag};
use super::cursor::Cursor;

/// Errors produced while turning raw arguments into an [`Action`].
///
/// Parsing never mutates anything, so every variant aborts the invocation
/// before any todo is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The leading token is not in the flag table.
    #[error("action not supported: `{0}`")]
    UnsupportedAction(String),
    /// A sub-parse started on a token other than its own flag.
    #[error("wrong flag: expected `{}`, got {}", .expected, .actual.as_deref().unwrap_or("none"))]
    WrongFlag {
        expected: &'static str,
        actual: Option<String>,
    },
    /// A required value was absent.
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
}

/// Parses command-line tokens (program name already stripped) into exactly
/// one [`Action`].
///
/// Single pass, one token of lookahead, no backtracking. On failure no
/// partial result is returned, only the error.
pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Action, ParseError> {
    let tokens: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    let mut cursor = Cursor::new(&tokens);

    let Some(first) = cursor.peek() else {
        return Ok(Action::List);
    };

    match ActionFlag::from_str(first) {
        Ok(ActionFlag::Help) => parse_help(&mut cursor),
        Ok(ActionFlag::List) => parse_list(&mut cursor),
        Ok(ActionFlag::Add) => parse_add(&mut cursor),
        Ok(ActionFlag::Update) => parse_update(&mut cursor),
        Ok(ActionFlag::Delete) => parse_delete(&mut cursor),
        Ok(ActionFlag::MarkComplete) => parse_mark_complete(&mut cursor),
        Ok(ActionFlag::MarkIncomplete) => parse_mark_incomplete(&mut cursor),
        Err(_) => Err(ParseError::UnsupportedAction(first.to_string())),
    }
}

fn parse_help(cursor: &mut Cursor<'_>) -> Result<Action, ParseError> {
    expect_flag(cursor, "-h")?;
    Ok(Action::Help)
}

/// Parses `-l`. Trailing tokens are ignored.
fn parse_list(cursor: &mut Cursor<'_>) -> Result<Action, ParseError> {
    expect_flag(cursor, "-l")?;
    Ok(Action::List)
}

/// Parses `-a <title> [description]`. Tokens after the description are
/// ignored.
fn parse_add(cursor: &mut Cursor<'_>) -> Result<Action, ParseError> {
    expect_flag(cursor, "-a")?;
    let title = cursor
        .advance()
        .ok_or(ParseError::MissingArgument("title"))?
        .to_string();
    let description = cursor.advance().map(str::to_string);
    Ok(Action::Add { title, description })
}

/// Parses `-u <id> [-t title] [-d description]`.
///
/// The flag-value pairs may repeat and appear in either order; a later
/// occurrence wins. Tokens in this position that are neither `-t` nor `-d`
/// are skipped, not rejected.
fn parse_update(cursor: &mut Cursor<'_>) -> Result<Action, ParseError> {
    expect_flag(cursor, "-u")?;
    let id = cursor
        .advance()
        .ok_or(ParseError::MissingArgument("id"))?
        .to_string();
    if cursor.peek().is_none() {
        return Err(ParseError::MissingArgument("expected `-t` or `-d` flag"));
    }

    let mut title = None;
    let mut description = None;
    while let Some(token) = cursor.advance() {
        match token {
            "-t" => {
                let value = cursor
                    .advance()
                    .ok_or(ParseError::MissingArgument("title"))?;
                title = Some(value.to_string());
            }
            "-d" => {
                let value = cursor
                    .advance()
                    .ok_or(ParseError::MissingArgument("description"))?;
                description = Some(value.to_string());
            }
            _ => {}
        }
    }

    Ok(Action::Update {
        id,
        title,
        description,
    })
}

fn parse_delete(cursor: &mut Cursor<'_>) -> Result<Action, ParseError> {
    expect_flag(cursor, "-d")?;
    Ok(Action::Delete {
        ids: parse_ids(cursor)?,
    })
}

fn parse_mark_complete(cursor: &mut Cursor<'_>) -> Result<Action, ParseError> {
    expect_flag(cursor, "-c")?;
    Ok(Action::MarkComplete {
        ids: parse_ids(cursor)?,
    })
}

fn parse_mark_incomplete(cursor: &mut Cursor<'_>) -> Result<Action, ParseError> {
    expect_flag(cursor, "-r")?;
    Ok(Action::MarkIncomplete {
        ids: parse_ids(cursor)?,
    })
}

/// Collects every remaining token as an id, order preserved. At least one
/// is required.
fn parse_ids(cursor: &mut Cursor<'_>) -> Result<Vec<String>, ParseError> {
    let mut ids = Vec::new();
    while let Some(token) = cursor.advance() {
        ids.push(token.to_string());
    }
    if ids.is_empty() {
        return Err(ParseError::MissingArgument("id"));
    }
    Ok(ids)
}

/// Consumes the current token, which must match `flag` exactly.
fn expect_flag(cursor: &mut Cursor<'_>, flag: &'static str) -> Result<(), ParseError> {
    match cursor.advance() {
        None => Err(ParseError::WrongFlag {
            expected: flag,
            actual: None,
        }),
        Some(token) if token != flag => Err(ParseError::WrongFlag {
            expected: flag,
            actual: Some(token.to_string()),
        }),
        Some(_) => Ok(()),
    }
}
