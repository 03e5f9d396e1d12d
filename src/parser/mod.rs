//! Source parser.
//!
//! Turns raw text into a [`SourceFile`] tree:
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Lexemes (kind, text, range)
//!     ↓
//! Recursive descent → Node arena inside a SourceFile
//! ```
//!
//! The parser is deliberately shallow. It recognises declarations
//! (namespaces, classes, members, locals) precisely enough to give every
//! node a correct range, and treats expressions as opaque token runs.
//! Anything it cannot make sense of is skipped to the next `;` or balanced
//! `}` and reported as a [`SyntaxError`](crate::syntax::SyntaxError).

mod lexer;
#[allow(clippy::module_inception)]
mod parser;

use std::path::PathBuf;

use thiserror::Error;

use crate::base::{FileId, TextSize};
use crate::syntax::SourceFile;

pub use lexer::{Lexeme, Token, tokenize};

/// Input the lexer cannot tokenize. Fatal for the file being parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid token at offset {offset:?}")]
    InvalidToken { offset: TextSize },
}

/// The parser collaborator: fills an empty [`SourceFile`] from text.
///
/// Implementations must produce well-formed ranges (children inside their
/// parent, siblings disjoint) and express types as compound names.
pub trait SourceParser: Send + Sync {
    fn parse_into(&self, text: &str, file: &mut SourceFile) -> Result<(), ParseError>;
}

/// The built-in recursive-descent parser.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultParser;

impl SourceParser for DefaultParser {
    fn parse_into(&self, text: &str, file: &mut SourceFile) -> Result<(), ParseError> {
        let tokens = tokenize(text).map_err(|offset| ParseError::InvalidToken { offset })?;
        parser::Parser::new(&tokens, file).parse_file();
        file.finish(text);
        Ok(())
    }
}

/// Parse `text` into a fresh file with the default parser.
pub fn parse(
    file_id: FileId,
    path: impl Into<PathBuf>,
    text: &str,
) -> Result<SourceFile, ParseError> {
    let mut file = SourceFile::new(file_id, path);
    DefaultParser.parse_into(text, &mut file)?;
    Ok(file)
}
