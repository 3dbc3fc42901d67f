use std::fmt::{self, Display};
use std::result;

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, PartialEq, Clone)]
#[non_exhaustive]
pub enum ErrorKind {
    UnexpectedCharacter { line: usize },
    UnterminatedString { line: usize },
}

#[derive(Debug, PartialEq, Clone)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub fn unexpected_character(line: usize, c: char) -> Error {
        let kind = ErrorKind::UnexpectedCharacter { line };
        Error { kind, message: format!("Unexpected character '{}'.", c) }
    }

    pub fn unterminated_string(line: usize) -> Error {
        let kind = ErrorKind::UnterminatedString { line };
        Error { kind, message: "Unterminated string literal.".into() }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn line(&self) -> usize {
        use ErrorKind::*;
        match self.kind {
            UnexpectedCharacter { line } => line,
            UnterminatedString { line } => line,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error: {}", self.line(), self.message)
    }
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> std::io::Error {
        use std::io::ErrorKind::*;
        std::io::Error::new(Other, e)
    }
}
