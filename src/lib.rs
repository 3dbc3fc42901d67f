pub mod error;
pub mod scanner;
pub mod token;

pub use crate::error::{Error, ErrorKind, Result};
pub use crate::scanner::Scanner;
pub use crate::token::{Token, TokenKind};
