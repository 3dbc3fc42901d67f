use crate::{
    error::{Error, Result},
    token::{Token, TokenKind},
};
use peekmore::{PeekMore, PeekMoreIterator};
use phf::phf_map;
use std::str::Chars;

static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "and" => TokenKind::And,
    "class" => TokenKind::Class,
    "else" => TokenKind::Else,
    "false" => TokenKind::False,
    "for" => TokenKind::For,
    "fun" => TokenKind::Fun,
    "if" => TokenKind::If,
    "nil" => TokenKind::Nil,
    "or" => TokenKind::Or,
    "print" => TokenKind::Print,
    "return" => TokenKind::Return,
    "super" => TokenKind::Super,
    "this" => TokenKind::This,
    "true" => TokenKind::True,
    "var" => TokenKind::Var,
    "while" => TokenKind::While,
};

pub struct Scanner<'a> {
    src: PeekMoreIterator<Chars<'a>>,
    lexeme_buffer: String,
    line: usize,
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token>;

    // Skipped input (whitespace, newlines, comments) is handled with a loop
    // rather than recursion, so arbitrarily long token-free runs stay in
    // constant stack space.
    fn next(&mut self) -> Option<Result<Token>> {
        loop {
            // Tokens report the line their first character sits on, even
            // when a string literal pushes the counter past it.
            let line = self.line;
            let next_char = self.src.next()?;
            self.lexeme_buffer.push(next_char);

            let kind = self.token_kind_from_char(next_char);

            let lexeme = self.lexeme_buffer.clone();
            self.lexeme_buffer.clear();

            if let Some(kind) = kind {
                return Some(kind.map(|kind| Token {
                    kind,
                    lexeme,
                    line,
                }));
            }
        }
    }
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src: src.chars().peekmore(),
            lexeme_buffer: String::new(),
            line: 1,
        }
    }

    pub fn scan_tokens(mut self) -> (Vec<Token>, Vec<Error>) {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        while let Some(next) = self.next() {
            match next {
                Ok(token) => tokens.push(token),
                Err(e) => errors.push(e),
            }
        }

        tokens.push(Token {
            kind: TokenKind::EndOfInput,
            lexeme: "".to_string(),
            line: self.line,
        });
        (tokens, errors)
    }

    fn token_kind_from_char(&mut self, c: char) -> Option<Result<TokenKind>> {
        use TokenKind::*;
        match c {
            '(' => Some(Ok(LeftParen)),
            ')' => Some(Ok(RightParen)),
            '{' => Some(Ok(LeftBrace)),
            '}' => Some(Ok(RightBrace)),
            ',' => Some(Ok(Comma)),
            '.' => Some(Ok(Dot)),
            '-' => Some(Ok(Minus)),
            '+' => Some(Ok(Plus)),
            ';' => Some(Ok(Semicolon)),
            '*' => Some(Ok(Star)),
            '!' => Some(Ok(if self.does_next_match('=') { BangEqual } else { Bang })),
            '=' => Some(Ok(if self.does_next_match('=') { EqualEqual } else { Equal })),
            '<' => Some(Ok(if self.does_next_match('=') { LessEqual } else { Less })),
            '>' => Some(Ok(if self.does_next_match('=') { GreaterEqual } else { Greater })),
            '/' => {
                if self.does_next_match('/') { // is this a comment?
                    self.advance_until_match('\n');
                    None
                } else {
                    Some(Ok(Slash))
                }
            },
            ' ' | '\r' | '\t' => None,
            '\n' => {
                self.line += 1;
                None
            },
            '"' => Some(self.extract_string()),
            c if c.is_digit(10) => Some(Ok(self.extract_number())),
            c if can_start_identifier(&c) => Some(Ok(self.extract_identifier())),
            _ => Some(Err(Error::unexpected_character(self.line, c))),
        }
    }

    fn does_next_match(&mut self, c: char) -> bool {
        match self.src.peek() {
            Some(next) if c == *next => {
                self.lexeme_buffer.push(self.src.next().unwrap());
                true
            }
            _ => false,
        }
    }

    fn extract_string(&mut self) -> Result<TokenKind> {
        let opening_line = self.line;
        let mut newline_count = 0;
        self.advance_until_match_for_each('"', |c| if c == '\n' { newline_count += 1 });
        self.line += newline_count;
        match self.src.next() {
            None => Err(Error::unterminated_string(opening_line)),
            Some(q) => { // q here must be " due to advance_until_match_for_each
                self.lexeme_buffer.push(q);
                Ok(TokenKind::String(self.lexeme_buffer.trim_matches('"').to_string()))
            },
        }
    }

    fn extract_number(&mut self) -> TokenKind {
        self.advance_until(|n| !n.is_digit(10));

        // Only consume a '.' when a digit follows it, so `123.` scans as
        // the number 123 and leaves the dot for the next token.
        if let Some(&'.') = self.src.peek() {
            if let Some(maybe_digit) = self.src.peek_next() {
                if maybe_digit.is_digit(10) {
                    self.lexeme_buffer.push(self.src.next().unwrap());
                    self.advance_until(|n| !n.is_digit(10));
                }
            }
        }

        // The lexeme is a digit run with at most one interior '.', which
        // always parses.
        TokenKind::Number(self.lexeme_buffer.parse().unwrap_or(0.0))
    }

    fn extract_identifier(&mut self) -> TokenKind {
        self.advance_until(|n| !is_part_of_valid_identifier(n));

        let text = self.lexeme_buffer.as_str();
        match KEYWORDS.get(text) {
            Some(keyword) => keyword.clone(),
            None => TokenKind::Identifier,
        }
    }

    fn advance_until_match(&mut self, c: char) {
        self.advance_until(|n| n == &c)
    }

    fn advance_until(&mut self, should_stop: impl Fn(&char) -> bool) {
        self.advance_until_for_each(should_stop, |_| {})
    }

    fn advance_until_match_for_each(
        &mut self,
        c: char,
        f: impl FnMut(char) -> ()
    ) {
        self.advance_until_for_each(|n| n == &c, f);
    }

    fn advance_until_for_each(
        &mut self,
        should_stop: impl Fn(&char) -> bool,
        mut f: impl FnMut(char) -> ()
    ) {
        let is_done = |nxt: Option<&char>| nxt.is_none() || should_stop(nxt.unwrap());
        while !is_done(self.src.peek()) {
            let next = self.src.next().unwrap();
            self.lexeme_buffer.push(next);
            f(next);
        }
    }
}

fn can_start_identifier(c: &char) -> bool {
    c.is_ascii_alphabetic() || c == &'_'
}

fn is_part_of_valid_identifier(c: &char) -> bool {
    can_start_identifier(c) || c.is_digit(10)
}
