//! Formula lexer
//!
//! Turns a normalized formula string (leading `=` already stripped, smart
//! quotes already straightened) into a flat token stream.

use crate::error::CompileError;
use crate::token::{BinOp, Token};

/// Tokenize a normalized formula string
pub fn tokenize(input: &str) -> Result<Vec<Token>, CompileError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn next_token(&mut self) -> Result<Option<Token>, CompileError> {
        self.skip_whitespace();

        let c = match self.peek_char() {
            Some(c) => c,
            None => return Ok(None),
        };

        if let Some(op) = BinOp::from_char(c) {
            self.advance();
            return Ok(Some(Token::Op(op)));
        }

        match c {
            '(' => {
                self.advance();
                Ok(Some(Token::LeftParen))
            }
            ')' => {
                self.advance();
                Ok(Some(Token::RightParen))
            }
            '{' => self.scan_field().map(Some),
            '"' => self.scan_string().map(Some),
            _ if c.is_ascii_digit() || c == '.' => self.scan_number().map(Some),
            _ => Err(CompileError::UnexpectedChar(c)),
        }
    }

    /// Read `{...}` into a `Field` token; the inner text is trimmed
    fn scan_field(&mut self) -> Result<Token, CompileError> {
        self.advance(); // Skip opening brace

        let start = self.pos;
        loop {
            match self.peek_char() {
                Some('}') => break,
                Some(_) => self.advance(),
                None => return Err(CompileError::UnmatchedBrace),
            }
        }

        let name = self.input[start..self.pos].trim();
        self.advance(); // Skip closing brace

        if name.is_empty() {
            return Err(CompileError::EmptyField);
        }
        Ok(Token::Field(name.to_string()))
    }

    /// Read a double-quoted string literal with `\" \\ \n \t \r` escapes;
    /// any other escaped character is taken literally
    fn scan_string(&mut self) -> Result<Token, CompileError> {
        self.advance(); // Skip opening quote

        let mut text = String::new();
        loop {
            let c = match self.peek_char() {
                Some(c) => c,
                None => return Err(CompileError::UnterminatedString),
            };
            self.advance();

            match c {
                '"' => return Ok(Token::String(text)),
                '\\' => {
                    let escaped = match self.peek_char() {
                        Some(e) => e,
                        None => return Err(CompileError::UnterminatedString),
                    };
                    self.advance();
                    text.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        other => other,
                    });
                }
                _ => text.push(c),
            }
        }
    }

    /// Greedily read digits with at most one `.`
    fn scan_number(&mut self) -> Result<Token, CompileError> {
        let start = self.pos;
        let mut saw_digit = false;
        let mut saw_dot = false;

        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                saw_digit = true;
                self.advance();
            } else if c == '.' && !saw_dot {
                saw_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        if !saw_digit {
            return Err(CompileError::UnexpectedChar('.'));
        }

        let literal = &self.input[start..self.pos];
        match literal.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Token::Number(n)),
            _ => Err(CompileError::NumericOutOfRange(literal.to_string())),
        }
    }

    // === Cursor helpers ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek_char(), Some(' ' | '\t' | '\r' | '\n')) {
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tokenize_arithmetic() {
        let tokens = tokenize("1 + 2 * 3").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(1.0),
                Token::Op(BinOp::Add),
                Token::Number(2.0),
                Token::Op(BinOp::Mul),
                Token::Number(3.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_field() {
        let tokens = tokenize("{price} / {  qty  }").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Field("price".into()),
                Token::Op(BinOp::Div),
                Token::Field("qty".into()),
            ]
        );
    }

    #[test]
    fn test_field_errors() {
        assert_eq!(tokenize("{price"), Err(CompileError::UnmatchedBrace));
        assert_eq!(tokenize("{}"), Err(CompileError::EmptyField));
        assert_eq!(tokenize("{   }"), Err(CompileError::EmptyField));
    }

    #[test]
    fn test_string_escapes() {
        let tokens = tokenize(r#""a\"b\\c\nd\te\rf""#).unwrap();
        assert_eq!(tokens, vec![Token::String("a\"b\\c\nd\te\rf".into())]);

        // Unknown escapes keep the escaped character
        let tokens = tokenize(r#""\q\{""#).unwrap();
        assert_eq!(tokens, vec![Token::String("q{".into())]);
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(tokenize("\"abc"), Err(CompileError::UnterminatedString));
        assert_eq!(tokenize("\"abc\\"), Err(CompileError::UnterminatedString));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(tokenize("42").unwrap(), vec![Token::Number(42.0)]);
        assert_eq!(tokenize("3.14").unwrap(), vec![Token::Number(3.14)]);
        assert_eq!(tokenize(".5").unwrap(), vec![Token::Number(0.5)]);
        assert_eq!(tokenize("5.").unwrap(), vec![Token::Number(5.0)]);
    }

    #[test]
    fn test_number_with_second_dot_splits() {
        // The scanner stops at the second dot; the remainder becomes its own literal
        let tokens = tokenize("1.2.3").unwrap();
        assert_eq!(tokens, vec![Token::Number(1.2), Token::Number(0.3)]);
    }

    #[test]
    fn test_bare_dot_rejected() {
        assert_eq!(tokenize("."), Err(CompileError::UnexpectedChar('.')));
    }

    #[test]
    fn test_out_of_range_literal() {
        // 400 digits parses to infinity
        let literal = "9".repeat(400);
        let err = tokenize(&literal).unwrap_err();
        assert_eq!(err, CompileError::NumericOutOfRange(literal));
    }

    #[test]
    fn test_unexpected_char_reports_offender() {
        assert_eq!(tokenize("1 % 2"), Err(CompileError::UnexpectedChar('%')));
        assert_eq!(tokenize("a"), Err(CompileError::UnexpectedChar('a')));
    }

    #[test]
    fn test_whitespace_skipped() {
        let tokens = tokenize(" \t1\r\n+\n2 ").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Number(1.0), Token::Op(BinOp::Add), Token::Number(2.0)]
        );
    }
}
