// Tokenizer for noun text with complete position tracking
use crate::compat::{String, Vec, fmt, format};
use crate::value::{Atom, RuntimeError};

use num_bigint::BigUint;

// RUST CONCEPT: Source position for rich error messages
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePos {
    pub line: usize,
    pub column: usize,
    pub offset: usize, // Byte offset from start of input
}

impl SourcePos {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

// RUST CONCEPT: Token with embedded source position
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: SourcePos,
    pub end_pos: SourcePos,
}

impl Token {
    pub fn new(kind: TokenKind, pos: SourcePos, end_pos: SourcePos) -> Self {
        Self { kind, pos, end_pos }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Atom(Atom),   // Numeric literal: 42, 1.000.000, 0xff
    Word(String), // Name of a native gate or command
    LeftBracket,
    RightBracket,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Atom(a) => write!(f, "{}", a),
            TokenKind::Word(w) => write!(f, "{}", w),
            TokenKind::LeftBracket => write!(f, "["),
            TokenKind::RightBracket => write!(f, "]"),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

// Decimal with optional dot grouping: 1.000.000 (every group after the first has 3 digits)
fn parse_decimal(text: &str) -> Option<BigUint> {
    let mut groups = text.split('.');
    let first = groups.next()?;
    let rest: Vec<&str> = groups.collect();

    if first.is_empty() || !first.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !rest.is_empty() {
        if first.len() > 3 || (first.starts_with('0') && first.len() > 1) {
            return None;
        }
        if rest.iter().any(|g| g.len() != 3 || !g.bytes().all(|b| b.is_ascii_digit())) {
            return None;
        }
    }

    let digits: String = text.chars().filter(|c| *c != '.').collect();
    BigUint::parse_bytes(digits.as_bytes(), 10)
}

fn parse_atom_literal(text: &str) -> Option<Atom> {
    let big = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        // parse_bytes alone would let a sign or '_' separators through
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        BigUint::parse_bytes(hex.as_bytes(), 16)?
    } else {
        parse_decimal(text)?
    };
    Some(Atom::from_big(big))
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, RuntimeError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();
    let mut line = 1;
    let mut column = 1;
    let mut offset = 0;

    // Helper function to advance position tracking
    fn advance_pos(ch: char, line: &mut usize, column: &mut usize, offset: &mut usize) {
        if ch == '\n' {
            *line += 1;
            *column = 1;
        } else {
            *column += 1;
        }
        *offset += ch.len_utf8();
    }

    while let Some(&ch) = chars.peek() {
        let start = SourcePos::new(line, column, offset);
        match ch {
            c if c.is_whitespace() => {
                chars.next();
                advance_pos(c, &mut line, &mut column, &mut offset);
            }
            '[' | ']' => {
                chars.next();
                advance_pos(ch, &mut line, &mut column, &mut offset);
                let kind = if ch == '[' {
                    TokenKind::LeftBracket
                } else {
                    TokenKind::RightBracket
                };
                tokens.push(Token::new(kind, start, SourcePos::new(line, column, offset)));
            }
            _ => {
                let mut text = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || c == '[' || c == ']' {
                        break;
                    }
                    text.push(c);
                    chars.next();
                    advance_pos(c, &mut line, &mut column, &mut offset);
                }

                // Hoon-style line comment
                if text.starts_with("::") {
                    while let Some(&c) = chars.peek() {
                        if c == '\n' {
                            break;
                        }
                        chars.next();
                        advance_pos(c, &mut line, &mut column, &mut offset);
                    }
                    continue;
                }

                let kind = if text.starts_with(|c: char| c.is_ascii_digit()) {
                    match parse_atom_literal(&text) {
                        Some(atom) => TokenKind::Atom(atom),
                        None => {
                            return Err(RuntimeError::Parse {
                                pos: start,
                                message: format!("invalid atom literal '{}'", text),
                            });
                        }
                    }
                } else {
                    TokenKind::Word(text)
                };
                tokens.push(Token::new(kind, start, SourcePos::new(line, column, offset)));
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize_atoms() {
        assert_eq!(kinds("42"), vec![TokenKind::Atom(Atom::new(42))]);
        assert_eq!(kinds("1.000.000"), vec![TokenKind::Atom(Atom::new(1_000_000))]);
        assert_eq!(kinds("0xff"), vec![TokenKind::Atom(Atom::new(255))]);

        let big = kinds("18446744073709551616");
        match &big[0] {
            TokenKind::Atom(a) => {
                assert!(!a.is_small());
                assert_eq!(a.bit_len(), 65);
            }
            other => panic!("Expected atom, got {:?}", other),
        }
    }

    #[test]
    fn test_tokenize_rejects_bad_literals() {
        assert!(tokenize("1.00").is_err());
        assert!(tokenize("1000.000").is_err());
        assert!(tokenize("0x").is_err());
        assert!(tokenize("12ab").is_err());
        assert!(tokenize("0x+ff").is_err());
        assert!(tokenize("0xf_f").is_err());
        assert!(tokenize("0x_").is_err());
        assert!(tokenize("0x-1").is_err());
        assert_eq!(kinds("0XfF"), vec![TokenKind::Atom(Atom::new(255))]);
    }

    #[test]
    fn test_tokenize_brackets_and_words() {
        assert_eq!(
            kinds("sub [5 3]"),
            vec![
                TokenKind::Word("sub".to_string()),
                TokenKind::LeftBracket,
                TokenKind::Atom(Atom::new(5)),
                TokenKind::Atom(Atom::new(3)),
                TokenKind::RightBracket,
            ]
        );
    }

    #[test]
    fn test_tokenize_comments() {
        assert_eq!(
            kinds("5 :: the minuend\n3"),
            vec![TokenKind::Atom(Atom::new(5)), TokenKind::Atom(Atom::new(3))]
        );
    }

    #[test]
    fn test_tokenize_position_tracking() {
        let tokens = tokenize("sub\n  [7").unwrap();
        assert_eq!(tokens[0].pos, SourcePos::new(1, 1, 0));
        assert_eq!(tokens[0].end_pos, SourcePos::new(1, 4, 3));
        assert_eq!(tokens[1].pos, SourcePos::new(2, 3, 6));
        assert_eq!(tokens[2].pos, SourcePos::new(2, 4, 7));
    }

    #[test]
    fn test_tokenize_error_position() {
        match tokenize("sub 5 9z") {
            Err(RuntimeError::Parse { pos, .. }) => assert_eq!(pos.column, 7),
            other => panic!("Expected parse error, got {:?}", other),
        }
    }
}
