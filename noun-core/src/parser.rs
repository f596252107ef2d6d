// Parser: turns tokens into nouns
// [a b c] is the right-associative cell [a [b c]]

use crate::compat::{String, Vec, format};
use crate::tokenizer::{SourcePos, Token, TokenKind, tokenize};
use crate::value::{Noun, RuntimeError};

fn parse_error(pos: SourcePos, message: String) -> RuntimeError {
    RuntimeError::Parse { pos, message }
}

struct Parser<'a> {
    tokens: &'a [Token],
    index: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, index: 0 }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.index)
    }

    // Position just past the last token, for errors at end of input
    fn end_pos(&self) -> SourcePos {
        self.tokens
            .last()
            .map(|t| t.end_pos.clone())
            .unwrap_or_else(|| SourcePos::new(1, 1, 0))
    }

    // RUST CONCEPT: Explicit stack instead of recursion
    // Each open '[' keeps its position and the nouns collected so far, so
    // nesting depth is bounded by memory rather than by the call stack.
    fn parse_noun(&mut self) -> Result<Noun, RuntimeError> {
        let mut open: Vec<(SourcePos, Vec<Noun>)> = Vec::new();

        loop {
            let Some(token) = self.peek() else {
                return Err(match open.last() {
                    Some((pos, _)) => parse_error(pos.clone(), "unclosed '['".into()),
                    None => parse_error(self.end_pos(), "expected a noun".into()),
                });
            };
            self.index += 1;

            let noun = match &token.kind {
                TokenKind::Atom(atom) => Noun::Atom(atom.clone()),
                TokenKind::LeftBracket => {
                    open.push((token.pos.clone(), Vec::new()));
                    continue;
                }
                TokenKind::RightBracket => {
                    let Some((pos, items)) = open.pop() else {
                        return Err(parse_error(token.pos.clone(), "unexpected ']'".into()));
                    };
                    if items.len() < 2 {
                        return Err(parse_error(pos, "a cell needs at least two nouns".into()));
                    }
                    // Non-empty, so the tuple always exists
                    Noun::tuple(items).ok_or_else(|| parse_error(pos, "empty cell".into()))?
                }
                TokenKind::Word(word) => {
                    return Err(parse_error(
                        token.pos.clone(),
                        format!("unexpected word '{}' inside a noun", word),
                    ));
                }
            };

            match open.last_mut() {
                Some((_, items)) => items.push(noun),
                None => return Ok(noun),
            }
        }
    }
}

/// Parse every noun in a token slice.
pub fn parse_nouns(tokens: &[Token]) -> Result<Vec<Noun>, RuntimeError> {
    let mut parser = Parser::new(tokens);
    let mut nouns = Vec::new();
    while parser.peek().is_some() {
        nouns.push(parser.parse_noun()?);
    }
    Ok(nouns)
}

/// Parse text holding exactly one noun.
pub fn parse_noun(input: &str) -> Result<Noun, RuntimeError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser::new(&tokens);
    let noun = parser.parse_noun()?;
    if let Some(extra) = parser.peek() {
        return Err(parse_error(
            extra.pos.clone(),
            format!("unexpected '{}' after noun", extra),
        ));
    }
    Ok(noun)
}
