// Evaluator: runs one line of input against the native gate dictionary
//
//   <word> <noun>...        sample is the tuple of the arguments
//   call <word> <core>      the noun is passed through as the whole gate core

use crate::compat::{Vec, format};
use crate::frame::gate_core;
use crate::interpreter::Interpreter;
use crate::parser::parse_nouns;
use crate::tokenizer::{SourcePos, Token, TokenKind, tokenize};
use crate::value::{Atom, Noun, RuntimeError};

fn expect_word(token: Option<&Token>) -> Result<&str, RuntimeError> {
    match token {
        Some(Token { kind: TokenKind::Word(word), .. }) => Ok(word.as_str()),
        Some(other) => Err(RuntimeError::Parse {
            pos: other.pos.clone(),
            message: format!("expected a word, found '{}'", other),
        }),
        None => Err(RuntimeError::Parse {
            pos: SourcePos::new(1, 1, 0),
            message: "expected a word".into(),
        }),
    }
}

// RUST CONCEPT: A unary gate still takes a sample
// No arguments gives the sample 0, which binary gates reject with an exit.
fn sample_from_args(args: Vec<Noun>) -> Noun {
    Noun::tuple(args).unwrap_or(Noun::Atom(Atom::ZERO))
}

pub fn execute_string(input: &str, interp: &Interpreter) -> Result<Noun, RuntimeError> {
    let tokens = tokenize(input)?;
    let word = expect_word(tokens.first())?;

    if word == "call" {
        let gate = expect_word(tokens.get(1))?;
        let mut args = parse_nouns(&tokens[2..])?;
        if args.len() != 1 {
            return Err(RuntimeError::Parse {
                pos: tokens[1].end_pos.clone(),
                message: format!("'call' takes exactly one core, got {}", args.len()),
            });
        }
        let core = args.remove(0);
        return interp.call(gate, &core);
    }

    let args = parse_nouns(&tokens[1..])?;
    let core = gate_core(Noun::Atom(Atom::ZERO), sample_from_args(args), Noun::Atom(Atom::ZERO));
    interp.call(word, &core)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Bail;

    #[test]
    fn test_execute_word_with_args() {
        let interp = Interpreter::new();
        assert_eq!(execute_string("sub 5 3", &interp).unwrap(), Noun::from(2u64));
        assert_eq!(execute_string("sub [5 3]", &interp).unwrap(), Noun::from(2u64));
    }

    #[test]
    fn test_execute_call_with_raw_core() {
        let interp = Interpreter::new();
        let product = execute_string("call sub [[1 2] [9 4] 7]", &interp).unwrap();
        assert_eq!(product, Noun::from(5u64));
    }

    #[test]
    fn test_execute_reports_bails() {
        let interp = Interpreter::new();
        match execute_string("sub 3 5", &interp) {
            Err(RuntimeError::Bail(Bail::Fail(label))) => assert_eq!(label, "subtract-underflow"),
            other => panic!("Expected underflow, got {:?}", other),
        }
        match execute_string("sub", &interp) {
            Err(RuntimeError::Bail(Bail::Exit)) => {}
            other => panic!("Expected exit, got {:?}", other),
        }
    }

    #[test]
    fn test_execute_syntax_errors() {
        let interp = Interpreter::new();
        assert!(matches!(execute_string("", &interp), Err(RuntimeError::Parse { .. })));
        assert!(matches!(execute_string("5 3", &interp), Err(RuntimeError::Parse { .. })));
        assert!(matches!(execute_string("call", &interp), Err(RuntimeError::Parse { .. })));
        assert!(matches!(execute_string("call sub 1 2", &interp), Err(RuntimeError::Parse { .. })));
        assert!(matches!(execute_string("nope 1", &interp), Err(RuntimeError::UndefinedWord(_))));
    }
}
