//! # Noun Core
//!
//! Values and native arithmetic for a tree-structured virtual machine.
//!
//! Every VM value is a *noun*: either an unsigned integer of unbounded size
//! (an *atom*) or a cell holding two nouns. Atoms are stored inline when they
//! fit a direct machine word and behind a shared big integer otherwise, and
//! they are always kept in that canonical form.
//!
//! ## Features
//!
//! - **Canonical atoms**: equal values always share a representation
//! - **Checked subtraction**: underflow is an ordinary, labelled failure
//! - **Native gates**: operands are read straight out of the gate core
//! - **no_std**: builds with `alloc` only on `target_os = "none"`
//!
//! ## Example
//!
//! ```
//! use noun_core::{Atom, Interpreter, Noun, execute_string, subtract};
//!
//! let difference = subtract(&Atom::new(5), &Atom::new(3)).unwrap();
//! assert_eq!(difference, Atom::new(2));
//!
//! let interp = Interpreter::new();
//! let product = execute_string("sub 1.000 1", &interp).unwrap();
//! assert_eq!(product, Noun::from(999u64));
//! ```

#![cfg_attr(target_os = "none", no_std)]

#[cfg(target_os = "none")]
extern crate alloc;

// Public modules
pub mod value;
pub mod frame;
pub mod interpreter;
pub mod tokenizer;
pub mod parser;
pub mod builtins;
pub mod evaluator;
pub mod primitives;

// Internal module
mod compat;

// Re-exports for convenience
pub use interpreter::{DictEntry, Interpreter, NativeFn};
pub use value::{Atom, Bail, DIRECT_BITS, DIRECT_MAX, Noun, RuntimeError, Underflow};
pub use primitives::minus::{subtract, subtract_gate, subtract_owned};
pub use parser::parse_noun;
pub use evaluator::execute_string;
