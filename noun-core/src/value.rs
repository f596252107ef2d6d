use crate::compat::{Arc, String, Vec, fmt};
use crate::tokenizer::SourcePos;

use core::cmp::Ordering;
use num_bigint::BigUint;
use num_traits::ToPrimitive;

// RUST CONCEPT: Direct atom width is a build-time constant
// Everything at or below DIRECT_MAX is stored inline; everything above lives
// behind a shared BigUint. Select the narrow width with the `direct-31` feature.
#[cfg(not(feature = "direct-31"))]
pub const DIRECT_BITS: u32 = 63;
#[cfg(feature = "direct-31")]
pub const DIRECT_BITS: u32 = 31;

/// Largest value an atom can hold in small (direct) form.
pub const DIRECT_MAX: u64 = (1u64 << DIRECT_BITS) - 1;

/// An immutable, unsigned integer of unbounded size.
///
/// Atoms are always canonical: a value that fits in `DIRECT_MAX` is never
/// stored in large form, so two atoms are structurally equal exactly when
/// they are numerically equal.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Atom(Repr);

// RUST CONCEPT: Private representation enforces the canonical form
// Outside this module an atom can only be built through `Atom::new` or
// `Atom::from_big`, both of which normalize.
#[derive(Clone, PartialEq, Eq, Hash)]
enum Repr {
    Small(u64),
    Large(Arc<BigUint>),
}

impl Atom {
    pub const ZERO: Atom = Atom(Repr::Small(0));

    pub fn new(n: u64) -> Self {
        if n <= DIRECT_MAX {
            Atom(Repr::Small(n))
        } else {
            Atom(Repr::Large(Arc::new(BigUint::from(n))))
        }
    }

    /// Consume a working big integer and return it in canonical form.
    pub fn from_big(big: BigUint) -> Self {
        match big.to_u64() {
            // `big` is dropped here; only the inline word survives
            Some(n) if n <= DIRECT_MAX => Atom(Repr::Small(n)),
            _ => Atom(Repr::Large(Arc::new(big))),
        }
    }

    /// Fresh big-integer copy of this atom, whatever its form.
    pub fn to_big(&self) -> BigUint {
        match &self.0 {
            Repr::Small(n) => BigUint::from(*n),
            Repr::Large(big) => BigUint::clone(big),
        }
    }

    pub fn is_small(&self) -> bool {
        matches!(self.0, Repr::Small(_))
    }

    pub fn as_small(&self) -> Option<u64> {
        match self.0 {
            Repr::Small(n) => Some(n),
            Repr::Large(_) => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self.0, Repr::Small(0))
    }

    /// Number of significant bits (zero for the atom 0).
    pub fn bit_len(&self) -> u64 {
        match &self.0 {
            Repr::Small(n) => u64::from(64 - n.leading_zeros()),
            Repr::Large(big) => big.bits(),
        }
    }

    /// Live handles to the large-form storage, `None` for small atoms.
    pub fn share_count(&self) -> Option<usize> {
        match &self.0 {
            Repr::Small(_) => None,
            Repr::Large(big) => Some(Arc::strong_count(big)),
        }
    }
}

impl Default for Atom {
    fn default() -> Self {
        Atom::ZERO
    }
}

impl From<u64> for Atom {
    fn from(n: u64) -> Self {
        Atom::new(n)
    }
}

impl From<u32> for Atom {
    fn from(n: u32) -> Self {
        Atom::new(u64::from(n))
    }
}

impl From<BigUint> for Atom {
    fn from(big: BigUint) -> Self {
        Atom::from_big(big)
    }
}

impl Ord for Atom {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.0, &other.0) {
            (Repr::Small(a), Repr::Small(b)) => a.cmp(b),
            // Canonical form: every large atom exceeds every small one
            (Repr::Small(_), Repr::Large(_)) => Ordering::Less,
            (Repr::Large(_), Repr::Small(_)) => Ordering::Greater,
            (Repr::Large(a), Repr::Large(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Atom {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Small(n) => write!(f, "Small({})", n),
            Repr::Large(big) => write!(f, "Large({})", big),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Small(n) => write!(f, "{}", n),
            Repr::Large(big) => write!(f, "{}", big),
        }
    }
}

/// A VM value: an atom or an ordered pair of nouns.
#[derive(Clone)]
pub enum Noun {
    Atom(Atom),
    Cell(Arc<Cell>),
}

/// The shared body of a cell noun.
#[derive(Clone)]
pub struct Cell {
    head: Noun,
    tail: Noun,
}

impl Cell {
    pub fn head(&self) -> &Noun {
        &self.head
    }

    pub fn tail(&self) -> &Noun {
        &self.tail
    }
}

// RUST CONCEPT: Iterative drop for deep trees
// The default drop glue recurses once per nesting level, so a long tuple
// would exhaust the stack. Uniquely owned children are detached and freed
// from a work list instead; shared children only lose one reference.
impl Drop for Cell {
    fn drop(&mut self) {
        if self.head.is_atom() && self.tail.is_atom() {
            return;
        }

        let mut pending = Vec::new();
        pending.push(core::mem::take(&mut self.head));
        pending.push(core::mem::take(&mut self.tail));

        while let Some(noun) = pending.pop() {
            if let Noun::Cell(cell) = noun
                && let Some(mut cell) = Arc::into_inner(cell)
            {
                pending.push(core::mem::take(&mut cell.head));
                pending.push(core::mem::take(&mut cell.tail));
                // `cell` now holds two atoms and drops without recursing
            }
        }
    }
}

impl Noun {
    pub fn cell(head: Noun, tail: Noun) -> Self {
        Noun::Cell(Arc::new(Cell { head, tail }))
    }

    // RUST CONCEPT: Right-associative tuple construction
    // [a b c] is [a [b c]]; a single item is the item itself
    pub fn tuple(items: Vec<Noun>) -> Option<Noun> {
        let mut iter = items.into_iter().rev();
        let last = iter.next()?;
        Some(iter.fold(last, |tail, head| Noun::cell(head, tail)))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Noun::Atom(_) => "atom",
            Noun::Cell(_) => "cell",
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Noun::Atom(_))
    }

    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Noun::Atom(atom) => Some(atom),
            Noun::Cell(_) => None,
        }
    }

    pub fn head(&self) -> Option<&Noun> {
        match self {
            Noun::Cell(cell) => Some(cell.head()),
            Noun::Atom(_) => None,
        }
    }

    pub fn tail(&self) -> Option<&Noun> {
        match self {
            Noun::Cell(cell) => Some(cell.tail()),
            Noun::Atom(_) => None,
        }
    }
}

impl Default for Noun {
    fn default() -> Self {
        Noun::Atom(Atom::ZERO)
    }
}

impl From<Atom> for Noun {
    fn from(atom: Atom) -> Self {
        Noun::Atom(atom)
    }
}

impl From<u64> for Noun {
    fn from(n: u64) -> Self {
        Noun::Atom(Atom::new(n))
    }
}

// Structural equality, walked with an explicit stack
impl PartialEq for Noun {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = Vec::new();
        pending.push((self, other));

        while let Some((a, b)) = pending.pop() {
            match (a, b) {
                (Noun::Atom(x), Noun::Atom(y)) => {
                    if x != y {
                        return false;
                    }
                }
                (Noun::Cell(x), Noun::Cell(y)) => {
                    if Arc::ptr_eq(x, y) {
                        continue;
                    }
                    pending.push((x.tail(), y.tail()));
                    pending.push((x.head(), y.head()));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Noun {}

impl fmt::Debug for Noun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Noun::Atom(atom) => write!(f, "Atom({:?})", atom),
            Noun::Cell(_) => write!(f, "Cell({})", self),
        }
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell([{} {}])", self.head, self.tail)
    }
}

// Display work items: a whole noun, or the rest of a cell after its head
enum Show<'a> {
    Noun(&'a Noun),
    Rest(&'a Noun),
}

impl fmt::Display for Noun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = Vec::new();
        pending.push(Show::Noun(self));

        while let Some(item) = pending.pop() {
            match item {
                Show::Noun(Noun::Atom(atom)) => write!(f, "{}", atom)?,
                Show::Noun(Noun::Cell(cell)) => {
                    write!(f, "[")?;
                    pending.push(Show::Rest(cell.tail()));
                    pending.push(Show::Noun(cell.head()));
                }
                // Tails are flattened: [a [b c]] prints as [a b c]
                Show::Rest(Noun::Cell(cell)) => {
                    write!(f, " ")?;
                    pending.push(Show::Rest(cell.tail()));
                    pending.push(Show::Noun(cell.head()));
                }
                Show::Rest(Noun::Atom(atom)) => write!(f, " {}]", atom)?,
            }
        }
        Ok(())
    }
}

/// Recoverable failure: the subtrahend exceeds the minuend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("subtract-underflow")]
pub struct Underflow;

impl Underflow {
    pub const LABEL: &'static str = "subtract-underflow";
}

/// Outcome of a native gate that did not produce a noun.
///
/// `Exit` aborts the whole evaluation; `Fail` is an ordinary, labelled
/// failure the caller is expected to branch on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Bail {
    #[error("exit")]
    Exit,
    #[error("{0}")]
    Fail(&'static str),
}

impl Bail {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Bail::Exit)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Bail::Exit => "exit",
            Bail::Fail(label) => label,
        }
    }
}

impl From<Underflow> for Bail {
    fn from(_: Underflow) -> Self {
        Bail::Fail(Underflow::LABEL)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("Undefined word: {0}")]
    UndefinedWord(String),
    #[error("Parse error at line {}, column {}: {}", pos.line, pos.column, message)]
    Parse { pos: SourcePos, message: String },
    #[error(transparent)]
    Bail(#[from] Bail),
}
