// Subtraction primitive - unsigned atoms, fails instead of going negative

use crate::frame::sample_pair;
use crate::value::{Atom, Bail, Noun, Underflow};

// Subtraction: a - b, or Underflow when b > a
// Borrows both operands; the caller still owns them afterwards.
pub fn subtract(a: &Atom, b: &Atom) -> Result<Atom, Underflow> {
    if let (Some(x), Some(y)) = (a.as_small(), b.as_small()) {
        if x < y {
            tracing::trace!(minuend = x, subtrahend = y, "subtract-underflow");
            return Err(Underflow);
        }
        return Ok(Atom::new(x - y));
    }

    // RUST CONCEPT: Scoped big-integer temporaries
    // Compare before subtracting so an underflow never computes a value it
    // would have to throw away. Both temporaries are dropped on every path.
    let mut difference = a.to_big();
    let subtrahend = b.to_big();

    if difference < subtrahend {
        tracing::trace!(
            minuend_bits = a.bit_len(),
            subtrahend_bits = b.bit_len(),
            "subtract-underflow"
        );
        return Err(Underflow);
    }

    difference -= &subtrahend;
    drop(subtrahend);

    Ok(Atom::from_big(difference))
}

// Owning subtraction: consumes one reference to each operand
pub fn subtract_owned(a: Atom, b: Atom) -> Result<Atom, Underflow> {
    let result = subtract(&a, &b);
    drop(a);
    drop(b);
    result
}

// Gate entry: ( [battery [[a b] context]] -- a-b )
pub fn subtract_gate(core: &Noun) -> Result<Noun, Bail> {
    let (a, b) = sample_pair(core)?;
    Ok(Noun::Atom(subtract(a, b)?))
}
