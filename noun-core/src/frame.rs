//! Gate call frames.
//!
//! A gate is invoked with its whole core, `[battery [sample context]]`. The
//! sample sits at tree axis 6; binary gates take a `[a b]` sample, putting
//! their operands at axes 12 and 13. Native gates only ever need those fixed
//! slots, so they are decoded by direct pattern matching rather than by a
//! general axis walk.

use crate::value::{Atom, Bail, Noun};

pub const SAMPLE_AXIS: u64 = 6;
pub const FIRST_SAMPLE_AXIS: u64 = 12;
pub const SECOND_SAMPLE_AXIS: u64 = 13;

/// Assemble a gate core from its three parts.
pub fn gate_core(battery: Noun, sample: Noun, context: Noun) -> Noun {
    Noun::cell(battery, Noun::cell(sample, context))
}

/// The sample of a gate core, if the core has the `[battery [sample context]]` shape.
pub fn sample(core: &Noun) -> Option<&Noun> {
    core.tail()?.head()
}

// RUST CONCEPT: Borrowed operands
// The returned atoms borrow from `core`; the caller keeps ownership of the
// frame and nothing is cloned.
pub fn sample_pair(core: &Noun) -> Result<(&Atom, &Atom), Bail> {
    let Some(Noun::Cell(pair)) = sample(core) else {
        tracing::warn!(axis = SAMPLE_AXIS, core = %core, "gate core has no [a b] sample");
        return Err(Bail::Exit);
    };

    match (pair.head(), pair.tail()) {
        (Noun::Atom(a), Noun::Atom(b)) => Ok((a, b)),
        (a, b) => {
            tracing::warn!(
                first_axis = FIRST_SAMPLE_AXIS,
                first = a.type_name(),
                second_axis = SECOND_SAMPLE_AXIS,
                second = b.type_name(),
                "gate sample must hold two atoms"
            );
            Err(Bail::Exit)
        }
    }
}
