use crate::interpreter::{Interpreter, NativeFn};

pub fn register_builtins(interp: &mut Interpreter) {
    // Helper to add a native gate with optional documentation
    let add_builtin = |interp: &mut Interpreter, name: &str, func: NativeFn, doc: Option<&str>| {
        interp.define(name, func, doc);
    };

    // Arithmetic
    add_builtin(interp, "sub", crate::primitives::minus::subtract_gate,
        Some("Subtract two atoms.\nUsage: sub a b\nExample: sub 5 3 => 2\nFails with subtract-underflow when b > a; exits if a or b is a cell"));
}
