// Primitives module - native gates, one file per operation

// Arithmetic
pub mod minus;
