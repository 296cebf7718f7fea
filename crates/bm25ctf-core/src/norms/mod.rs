//! Field-length norms.
//!
//! - [`smallfloat`]: the one-byte length codec and its shared decode table
//! - [`policy`]: which length gets encoded for a field

pub mod policy;
pub mod smallfloat;

pub use policy::{FieldInvertState, IndexOptions, NormPolicy};
pub use smallfloat::{byte4_to_int, decode_length, int_to_byte4, is_approximate, LENGTH_TABLE};
