//! Marker traits separating state-changing requests from reads
//!
//! Every command and query type implements exactly one of these, which keeps
//! the write/read split visible in the type system.

/// Request that modifies state
pub trait Command {}

/// Request that only reads state
pub trait Query {}
