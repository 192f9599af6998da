//! Command handlers, one module per operation

pub mod cluster;
pub mod credentials;
pub mod probe;
