//! Symbolic PITCH record decoding.
//!
//! [`parser`] holds one nom combinator per record type; [`factory`] dispatches
//! on the type code at offset 8 and wraps parser failures in [`bats_core::BatsError`].

pub mod factory;
pub mod parser;

pub use factory::BatsMsgFactory;
