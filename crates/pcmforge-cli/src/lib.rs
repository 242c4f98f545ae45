//! pcmforge CLI library.
//!
//! Command implementations and the built-in demo scores behind the
//! `pcmforge` binary.

pub mod commands;
pub mod demos;
