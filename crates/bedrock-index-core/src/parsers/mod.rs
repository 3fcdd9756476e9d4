//! Source parsers

pub mod jsonc;
