//! Result export helpers.

pub mod export;
