//! Core domain types

pub mod snippet;

pub use snippet::*;
