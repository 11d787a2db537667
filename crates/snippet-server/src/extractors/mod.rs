//! Request extractors

pub mod fields;

pub use fields::SnippetFields;
