//! Business logic services

pub mod snippet_service;

pub use snippet_service::SnippetService;
