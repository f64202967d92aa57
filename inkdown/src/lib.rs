//! Expose inkdown's internal API for use in unit testing. While it *could*
//! be useful, we do not recommend using this API in production code. It is
//! primarily intended for testing purposes.
pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod style;
pub mod worker;
