//! # Broadsheet HTML Compiler
//!
//! Renders a [`Document`](broadsheet_schema::Document) into a standalone,
//! email-safe HTML page: table layout, inline styles, every text value
//! escaped.
//!
//! ```rust,ignore
//! use broadsheet_compiler_html::{compile_to_html, render, CompileOptions};
//!
//! let html = render(&document);
//!
//! let compact = compile_to_html(
//!     &document,
//!     &CompileOptions { pretty: false, ..Default::default() },
//! );
//! ```

mod blocks;
mod compiler;

pub use compiler::{compile_to_html, escape_html, render, CompileOptions};

#[cfg(test)]
mod tests;
