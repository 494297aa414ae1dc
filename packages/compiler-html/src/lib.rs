//! Static HTML export of one template view.

mod compiler;
pub mod style;

pub use compiler::{compile_to_html, CompileError, CompileOptions};
pub use style::{style_declarations, Declarations};

#[cfg(test)]
mod tests;
