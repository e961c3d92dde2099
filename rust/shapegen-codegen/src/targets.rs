//! Output languages.

pub mod dart;
