pub mod parser;
pub mod sanitize;

pub use parser::*;
pub use sanitize::*;
