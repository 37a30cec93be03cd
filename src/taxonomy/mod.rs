pub mod source;
pub mod types;

pub use source::*;
pub use types::*;
