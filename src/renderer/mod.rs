pub mod renderer;
pub mod traits;

pub use renderer::*;
pub use traits::*;
