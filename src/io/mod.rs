mod output;
mod render;

pub use output::*;
pub use render::*;
