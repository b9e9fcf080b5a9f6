mod item;
mod project;

pub use item::*;
pub use project::*;
