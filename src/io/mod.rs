pub mod assets;
pub mod input;
pub mod output;

pub use assets::*;
pub use input::*;
pub use output::*;
