pub mod artifact;
pub mod record;
pub mod state;
pub mod template;

pub use artifact::*;
pub use record::*;
pub use state::*;
pub use template::*;
