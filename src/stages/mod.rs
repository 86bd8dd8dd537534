pub mod stage0_load;
pub mod stage1_normalize;
pub mod stage2_embed;
pub mod stage3_write;

pub use stage0_load::*;
pub use stage1_normalize::*;
pub use stage2_embed::*;
pub use stage3_write::*;
