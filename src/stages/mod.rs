pub mod stage0_categorize;
pub mod stage1_remap;
pub mod stage2_clean;
pub mod stage3_emit;

pub use stage0_categorize::*;
pub use stage1_remap::*;
pub use stage2_clean::*;
pub use stage3_emit::*;
