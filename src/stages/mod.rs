pub mod stage0_load;
pub mod stage1_index;
pub mod stage2_anchors;
pub mod stage3_assign;
pub mod stage4_clean;
pub mod stage5_propagate;
pub mod stage6_verify;

pub use stage0_load::*;
pub use stage1_index::*;
pub use stage2_anchors::*;
pub use stage3_assign::*;
pub use stage4_clean::*;
pub use stage5_propagate::*;
pub use stage6_verify::*;
