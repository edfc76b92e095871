pub mod input;
pub mod output;
pub mod timeline;

pub use input::*;
pub use output::*;
pub use timeline::*;
