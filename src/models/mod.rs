pub mod anchor;
pub mod index;
pub mod segment;
pub mod transcript;

pub use anchor::*;
pub use index::*;
pub use segment::*;
pub use transcript::*;
