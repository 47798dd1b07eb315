//! Type definitions shared across the feed handler.

pub mod enums;
pub mod messages;
pub mod symbol;

pub use enums::*;
pub use messages::*;
pub use symbol::*;
