//! 基本型

mod color;
mod outcome;

pub use color::{Cell, Color};
pub use outcome::Outcome;
