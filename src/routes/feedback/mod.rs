pub mod add;

pub use add::*;
