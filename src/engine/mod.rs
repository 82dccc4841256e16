pub mod attacks;
pub mod board;
pub mod check;
pub mod movegen;
pub mod notation;
pub mod pins;
pub mod types;

pub use board::Board;
pub use types::*;
