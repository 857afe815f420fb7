pub mod board;

pub use board::{run_ticker, CodeBoard};
