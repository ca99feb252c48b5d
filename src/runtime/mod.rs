//! Runtime execution for register assembly programs

mod config;
mod executor;
pub mod message;
mod registers;

pub use config::ExecutionConfig;
pub use executor::Interpreter;
pub use registers::{CompareState, RegisterBank};
