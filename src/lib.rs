pub mod args;
pub mod config;
pub mod error;
pub mod inspector;
pub mod interpreter;
pub mod logging;
pub mod pretty;
pub mod tract_backend;
pub mod types;

#[cfg(test)]
mod testing;

pub use error::{InspectError, Result};
pub use inspector::{Block, ModelInspector, Report};
pub use interpreter::{Interpreter, ModelHandle};
pub use tract_backend::TractInterpreter;
