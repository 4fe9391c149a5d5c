//! Domain model: log records, key actions and the error taxonomy.

pub mod error;
pub mod key_action;
pub mod record;

pub use error::{AppError, ParseError, StreamError};
pub use key_action::KeyAction;
pub use record::Record;
