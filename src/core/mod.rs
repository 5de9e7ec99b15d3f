mod error;

pub use error::{HistoryError, Result};
