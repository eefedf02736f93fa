mod error;
pub(crate) mod timers;

pub use error::ApiError;
