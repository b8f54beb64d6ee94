//! Recording domain module

mod duration;

pub use duration::{Duration, DEFAULT_MIN_ANSWER_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};
