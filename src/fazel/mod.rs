mod error;
mod format;
mod writer;

pub use error::FazelError;
pub use format::{format_angle, format_line, format_timestamp, render, RATE_PLACEHOLDER};
pub use writer::{write_file, write_to};
