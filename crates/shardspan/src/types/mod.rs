mod rating;
mod timestamp;

pub use rating::{Rating, RatingOutOfRange};
pub use timestamp::{Timestamp, TimestampParseError};
