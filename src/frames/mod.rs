pub mod daily_frame;
pub mod error;
pub mod hourly_frame;
