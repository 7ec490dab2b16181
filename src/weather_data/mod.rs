pub mod error;
pub mod fetcher;
pub mod request_url;
pub mod response;
