pub mod client;
pub mod ezurl;

pub use client::YsClient;
pub use ezurl::ez_url;
