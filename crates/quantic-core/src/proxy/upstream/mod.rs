pub mod client;
pub mod upgrade;

pub use client::UpstreamClient;
pub use upgrade::is_upgrade_request;
