//! Proxy module - embedding gateway
//!
//! Decides whether a request is served from the local static directory or
//! forwarded to the upstream support-chat application, and adjusts upstream
//! responses so they can be framed under the gateway's origin.

pub mod common;
pub mod file_index;
pub mod middleware;
pub mod rewrite;
pub mod routing;
pub mod sso;
pub mod upstream;

pub use file_index::LocalFileIndex;
pub use rewrite::ResponseRewriter;
pub use routing::RoutePolicy;
pub use sso::SsoBridge;
pub use upstream::UpstreamClient;
