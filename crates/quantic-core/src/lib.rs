//! # Quantic Core
//!
//! Gateway logic shared by the server binary and its tests.
//!
//! ```text
//! quantic-core/src/
//! ├── modules/config.rs   # defaults < JSON file < environment
//! └── proxy/
//!     ├── routing.rs      # Local / Proxied decision
//!     ├── file_index.rs   # startup snapshot of the static directory
//!     ├── rewrite.rs      # framing headers, cookies, Location, hop-by-hop
//!     ├── upstream/       # streaming forwarder + connection upgrades
//!     ├── sso.rs          # one-time login URL bridge
//!     ├── middleware/     # CORS
//!     └── common/         # HTTP clients, origins, error sanitisation
//! ```

pub mod modules;
pub mod proxy;

pub use quantic_types as types;
