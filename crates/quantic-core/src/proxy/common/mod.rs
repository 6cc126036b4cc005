pub mod client_builder;
pub mod header_constants;
pub mod origin;
pub mod sanitize_error;
