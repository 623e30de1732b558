pub mod auth;
pub mod client_auth;
pub mod maybe_auth;
pub mod params;
pub mod submission;
