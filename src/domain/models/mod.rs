pub mod account;
pub mod auth;
pub mod event;
pub mod hal;
pub mod page;
pub mod validation;
