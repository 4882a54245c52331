pub mod activity;
pub mod auth;
pub mod cloudflare;
pub mod sessions;
pub mod users;
