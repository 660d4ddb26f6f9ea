pub mod auth;
pub mod cache;
pub mod cart;
pub mod db;
pub mod email;
pub mod handlers;
pub mod models;
pub mod onboarding;
pub mod qr;
pub mod storage;

pub use db::create_pool;
