//! API route handlers

pub mod activity;
pub mod claims;
pub mod health;
pub mod pricing;
pub mod warranty;
