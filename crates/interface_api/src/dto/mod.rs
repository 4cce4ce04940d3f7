//! Request and response data transfer objects

pub mod activity;
pub mod claims;
pub mod pricing;
pub mod warranty;
