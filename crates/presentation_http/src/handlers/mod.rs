//! HTTP request handlers

pub mod boards;
pub mod health;
pub mod stops;
