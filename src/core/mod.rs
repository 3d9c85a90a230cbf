//! Core configuration and domain models

pub mod config;
pub mod message;
pub mod models;
