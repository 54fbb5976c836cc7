//! Core use-case services.
//!
//! # Responsibility
//! - Expose typed CRUD and lookup entry points per entity.
//! - Keep callers decoupled from SQL and session handling.

pub mod app_service;
pub mod base;
pub mod user_service;
pub mod ws_interested_service;
