//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the operations screens invoke.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod goal_service;
