//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations and snapshot persistence into the API the
//!   UI/FFI layers call.
//! - Keep shells decoupled from storage details.

pub mod list_service;
