//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Agent lifecycle handlers (create, list, info, delete).
pub mod agents;
/// History read and clear handlers.
pub mod history;
/// Ask, study and plan handlers.
pub mod modes;
/// Service info and health handlers.
pub mod system;
