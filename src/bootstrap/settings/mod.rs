//! Configuration structures for launcher composition.
//!
//! This module provides the validated [`Settings`] consumed by the
//! [`Bootstrapper`](crate::bootstrap::Bootstrapper) and the fluent
//! [`SettingsBuilder`] that performs all input validation.

mod builder;
mod core;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use core::Settings;
