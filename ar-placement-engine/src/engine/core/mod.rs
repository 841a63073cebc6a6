//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, tick ordering,
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the catalog loader, scene visuals,
/// web RPC, and platform-specific configurations.
pub mod app_setup;

/// Application state machine for catalog loading.
pub mod app_state;

/// Per-frame tick phases and the core plugin wiring them.
///
/// The core plugin runs headless, which is how the tests drive it.
pub mod tick;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
