// SPDX-License-Identifier: MPL-2.0
//! Built-in default values for the configuration layer.

/// Auto-dismiss delay for toasts when the caller leaves `timeout` unset.
pub const DEFAULT_TOAST_TIMEOUT_MS: u64 = 3000;

/// Default toast anchor position token.
pub const DEFAULT_TOAST_POSITION: &str = "bottom-right";

/// Cooldown window of the per-control action guard.
pub const DEFAULT_GUARD_COOLDOWN_MS: u64 = 1000;

/// Default diagnostics buffer capacity (events).
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;

/// Minimum diagnostics buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 100;

/// Maximum diagnostics buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;
