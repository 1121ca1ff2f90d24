//! Complication providers
//!
//! The four watch-face data sources, the host-facing provider interface, and
//! the write side that asks the host to refresh them.

#![warn(missing_docs)]

pub mod provider;
mod fallback;
pub mod exercise;
pub mod progress;
pub mod wear_time;
pub mod alive;
pub mod registry;
pub mod refresh;
pub mod updater;

pub use provider::{ComplicationProvider, ComplicationRequest};
pub use exercise::ExerciseShortcutProvider;
pub use progress::DailyProgressProvider;
pub use wear_time::WearTimeProvider;
pub use alive::ServiceAliveProvider;
pub use registry::{ProviderRegistry, RegistryError};
pub use refresh::{RefreshRequester, ChannelRefreshRequester, NoopRefreshRequester};
pub use updater::StatusUpdater;
