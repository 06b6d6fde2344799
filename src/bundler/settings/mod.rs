//! Configuration structures for bundling operations.
//!
//! [`Settings`] carries every toggle of a run (inclusion flags, signing,
//! checksum algorithms, naming conventions and the deployment hand-off values)
//! and is built through [`SettingsBuilder`], which validates it.

mod builder;
mod core;
mod layout;
mod signing;

pub use self::core::Settings;
pub use builder::{DEFAULT_BUNDLE_PATH, SettingsBuilder};
pub use layout::{ArtifactLayout, IncludeOptions};
pub use signing::SigningSettings;
