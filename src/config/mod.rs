//! Configuration loaded from `.squirrel.toml`.

pub mod settings;

pub use settings::{Settings, StorePaths};
