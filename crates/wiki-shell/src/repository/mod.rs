//! Repository Layer
//!
//! Durable storage for shell state.

mod settings_repo;

#[cfg(test)]
mod tests;

pub use settings_repo::SettingsRepository;
