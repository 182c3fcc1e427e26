//! Error types for area progression and content loading.

use std::io;

use crate::types::AreaId;

/// Errors surfaced when moving the player between areas.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AreaError {
    /// No area with this id was registered.
    #[error("area {0} not found")]
    NotFound(AreaId),

    /// The area exists but has not been unlocked yet.
    #[error("area {0} is locked")]
    Locked(AreaId),

    /// A floor was requested before any area was loaded.
    #[error("no area is loaded")]
    NoActiveArea,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("area {0} is already registered")]
    DuplicateArea(AreaId),
}

/// Errors raised while reading an area catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("starting area {0} is not defined in the catalog")]
    MissingStartingArea(AreaId),
}
