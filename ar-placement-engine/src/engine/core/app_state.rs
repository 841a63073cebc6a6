use bevy::prelude::*;

/// Application lifecycle around catalog installation.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
    /// Manifest failed validation; tracking still runs but nothing can be placed.
    CatalogRejected,
}
