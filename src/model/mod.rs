//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: UI state (focus, dialogs, picker, notifications)
//! - `routes`: fetch keys and navigation paths
//! - `genres`, `movie`, `preferences`: domain data
//! - `modal`, `picker`: small state machines driven by the controller
//! - `content`: the current route and its movie card
//! - `cache`: deduplicating fetch cache
//! - `source`, `tmdb_client`: where movies come from
//! - `app_model`: Main application model with state management methods

mod types;
mod error;
mod routes;
mod genres;
mod movie;
mod preferences;
mod modal;
mod picker;
mod content;
mod cache;
mod source;
mod tmdb_client;
mod app_model;

// Re-export all public types for convenient access
pub use types::{Focus, SettingsRow, UiState};

pub use error::ApiError;

pub use routes::{RandomIdResponse, Route};

pub use movie::{share_url, trailer_url};

pub use preferences::{LetterCase, Preferences, PreferencesStore, ThemeMode};

pub use modal::{CloseReason, ModalKind};

pub use content::{ContentState, ContentView, MovieCard, PosterState};

pub use source::{resolve_random_id, MovieSource};

pub use tmdb_client::TmdbClient;

pub use app_model::AppModel;

#[cfg(test)]
pub use content::CARD_ENTRANCE;
#[cfg(test)]
pub use modal::MODAL_ANIMATION;
#[cfg(test)]
pub use movie::MovieDetails;
#[cfg(test)]
pub use types::Hover;

#[cfg(test)]
pub(crate) use app_model::test_support;
