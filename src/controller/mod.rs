//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and runs the network calls.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key and mouse event handling
//! - `navigation`: Random pick, prefetch, route changes, poster and genre loading
//! - `settings`: Genre filter, letter case and theme changes
//! - `links`: Opening trailer, share and other links in the browser

mod input;
mod navigation;
mod settings;
mod links;

use crate::model::{AppModel, ApiError};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: AppModel,
}

impl AppController {
    pub fn new(model: AppModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub(crate) fn format_error(error: &ApiError) -> String {
        match error {
            ApiError::Timeout => "TMDB took too long to answer. Try again.".to_string(),
            ApiError::Status { status: 401, .. } => "TMDB rejected the API key. Check TMDB_API_KEY.".to_string(),
            ApiError::Status { status: 404, .. } => "That movie could not be found.".to_string(),
            ApiError::Status { status: 429, .. } => "Rate limited. Please wait a moment.".to_string(),
            ApiError::Status { status, .. } => format!("TMDB returned an error ({}).", status),
            ApiError::Transport(_) => "Could not reach TMDB. Check your connection.".to_string(),
            ApiError::NoResults => "No movies match the selected genres.".to_string(),
            ApiError::Decode(_) | ApiError::InvalidRoute(_) => format!("Error: {}", error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_short_messages() {
        assert_eq!(
            AppController::format_error(&ApiError::Status { status: 429, body: String::new() }),
            "Rate limited. Please wait a moment."
        );
        assert!(AppController::format_error(&ApiError::NoResults).contains("genres"));
        assert!(AppController::format_error(&ApiError::Status { status: 500, body: "x".into() }).contains("500"));
    }
}
