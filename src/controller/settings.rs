//! Settings dialog actions

use crate::model::SettingsRow;
use super::AppController;

impl AppController {
    /// Activate the selected settings row
    pub async fn activate_settings_row(&self) {
        let ui_state = self.model.get_ui_state().await;
        match ui_state.selected_settings_row() {
            Some(SettingsRow::Genre(index)) => {
                if let Some(genre) = ui_state.genre_catalogue.get(index) {
                    self.toggle_genre(genre.id).await;
                }
            }
            Some(SettingsRow::LetterCase) => self.toggle_letter_case().await,
            Some(SettingsRow::Theme) => self.toggle_theme().await,
            None => {}
        }
    }

    /// Add or remove `genre_id` from the filter, then warm the cache for
    /// the new fetch key.
    pub async fn toggle_genre(&self, genre_id: u32) {
        let mut added = false;
        let prefs = self
            .model
            .update_preferences(|p| {
                added = p.genres.toggle(genre_id);
            })
            .await;
        tracing::info!(genre_id, added, genres = %prefs.genres.to_query(), "Genre filter changed");

        let controller = self.clone();
        tokio::spawn(async move {
            controller.prefetch_random_id().await;
        });
    }

    /// Drop every genre from the filter so picks span all movies again
    pub async fn clear_genres(&self) {
        let prefs = self.model.update_preferences(|p| p.genres.clear()).await;
        tracing::info!(genres = %prefs.genres.to_query(), "Genre filter cleared");

        let controller = self.clone();
        tokio::spawn(async move {
            controller.prefetch_random_id().await;
        });
    }

    pub async fn toggle_letter_case(&self) {
        let prefs = self.model.update_preferences(|p| p.letter_case = p.letter_case.toggled()).await;
        tracing::info!(letter_case = prefs.letter_case.label(), "Letter case changed");
    }

    pub async fn toggle_theme(&self) {
        let prefs = self.model.update_preferences(|p| p.theme = p.theme.toggled()).await;
        tracing::info!(theme = prefs.theme.label(), "Theme changed");
    }
}
