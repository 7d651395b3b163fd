use serde_json::Value;

use super::required;
use crate::error::{StoreError, StoreResult};
use crate::models::{Settings, SettingsPatch};
use crate::store::DataStore;

impl DataStore {
    pub fn settings(&self) -> &Settings {
        &self.data().settings
    }

    /// Apply a partial settings update. Every present field is validated
    /// before any of them is applied.
    pub fn apply_settings(&mut self, patch: SettingsPatch) -> StoreResult<Settings> {
        let font_family = patch.font_family.as_deref().map(|f| required("font family", f)).transpose()?;
        let ai_model = patch.ai_model.as_deref().map(|m| required("AI model", m)).transpose()?;
        if patch.quote_timer_secs == Some(0) {
            return Err(StoreError::validation("quote timer must be at least 1 second"));
        }
        let quotes = patch.quotes.map(|quotes| {
            quotes
                .iter()
                .map(|q| q.trim())
                .filter(|q| !q.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        });

        if patch.theme.is_none()
            && font_family.is_none()
            && patch.font_size.is_none()
            && ai_model.is_none()
            && quotes.is_none()
            && patch.quote_timer_secs.is_none()
        {
            return Ok(self.settings().clone());
        }

        let settings = &mut self.data_mut().settings;
        if let Some(theme) = patch.theme {
            settings.theme = theme;
        }
        if let Some(font_family) = font_family {
            settings.font_family = font_family;
        }
        if let Some(font_size) = patch.font_size {
            settings.font_size = font_size;
        }
        if let Some(ai_model) = ai_model {
            settings.ai_model = ai_model;
        }
        if let Some(quotes) = quotes {
            settings.quotes = quotes;
        }
        if let Some(secs) = patch.quote_timer_secs {
            settings.quote_timer_secs = secs;
        }
        let updated = settings.clone();
        self.persist();
        Ok(updated)
    }

    /// Apply a settings patch received as JSON. Unknown keys are ignored;
    /// wrong value types and unknown theme names are validation errors.
    pub fn apply_settings_json(&mut self, patch: Value) -> StoreResult<Settings> {
        let patch: SettingsPatch = serde_json::from_value(patch)
            .map_err(|e| StoreError::validation(format!("invalid settings: {}", e)))?;
        self.apply_settings(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FontSize, Theme};
    use crate::ops::test_support::{reload, temp_store};
    use serde_json::json;

    #[test]
    fn test_apply_settings_partial() {
        let (_dir, mut store) = temp_store();
        let updated = store
            .apply_settings(SettingsPatch {
                theme: Some(Theme::BabyPink),
                quotes: Some(vec!["  Keep going ".to_string(), "   ".to_string()]),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.theme, Theme::BabyPink);
        assert_eq!(updated.quotes, vec!["Keep going"]);
        assert_eq!(updated.font_family, "Open Sans");
        assert_eq!(reload(&store).settings(), &updated);
    }

    #[test]
    fn test_invalid_settings_change_nothing() {
        let (_dir, mut store) = temp_store();
        let before = store.settings().clone();

        let blank_font = SettingsPatch {
            theme: Some(Theme::Dark),
            font_family: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(store.apply_settings(blank_font).unwrap_err().is_validation());

        let zero_timer = SettingsPatch { quote_timer_secs: Some(0), ..Default::default() };
        assert!(store.apply_settings(zero_timer).unwrap_err().is_validation());

        assert_eq!(store.settings(), &before);
    }

    #[test]
    fn test_apply_settings_json() {
        let (_dir, mut store) = temp_store();
        let updated = store
            .apply_settings_json(json!({"theme": "Dark Theme", "fontSize": "Large", "windowX": 10}))
            .unwrap();
        assert_eq!(updated.theme, Theme::Dark);
        assert_eq!(updated.font_size, FontSize::Large);

        assert!(store.apply_settings_json(json!({"theme": "Neon"})).unwrap_err().is_validation());
        assert!(store.apply_settings_json(json!({"quoteTimerSecs": "soon"})).unwrap_err().is_validation());
    }
}
