//! Tunable filter parameters.
//!
//! Filters hold an `Arc<dyn SettingsProvider>` and take a fresh snapshot on
//! every evaluation, so a settings update is picked up by the next call
//! without restarting the service.

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub filter_vector_threshold: f64,
    pub filter_keyword_threshold: f64,
    pub embedding_model: String,
    pub embedding_output_dimensionality: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            filter_vector_threshold: 0.4,
            filter_keyword_threshold: 0.5,
            embedding_model: "text-embedding-3-small".to_string(),
            embedding_output_dimensionality: 768,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("{name} must be within [0, 1], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },

    #[error("embedding_model cannot be empty")]
    EmptyModel,

    #[error("embedding_output_dimensionality must be greater than zero")]
    ZeroDimensionality,
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, value) in [
            ("filter_vector_threshold", self.filter_vector_threshold),
            ("filter_keyword_threshold", self.filter_keyword_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::ThresholdOutOfRange { name, value });
            }
        }
        if self.embedding_model.trim().is_empty() {
            return Err(SettingsError::EmptyModel);
        }
        if self.embedding_output_dimensionality == 0 {
            return Err(SettingsError::ZeroDimensionality);
        }
        Ok(())
    }
}

/// Synchronous, read-only view of the current settings.
pub trait SettingsProvider: Send + Sync {
    fn snapshot(&self) -> Settings;
}

/// Process-wide settings shared between filters and the settings API.
/// The lock is only held long enough to clone or swap the snapshot.
#[derive(Debug, Clone, Default)]
pub struct SharedSettings {
    inner: Arc<RwLock<Settings>>,
}

impl SharedSettings {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    /// Validates and swaps in a new snapshot.
    pub fn replace(&self, settings: Settings) -> Result<(), SettingsError> {
        settings.validate()?;
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = settings;
        Ok(())
    }
}

impl SettingsProvider for SharedSettings {
    fn snapshot(&self) -> Settings {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(Settings::default().validate(), Ok(()));
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let settings = Settings {
            filter_vector_threshold: 1.5,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::ThresholdOutOfRange {
                name: "filter_vector_threshold",
                ..
            })
        ));
    }

    #[test]
    fn test_empty_model_and_zero_dims_rejected() {
        let empty_model = Settings {
            embedding_model: "  ".to_string(),
            ..Settings::default()
        };
        assert_eq!(empty_model.validate(), Err(SettingsError::EmptyModel));

        let zero_dims = Settings {
            embedding_output_dimensionality: 0,
            ..Settings::default()
        };
        assert_eq!(zero_dims.validate(), Err(SettingsError::ZeroDimensionality));
    }

    #[test]
    fn test_replace_is_visible_to_clones() {
        let shared = SharedSettings::default();
        let reader = shared.clone();
        shared
            .replace(Settings {
                filter_vector_threshold: 0.9,
                ..Settings::default()
            })
            .unwrap();
        assert_eq!(reader.snapshot().filter_vector_threshold, 0.9);
    }

    #[test]
    fn test_invalid_replace_keeps_previous_snapshot() {
        let shared = SharedSettings::default();
        let result = shared.replace(Settings {
            filter_keyword_threshold: -0.1,
            ..Settings::default()
        });
        assert!(result.is_err());
        assert_eq!(shared.snapshot(), Settings::default());
    }
}
