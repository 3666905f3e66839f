use crate::{
    integrator::{FixedStepSizeIntegrator, FixedStepSizeKind},
    problem::Instant,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIRECTORY: &str = "fixed_step_integration";
const FILE_NAME: &str = "settings.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not write settings: {0}")]
    Write(#[from] toml::ser::Error),
    #[error("step must be finite and positive, got {0}")]
    InvalidStep(f64),
}

/// Persisted choice of integration method.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntegratorSettings {
    pub method: FixedStepSizeKind,
    /// Step size in seconds.
    pub step: f64,
}

impl Default for IntegratorSettings {
    fn default() -> Self {
        Self {
            method: FixedStepSizeKind::QuinlanTremaine1990Order12,
            step: 300.0,
        }
    }
}

impl IntegratorSettings {
    /// `settings.toml` in the user's configuration directory, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|config_dir| config_dir.join(APP_DIRECTORY).join(FILE_NAME))
    }

    pub fn from_toml(s: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    /// Loads the settings from [`default_path`], falling back to the defaults.
    ///
    /// [`default_path`]: IntegratorSettings::default_path
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|error| {
            tracing::warn!(path = %path.display(), %error, "using default integrator settings");
            Self::default()
        })
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        self.validate()?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.step.is_finite() && self.step > 0.0 {
            Ok(())
        } else {
            Err(SettingsError::InvalidStep(self.step))
        }
    }

    #[inline]
    pub fn integrator(&self) -> FixedStepSizeIntegrator {
        FixedStepSizeIntegrator::from_kind(self.method)
    }

    #[inline]
    pub fn step<T: Instant>(&self) -> T::Duration {
        T::from_seconds(self.step)
    }
}
