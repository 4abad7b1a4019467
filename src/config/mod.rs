use crate::di::{Container, DependencyKey};
use crate::error::{AmbitError, Result};
use dashmap::DashMap;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

/// A dependency key whose value can be read from a configuration variable
///
/// # Example
/// ```
/// use ambit::{ConfigSource, Container, DependencyKey, EnvKey};
///
/// struct PortKey;
///
/// impl DependencyKey for PortKey {
///     type Value = u16;
///
///     fn default_value() -> u16 {
///         8080
///     }
/// }
///
/// impl EnvKey for PortKey {
///     const VAR: &'static str = "APP_PORT";
/// }
///
/// let source = ConfigSource::from_pairs([("APP_PORT", "3000")]);
/// let mut container = Container::new();
/// source.apply::<PortKey>(&mut container).unwrap();
/// assert_eq!(*container.get::<PortKey>(), 3000);
/// ```
pub trait EnvKey: DependencyKey {
    /// Name of the variable holding this key's value
    const VAR: &'static str;
}

/// String configuration pairs, usually loaded from the process environment
#[derive(Clone, Default, Debug)]
pub struct ConfigSource {
    config: Arc<DashMap<String, String>>,
}

impl ConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the process environment
    pub fn from_env() -> Self {
        Self::from_pairs(env::vars())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let source = Self::default();
        for (key, value) in pairs {
            source.config.insert(key.into(), value.into());
        }
        source
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.config.len()
    }

    pub fn is_empty(&self) -> bool {
        self.config.is_empty()
    }

    /// Bind `K` from its variable, if present
    ///
    /// Surrounding whitespace is trimmed before parsing.
    /// Returns whether a binding was made; an absent variable leaves the
    /// container untouched so lookups keep resolving to the default.
    ///
    /// # Errors
    /// Returns [`AmbitError::InvalidConfig`] if the value does not parse.
    pub fn apply<K>(&self, container: &mut Container) -> Result<bool>
    where
        K: EnvKey,
        K::Value: FromStr,
        <K::Value as FromStr>::Err: Display,
    {
        let Some(raw) = self.get(K::VAR) else {
            return Ok(false);
        };

        let value = raw.trim().parse::<K::Value>().map_err(|e| {
            tracing::warn!(var = K::VAR, "rejecting configuration value: {}", e);
            AmbitError::InvalidConfig {
                var: K::VAR.to_string(),
                message: e.to_string(),
            }
        })?;

        tracing::debug!(var = K::VAR, "binding from configuration");
        container.set::<K>(value);
        Ok(true)
    }
}
