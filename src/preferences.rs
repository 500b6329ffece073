//! Persisted UI preferences
//!
//! A single key is stored: the display theme. Values are postcard-encoded in a
//! fjall keyspace; blocking store calls run on the blocking thread pool.

use anyhow::Result;
use fjall::Keyspace;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tokio::task;

const THEME_KEY: &str = "theme";

/// Display theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}', expected 'light' or 'dark'")),
        }
    }
}

fn get_from_store(store: Keyspace, key: Vec<u8>) -> Result<Option<Vec<u8>>> {
    Ok(store.get(key)?.map(|v| v.to_vec()))
}

fn insert_into_store(store: Keyspace, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
    store.insert(key, value)?;
    Ok(())
}

pub struct PreferenceStore {
    store: Keyspace,
}

impl PreferenceStore {
    /// Open (or create) the preference database at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path).open()?;
        let items = db.keyspace("preferences", fjall::KeyspaceCreateOptions::default)?;
        Ok(PreferenceStore { store: items })
    }

    /// Saved theme, `Light` when none was saved yet
    pub async fn theme(&self) -> Result<Theme> {
        Ok(self.get::<Theme>(THEME_KEY).await?.unwrap_or_default())
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<()> {
        tracing::debug!("Saving theme preference: {}", theme);
        self.put(THEME_KEY, &theme).await
    }

    /// Flip the saved theme and return the new value
    pub async fn toggle_theme(&self) -> Result<Theme> {
        let theme = self.theme().await?.toggled();
        self.set_theme(theme).await?;
        Ok(theme)
    }

    #[tracing::instrument(name = "put_preference", level = "debug", skip(self, value))]
    async fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        let bytes = postcard::to_stdvec(value)?;

        task::spawn_blocking(move || insert_into_store(store, key, bytes)).await??;
        Ok(())
    }

    #[tracing::instrument(name = "query_preference", level = "debug", skip(self))]
    async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();

        let maybe_bytes = task::spawn_blocking(move || get_from_store(store, key_bytes)).await??;

        match maybe_bytes {
            Some(bytes) => Ok(Some(postcard::from_bytes(&bytes)?)),
            None => {
                tracing::debug!("Preference not set");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle_and_parse() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!(Theme::Dark.to_string(), "dark");
    }

    #[tokio::test]
    async fn test_theme_defaults_to_light() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::open(dir.path().join("prefs")).unwrap();
        assert_eq!(store.theme().await.unwrap(), Theme::Light);
    }

    #[tokio::test]
    async fn test_theme_round_trip_and_toggle() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::open(dir.path().join("prefs")).unwrap();

        store.set_theme(Theme::Dark).await.unwrap();
        assert_eq!(store.theme().await.unwrap(), Theme::Dark);

        assert_eq!(store.toggle_theme().await.unwrap(), Theme::Light);
        assert_eq!(store.theme().await.unwrap(), Theme::Light);
    }

    #[tokio::test]
    async fn test_unreadable_theme_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::open(dir.path().join("prefs")).unwrap();

        // Variant index 7 does not exist in `Theme`
        store.put(THEME_KEY, &7u32).await.unwrap();
        assert!(store.theme().await.is_err());
    }
}
