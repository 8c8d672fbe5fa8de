//! Site-wide viewer preferences: theme mode and cookie consent.
//!
//! Both live under named keys in an injected key-value store, read once at
//! startup and written back only on explicit user action. The store is a
//! trait so hosts can hand in whatever durable storage they have; the
//! bundled implementations are an in-memory map and a flat JSON file.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::foundation::error::{FolioError, FolioResult};

/// Storage key for the theme mode.
pub const THEME_KEY: &str = "themeMode";
/// Storage key for the cookie-consent decision.
pub const CONSENT_KEY: &str = "cookieConsent";

/// Light-or-dark presentation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    /// The stored tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored tag; anything unrecognized is `None` so the caller's
    /// fallback applies.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The opposite mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Cookie-consent decision. Only an explicit [`Consent::Accepted`] grants
/// consent; an absent or unrecognized stored value stays undecided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Consent {
    #[default]
    Undecided,
    Accepted,
    Declined,
}

impl Consent {
    /// The stored tag, or `None` for [`Consent::Undecided`] (stored as an
    /// absent key).
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Self::Undecided => None,
            Self::Accepted => Some("accepted"),
            Self::Declined => Some("declined"),
        }
    }

    /// Parse a stored tag.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "accepted" => Self::Accepted,
            "declined" => Self::Declined,
            _ => Self::Undecided,
        }
    }
}

/// Durable string-to-string storage, localStorage-shaped.
pub trait KeyValueStore {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value.
    fn set(&mut self, key: &str, value: &str) -> FolioResult<()>;
    /// Delete a key; absent keys are fine.
    fn remove(&mut self, key: &str) -> FolioResult<()>;
}

/// Volatile in-memory store, for tests and hosts without durable storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> FolioResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> FolioResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A flat string map persisted as a JSON object, written through on every
/// mutation.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open a store at `path`, reading the existing map if the file exists.
    pub fn open(path: impl AsRef<Path>) -> FolioResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                FolioError::parse(format!("parse prefs store '{}': {e}", path.display()))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(FolioError::io(format!(
                    "read prefs store '{}': {e}",
                    path.display()
                )));
            }
        };
        Ok(Self { path, entries })
    }

    fn persist(&self) -> FolioResult<()> {
        let text = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| FolioError::parse(format!("encode prefs store: {e}")))?;
        std::fs::write(&self.path, text).map_err(|e| {
            FolioError::io(format!("write prefs store '{}': {e}", self.path.display()))
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> FolioResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> FolioResult<()> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

/// The preferences themselves, loaded once and written through explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SitePrefs {
    /// Current theme mode.
    pub theme: ThemeMode,
    /// Current consent decision.
    pub consent: Consent,
}

impl SitePrefs {
    /// Read both preferences from the store. An unreadable or unrecognized
    /// theme value falls back to `fallback_theme`; consent defaults to
    /// undecided.
    pub fn load<S: KeyValueStore>(store: &S, fallback_theme: ThemeMode) -> Self {
        let theme = store
            .get(THEME_KEY)
            .and_then(|tag| ThemeMode::parse(&tag))
            .unwrap_or(fallback_theme);
        let consent = store
            .get(CONSENT_KEY)
            .map(|tag| Consent::parse(&tag))
            .unwrap_or_default();
        Self { theme, consent }
    }

    /// True only for an explicit accept.
    pub fn has_consent(&self) -> bool {
        self.consent == Consent::Accepted
    }

    /// Set and persist the theme mode.
    pub fn set_theme<S: KeyValueStore>(&mut self, store: &mut S, mode: ThemeMode) -> FolioResult<()> {
        store.set(THEME_KEY, mode.as_str())?;
        self.theme = mode;
        Ok(())
    }

    /// Flip and persist the theme mode, returning the new one.
    pub fn toggle_theme<S: KeyValueStore>(&mut self, store: &mut S) -> FolioResult<ThemeMode> {
        let next = self.theme.toggled();
        self.set_theme(store, next)?;
        Ok(next)
    }

    /// Set and persist the consent decision. Setting back to
    /// [`Consent::Undecided`] removes the stored key.
    pub fn set_consent<S: KeyValueStore>(&mut self, store: &mut S, consent: Consent) -> FolioResult<()> {
        match consent.as_str() {
            Some(tag) => store.set(CONSENT_KEY, tag)?,
            None => store.remove(CONSENT_KEY)?,
        }
        self.consent = consent;
        Ok(())
    }
}
