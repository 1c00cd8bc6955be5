use log::{debug, warn};
use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

/// Light or dark page styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Interpret a stored preference; anything unrecognised means light
    pub fn from_stored(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client-local storage for the single theme preference value
pub trait ThemeStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, value: &str) -> std::io::Result<()>;
}

/// Keeps the preference in a small text file
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileThemeStore { path: path.into() }
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Could not read theme from {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&self, value: &str) -> std::io::Result<()> {
        debug!("Persisting theme '{}' to {}", value, self.path.display());
        std::fs::write(&self.path, value)
    }
}

/// In-process store, handy for tests and embedding
#[derive(Default)]
pub struct MemoryThemeStore {
    value: Mutex<Option<String>>,
}

impl MemoryThemeStore {
    pub fn with_value(value: impl Into<String>) -> Self {
        MemoryThemeStore {
            value: Mutex::new(Some(value.into())),
        }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Option<String> {
        self.value.lock().ok().and_then(|value| value.clone())
    }

    fn save(&self, value: &str) -> std::io::Result<()> {
        let mut guard = self
            .value
            .lock()
            .map_err(|_| std::io::Error::other("theme store lock poisoned"))?;
        *guard = Some(value.to_string());
        Ok(())
    }
}
