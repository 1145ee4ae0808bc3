//! Session state: the loaded table, the latest cleaned table, and the
//! guarded operations that move between them.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::clean::{CleanReport, Cleaner, CleaningOptions};
use crate::error::TabcleanError;
use crate::input::{Loader, LoaderConfig, SourceMetadata};
use crate::output;
use crate::preview::Preview;
use crate::table::Table;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Short human-readable message reporting the outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, message)
    }

    fn new(level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// An action was requested before the state it needs exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// Cleaning needs a loaded table.
    NotLoaded,
    /// Preview and save need a cleaned table.
    NotCleaned,
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precondition::NotLoaded => write!(f, "Please load a file first."),
            Precondition::NotCleaned => write!(f, "Please clean the data first."),
        }
    }
}

/// Why a session action failed. The session is unchanged after any error.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The file could not be read or parsed.
    #[error("Failed to load file: {0}")]
    Load(#[source] TabcleanError),

    /// The action was invoked out of order.
    #[error("{0}")]
    Precondition(Precondition),

    /// The cleaned table could not be written.
    #[error("Failed to save file: {0}")]
    Save(#[source] TabcleanError),
}

impl SessionError {
    /// User-facing notice for this error. Out-of-order actions are warnings.
    pub fn notice(&self) -> Notice {
        match self {
            SessionError::Load(_) => Notice::error("Load failed", self.to_string()),
            SessionError::Precondition(Precondition::NotLoaded) => {
                Notice::warning("No data", self.to_string())
            }
            SessionError::Precondition(Precondition::NotCleaned) => {
                Notice::warning("Not cleaned", self.to_string())
            }
            SessionError::Save(_) => Notice::error("Save failed", self.to_string()),
        }
    }

    /// Returns true for out-of-order actions.
    pub fn is_precondition(&self) -> bool {
        matches!(self, SessionError::Precondition(_))
    }
}

/// A table as loaded from disk.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub table: Table,
    pub source: SourceMetadata,
}

/// The result of the most recent clean.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    pub table: Table,
    pub report: CleanReport,
    /// Options the table was cleaned with.
    pub options: CleaningOptions,
}

/// Holds the working tables between user actions.
///
/// Each action runs to completion; `&mut self` keeps at most one in flight.
#[derive(Debug, Clone, Default)]
pub struct Session {
    loader: Loader,
    options: CleaningOptions,
    loaded: Option<LoadedTable>,
    cleaned: Option<CleanedTable>,
}

impl Session {
    /// Create an empty session with default loader and cleaning options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with custom loader configuration.
    pub fn with_loader(config: LoaderConfig) -> Self {
        Self {
            loader: Loader::with_config(config),
            ..Self::default()
        }
    }

    /// Options used by the next [`Session::clean`].
    pub fn options(&self) -> &CleaningOptions {
        &self.options
    }

    /// Replace the options used by the next clean.
    pub fn set_options(&mut self, options: CleaningOptions) {
        self.options = options;
    }

    /// The loaded table, if any.
    pub fn loaded(&self) -> Option<&LoadedTable> {
        self.loaded.as_ref()
    }

    /// The most recently cleaned table, if any.
    pub fn cleaned(&self) -> Option<&CleanedTable> {
        self.cleaned.as_ref()
    }

    /// Load a file, replacing the current table and discarding any cleaned
    /// result. On failure the session keeps its previous state.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Notice, SessionError> {
        let path = path.as_ref();
        let (table, source) = self.loader.load(path).map_err(|e| {
            error!(file = %path.display(), error = %e, "load failed");
            SessionError::Load(e)
        })?;

        let notice = Notice::info(
            "File loaded",
            format!(
                "Loaded {} ({} rows, {} columns)",
                path.display(),
                table.row_count(),
                table.column_count()
            ),
        );
        self.loaded = Some(LoadedTable { table, source });
        self.cleaned = None;
        Ok(notice)
    }

    /// Clean the loaded table with the session options.
    pub fn clean(&mut self) -> Result<Notice, SessionError> {
        let loaded = self
            .loaded
            .as_ref()
            .ok_or_else(|| precondition(Precondition::NotLoaded))?;

        let (table, report) = Cleaner::new(self.options).clean(&loaded.table);
        let notice = Notice::info(
            "Cleaned",
            format!("Data cleaned successfully: {}", report.summary()),
        );
        self.cleaned = Some(CleanedTable {
            table,
            report,
            options: self.options,
        });
        Ok(notice)
    }

    /// Preview the cleaned table.
    pub fn preview(&self) -> Result<Preview, SessionError> {
        let cleaned = self
            .cleaned
            .as_ref()
            .ok_or_else(|| precondition(Precondition::NotCleaned))?;
        Ok(Preview::of(&cleaned.table))
    }

    /// Save the cleaned table. On failure the cleaned table stays available
    /// for another attempt.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<Notice, SessionError> {
        let path = path.as_ref();
        let cleaned = self
            .cleaned
            .as_ref()
            .ok_or_else(|| precondition(Precondition::NotCleaned))?;

        output::save(&cleaned.table, path).map_err(|e| {
            error!(file = %path.display(), error = %e, "save failed");
            SessionError::Save(e)
        })?;

        Ok(Notice::info(
            "Saved",
            format!("Cleaned file saved to {}", path.display()),
        ))
    }
}

fn precondition(which: Precondition) -> SessionError {
    warn!(%which, "action requested out of order");
    SessionError::Precondition(which)
}
