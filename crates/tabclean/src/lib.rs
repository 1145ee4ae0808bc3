//! tabclean: cleaning pipeline for tabular datasets.
//!
//! Loads a `.csv` or `.xlsx` file, decides whether its first row is a
//! header, applies a fixed set of toggleable cleaning steps and exports the
//! result.
//!
//! # Core Principles
//!
//! - **Non-destructive**: cleaning always produces a new table
//! - **Typed columns**: each column is classified once as numeric or text
//! - **Fixed order**: trim → standardize names → fill missing → deduplicate
//!
//! # Example
//!
//! ```no_run
//! use tabclean::{CleaningOptions, Session};
//!
//! let mut session = Session::new();
//! session.load("survey.csv").unwrap();
//! session.set_options(CleaningOptions { fill_missing: false, ..CleaningOptions::default() });
//! session.clean().unwrap();
//!
//! let preview = session.preview().unwrap();
//! println!("Columns: {:?}", preview.columns);
//! session.save("survey_clean.xlsx").unwrap();
//! ```

pub mod clean;
pub mod error;
pub mod input;
pub mod output;
pub mod preview;
pub mod session;
pub mod table;

pub use clean::{CleanReport, CleanStep, Cleaner, CleaningOptions};
pub use error::{Result, TabcleanError};
pub use input::{FileFormat, HeaderMode, Loader, LoaderConfig, SourceMetadata};
pub use output::save;
pub use preview::{PREVIEW_ROW_LIMIT, Preview};
pub use session::{Notice, NoticeLevel, Precondition, Session, SessionError};
pub use table::{Cell, Column, ColumnKind, Table};
