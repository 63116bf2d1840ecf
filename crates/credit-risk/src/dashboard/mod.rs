//! Static analytics dataset consumed by the dashboard charts.
//!
//! The dataset is built offline from an application export and read once when the service
//! starts. Scoring never touches it.

mod builder;
mod views;

pub use builder::{ApplicationRow, DatasetBuilder, DEFAULT_SCATTER_LIMIT};
pub use views::{
    AgeBucket, CategoryCount, ColoredSlice, DashboardData, DefaultRate, EducationCredit,
    MonthlyCount, Overview, RangeCount, ScatterPoint,
};

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Failures while reading, building, or writing the dataset.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("unable to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed dashboard json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed application export: {0}")]
    Csv(#[from] csv::Error),
    #[error("application export contains no rows")]
    EmptyDataset,
    #[error("dashboard dataset has not been loaded")]
    NotLoaded,
}

impl DashboardData {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DashboardError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DashboardError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DashboardError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Writes pretty-printed JSON, creating parent directories as needed.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), DashboardError> {
        let path = path.as_ref();
        let io_error = |source: std::io::Error| DashboardError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let file = File::create(path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(io_error)?;
        Ok(())
    }
}
