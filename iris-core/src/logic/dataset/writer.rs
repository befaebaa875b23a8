use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::logic::dataset::record::DatasetRecord;
use crate::logic::dataset::DatasetError;

/// CSV writer for labeled datasets. Emits the header on first row.
pub struct DatasetWriter<W: Write> {
    inner: csv::Writer<W>,
    rows: usize,
}

impl DatasetWriter<File> {
    /// Create (or truncate) `path`, creating parent directories as needed
    pub fn create(path: &Path) -> Result<Self, DatasetError> {
        let io_err = |source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let file = File::create(path).map_err(io_err)?;
        Ok(Self::from_writer(file))
    }
}

impl<W: Write> DatasetWriter<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            inner: csv::Writer::from_writer(writer),
            rows: 0,
        }
    }

    pub fn append(&mut self, record: &DatasetRecord) -> Result<(), DatasetError> {
        self.inner.serialize(record)?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the underlying writer
    pub fn finish(self) -> Result<W, DatasetError> {
        self.inner
            .into_inner()
            .map_err(|e| DatasetError::Flush(std::io::Error::new(e.error().kind(), e.error().to_string())))
    }
}

/// Write all rows to `path`
pub fn write_dataset(path: &Path, records: &[DatasetRecord]) -> Result<(), DatasetError> {
    let mut writer = DatasetWriter::create(path)?;
    for record in records {
        writer.append(record)?;
    }
    let rows = writer.rows_written();
    writer.finish()?;
    log::debug!("Wrote {} rows to {}", rows, path.display());
    Ok(())
}
