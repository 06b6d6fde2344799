//! Deployment bundle archive.
//!
//! A bundle is a single zip holding every file of every project in a run, laid
//! out in repository convention (`group/path/artifact/version/file`). It is
//! append-only while open and sealed exactly once by [`ZipBundle::finish`].
//! A bundle that is never finished is deleted when released, so a failed run
//! cannot leave something that looks like a valid deployment.

use crate::{
    bundler::{
        Error,
        error::{Context, ErrorExt, Result},
        utils::fs::{create_parent_dirs, discard_file},
    },
    metadata::Coordinates,
};
use std::{
    collections::HashSet,
    fs::File,
    io,
    path::{Path, PathBuf},
};
use zip::{CompressionMethod, DateTime, ZipWriter, write::SimpleFileOptions};

/// Appends files to a bundle at their repository-relative paths.
pub trait BundleBuilder {
    /// Streams `file` into a new entry at `repository_path(coordinates) + target_name`.
    ///
    /// Returns the entry path.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateEntry`] when the entry path was already appended
    /// - [`Error::Fs`] when `file` cannot be read
    /// - [`Error::Zip`] when the entry cannot be written
    fn append(&mut self, file: &Path, coordinates: &Coordinates, target_name: &str)
        -> Result<String>;
}

/// Zip-backed [`BundleBuilder`].
pub struct ZipBundle {
    path: PathBuf,
    writer: Option<ZipWriter<File>>,
    seen: HashSet<String>,
    entries: Vec<String>,
}

impl std::fmt::Debug for ZipBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipBundle")
            .field("path", &self.path)
            .field("open", &self.writer.is_some())
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl ZipBundle {
    /// Creates the archive at `path`, creating parent directories as needed.
    ///
    /// An existing file at `path` is truncated.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if path.is_dir() {
            crate::bail!("Bundle path {} is a directory", path.display());
        }
        create_parent_dirs(&path)?;
        let file = File::create(&path).fs_context("creating bundle", &path)?;
        log::debug!("Opened bundle {}", path.display());

        Ok(Self {
            path,
            writer: Some(ZipWriter::new(file)),
            seen: HashSet::new(),
            entries: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entry paths appended so far, in order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Writes the central directory and closes the archive.
    ///
    /// Consumes the bundle, so it can only happen once. On failure the partial
    /// file is removed.
    pub fn finish(mut self) -> Result<PathBuf> {
        let writer = self.writer.take().context("bundle already closed")?;
        let sealed = writer
            .finish()
            .map_err(Error::from)
            .and_then(|file| file.sync_all().fs_context("flushing bundle", &self.path));

        match sealed {
            Ok(()) => {
                log::info!(
                    "Sealed bundle {} ({} entries)",
                    self.path.display(),
                    self.entries.len()
                );
                Ok(self.path.clone())
            }
            Err(e) => {
                remove_unfinished(&self.path);
                Err(e)
            }
        }
    }

    /// Releases the archive without sealing it and deletes the file.
    pub fn discard(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(writer) = self.writer.take() {
            drop(writer);
            remove_unfinished(&self.path);
        }
    }
}

impl BundleBuilder for ZipBundle {
    fn append(
        &mut self,
        file: &Path,
        coordinates: &Coordinates,
        target_name: &str,
    ) -> Result<String> {
        let entry = format!("{}{}", coordinates.repository_path(), target_name);
        if self.seen.contains(&entry) {
            return Err(Error::DuplicateEntry(entry));
        }

        let writer = self.writer.as_mut().context("bundle already closed")?;
        let mut source = File::open(file).fs_context("opening file for bundle entry", file)?;
        let size = source
            .metadata()
            .fs_context("reading metadata of", file)?
            .len();

        writer.start_file(entry.as_str(), entry_options(size))?;
        io::copy(&mut source, writer).fs_context("writing bundle entry from", file)?;

        log::debug!("  + {}", entry);
        self.seen.insert(entry.clone());
        self.entries.push(entry.clone());
        Ok(entry)
    }
}

impl Drop for ZipBundle {
    fn drop(&mut self) {
        self.release();
    }
}

/// Fixed timestamp and permissions keep identical inputs byte-identical.
fn entry_options(size: u64) -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644)
        .large_file(size > u64::from(u32::MAX))
}

fn remove_unfinished(path: &Path) {
    log::warn!("Discarding unfinished bundle {}", path.display());
    discard_file(path, "unfinished bundle");
}
