use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid image name: {0}")]
    InvalidName(String),

    #[error("Image not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A stored image as listed on the dashboard
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GalleryEntry {
    pub name: String,
    pub modified: DateTime<Utc>,
    pub size: u64,
}

/// Flat directory of converted PNGs named `img_<unix seconds>[-n].png`
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Open the store, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        tracing::info!(dir = %dir.display(), "Opened image store");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist PNG bytes under a fresh name and return that name
    ///
    /// The name is claimed with `create_new`, so concurrent saves in the same
    /// second each get their own `-n` suffix.
    pub fn save(&self, png: &[u8]) -> Result<String, StoreError> {
        let stamp = Utc::now().timestamp();
        let mut n = 0u32;
        loop {
            let name = if n == 0 {
                format!("img_{stamp}.png")
            } else {
                format!("img_{stamp}-{n}.png")
            };
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.dir.join(&name))
            {
                Ok(mut file) => {
                    file.write_all(png)?;
                    tracing::debug!(name = %name, bytes = png.len(), "Stored image");
                    return Ok(name);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => n += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Read a stored image by name
    pub fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        validate_name(name)?;
        match fs::read(self.dir.join(name)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// All stored PNGs, newest first
    pub fn list(&self) -> Result<Vec<GalleryEntry>, StoreError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if validate_name(&name).is_err() {
                continue;
            }
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_default();
            entries.push(GalleryEntry {
                name,
                modified,
                size: metadata.len(),
            });
        }

        entries.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| sequence(&b.name).cmp(&sequence(&a.name)))
                .then_with(|| b.name.cmp(&a.name))
        });
        Ok(entries)
    }
}

/// Accept plain `.png` file names only
pub fn validate_name(name: &str) -> Result<(), StoreError> {
    let valid = name.ends_with(".png")
        && name.len() > ".png".len()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
        && !name.contains("..");
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidName(name.to_string()))
    }
}

/// (timestamp, suffix) parsed from `img_<ts>[-n].png`, for ordering same-second saves
fn sequence(name: &str) -> (i64, u32) {
    let stem = name
        .strip_prefix("img_")
        .and_then(|s| s.strip_suffix(".png"))
        .unwrap_or("");
    let (stamp, suffix) = stem.split_once('-').unwrap_or((stem, "0"));
    (stamp.parse().unwrap_or(0), suffix.parse().unwrap_or(0))
}
