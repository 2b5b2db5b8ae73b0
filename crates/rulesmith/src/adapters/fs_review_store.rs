//! Filesystem review store
//!
//! Writes each optimization result to
//! `{dir}/optimized_rules_{category}_{YYYYMMDD_HHMMSS}.xml`.
//! Existing files are never overwritten: a second result for the same
//! category within the same second gets a `_1`, `_2`, ... suffix.

use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::domain::errors::DomainError;
use crate::ports::ReviewStore;

const FILE_PREFIX: &str = "optimized_rules";
const FILE_EXTENSION: &str = "xml";
const MAX_SUFFIX: u32 = 1000;

pub struct FsReviewStore {
    dir: PathBuf,
}

impl FsReviewStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save using an explicit timestamp
    pub async fn save_at(
        &self,
        category: &str,
        content: &str,
        timestamp: DateTime<Local>,
    ) -> Result<PathBuf, DomainError> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            DomainError::persistence(&format!("cannot create {}", self.dir.display()), e)
        })?;

        let category = sanitize_category(category);
        let stamp = timestamp.format("%Y%m%d_%H%M%S").to_string();

        for suffix in 0..MAX_SUFFIX {
            let path = self.dir.join(review_file_name(&category, &stamp, suffix));

            let mut file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(DomainError::persistence(
                        &format!("cannot create {}", path.display()),
                        e,
                    ))
                }
            };

            file.write_all(content.as_bytes()).await.map_err(|e| {
                DomainError::persistence(&format!("cannot write {}", path.display()), e)
            })?;
            file.flush().await.map_err(|e| {
                DomainError::persistence(&format!("cannot write {}", path.display()), e)
            })?;

            tracing::info!("✅ Optimized rules saved: {}", path.display());
            return Ok(path);
        }

        Err(DomainError::Persistence(format!(
            "no free file name for category '{category}' at {stamp}"
        )))
    }
}

#[async_trait]
impl ReviewStore for FsReviewStore {
    async fn save(&self, category: &str, content: &str) -> Result<PathBuf, DomainError> {
        self.save_at(category, content, Local::now()).await
    }
}

/// Make a category safe to embed in a file name
pub fn sanitize_category(category: &str) -> String {
    category
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn review_file_name(category: &str, stamp: &str, suffix: u32) -> String {
    if suffix == 0 {
        format!("{FILE_PREFIX}_{category}_{stamp}.{FILE_EXTENSION}")
    } else {
        format!("{FILE_PREFIX}_{category}_{stamp}_{suffix}.{FILE_EXTENSION}")
    }
}
