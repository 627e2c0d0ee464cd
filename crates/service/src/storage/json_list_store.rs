use std::{
    io,
    marker::PhantomData,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::{debug, warn};

use crate::errors::ServiceError;

/// JSON snapshot codec for an ordered list of records.
///
/// The file holds one top-level JSON array. Every save rewrites it
/// wholesale through a sibling `.tmp` file followed by a rename.
#[derive(Debug, Clone)]
pub struct JsonListCodec<T> {
    file_path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonListCodec<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned,
{
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), _records: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read the snapshot.
    ///
    /// A missing, empty or undecodable file yields an empty list. Only
    /// failures to open an existing path are returned as errors.
    pub async fn load(&self) -> Result<Vec<T>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(file = %self.file_path.display(), "snapshot absent, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(ServiceError::Storage(format!(
                    "cannot open {}: {e}",
                    self.file_path.display()
                )))
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        match serde_json::from_slice::<Vec<T>>(&bytes) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(file = %self.file_path.display(), error = %e, "snapshot is not a valid record list, starting empty");
                Ok(Vec::new())
            }
        }
    }

    /// Serialize `items` and replace the snapshot with it.
    pub async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| self.io_error("create directory for", e))?;
        }
        let data = serde_json::to_vec(items).map_err(|e| ServiceError::Storage(e.to_string()))?;

        let tmp = self.tmp_path();
        fs::write(&tmp, &data).await.map_err(|e| self.io_error("write", e))?;
        if let Err(e) = fs::rename(&tmp, &self.file_path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(self.io_error("replace", e));
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.file_path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }

    fn io_error(&self, action: &str, e: io::Error) -> ServiceError {
        ServiceError::Storage(format!("cannot {action} {}: {e}", self.file_path.display()))
    }
}
