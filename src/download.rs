use std::ffi::OsString;
use std::path::{Path, PathBuf};

use futures::future::{BoxFuture, FutureExt};
use tokio::fs;

use crate::error::{DriveError, DriveResult};

pub type SinkFuture<'a> = BoxFuture<'a, DriveResult<()>>;

/// Where downloaded bytes end up.
pub trait DownloadSink: Send + Sync {
    fn save<'a>(&'a self, name: &'a str, data: &'a [u8]) -> SinkFuture<'a>;
}

/// Writes each download to `<dir>/<name>`.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> DirectorySink {
        DirectorySink { dir: dir.into() }
    }

    /// Only the final path component of `name` is used.
    pub fn target(&self, name: &str) -> DriveResult<PathBuf> {
        let file_name = Path::new(name)
            .file_name()
            .ok_or_else(|| DriveError::InvalidFilename(name.to_string()))?;
        Ok(self.dir.join(file_name))
    }
}

// `<dir>/.<name>.part`, renamed over the target once fully written.
fn partial_path(target: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(target.file_name().unwrap_or_default());
    name.push(".part");
    target.with_file_name(name)
}

impl DownloadSink for DirectorySink {
    fn save<'a>(&'a self, name: &'a str, data: &'a [u8]) -> SinkFuture<'a> {
        async move {
            let path = self.target(name)?;
            fs::create_dir_all(&self.dir).await?;
            let partial = partial_path(&path);
            if let Err(e) = fs::write(&partial, data).await {
                let _ = fs::remove_file(&partial).await;
                return Err(e.into());
            }
            fs::rename(&partial, &path).await?;
            tracing::info!("saved {} ({} bytes)", path.display(), data.len());
            Ok(())
        }
        .boxed()
    }
}
