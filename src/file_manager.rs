use tokio::sync::Mutex;

use crate::dialog::Dialog;
use crate::download::DownloadSink;
use crate::drive::file::{FileEntry, SelectedFile};
use crate::error::{DriveError, DriveResult};
use crate::file_list::{FileList, FileRow, RowAction};
use crate::storage_api::StorageApi;

pub const LIST_FAILED: &str = "Failed to load files";
pub const DOWNLOAD_FAILED: &str = "Download failed";
pub const DELETE_FAILED: &str = "Delete failed";
pub const UPLOAD_FAILED: &str = "Upload failed";
pub const UPLOAD_SUCCEEDED: &str = "Upload successful!";
pub const INFO_FAILED: &str = "Could not get file info";

/// List, download, delete and upload against a [`StorageApi`], keeping the
/// last listing in memory.
///
/// Operations are independent and uncoordinated: two uploads of the same file
/// may race, and nothing cancels a request once it is sent. Every failure is
/// logged, shown through the [`Dialog`] and returned to the caller.
pub struct FileManager<A, D, S> {
    api: A,
    dialog: D,
    sink: S,
    list: Mutex<FileList>,
}

impl<A, D, S> FileManager<A, D, S>
where
    A: StorageApi,
    D: Dialog,
    S: DownloadSink,
{
    pub fn new(api: A, dialog: D, sink: S) -> FileManager<A, D, S> {
        FileManager {
            api,
            dialog,
            sink,
            list: Mutex::new(FileList::new()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn dialog(&self) -> &D {
        &self.dialog
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Copy of the current list model.
    pub async fn snapshot(&self) -> FileList {
        self.list.lock().await.clone()
    }

    pub async fn rows(&self) -> Vec<FileRow> {
        self.list.lock().await.render()
    }

    fn fail(&self, msg: &str, err: DriveError) -> DriveError {
        tracing::error!("{}: {}", msg, err);
        self.dialog.notify(msg);
        err
    }

    /// Fetch the listing and replace the model with it. On failure the old
    /// model stays as it was.
    pub async fn list_files(&self) -> DriveResult<()> {
        let entries = self
            .api
            .list_files()
            .await
            .map_err(|e| self.fail(LIST_FAILED, e))?;
        self.list.lock().await.replace(entries);
        Ok(())
    }

    pub async fn download_file(&self, name: &str) -> DriveResult<()> {
        let data = self
            .api
            .download(name)
            .await
            .map_err(|e| self.fail(DOWNLOAD_FAILED, e))?;
        self.sink
            .save(name, &data)
            .await
            .map_err(|e| self.fail(DOWNLOAD_FAILED, e))
    }

    /// Returns `Ok(false)` when the user declines.
    pub async fn delete_file(&self, name: &str) -> DriveResult<bool> {
        if !self.dialog.confirm(&format!("Delete \"{}\"?", name)) {
            tracing::debug!("delete of {} cancelled", name);
            return Ok(false);
        }
        self.api
            .delete(name)
            .await
            .map_err(|e| self.fail(DELETE_FAILED, e))?;
        self.list_files().await?;
        Ok(true)
    }

    /// Returns `Ok(false)` when nothing is selected.
    pub async fn upload_file(&self, selection: Option<SelectedFile>) -> DriveResult<bool> {
        let file = match selection {
            Some(file) => file,
            None => return Ok(false),
        };
        self.api
            .upload(&file.name, file.data)
            .await
            .map_err(|e| self.fail(UPLOAD_FAILED, e))?;
        self.dialog.notify(UPLOAD_SUCCEEDED);
        self.list_files().await?;
        Ok(true)
    }

    pub async fn file_info(&self, name: &str) -> DriveResult<FileEntry> {
        self.api
            .file_info(name)
            .await
            .map_err(|e| self.fail(INFO_FAILED, e))
    }

    /// Run the operation a rendered row's control is bound to.
    pub async fn activate(&self, action: &RowAction) -> DriveResult<()> {
        let name = action.target();
        match action {
            RowAction::Download(_) => self.download_file(name).await,
            RowAction::Delete(_) => self.delete_file(name).await.map(|_| ()),
        }
    }
}
