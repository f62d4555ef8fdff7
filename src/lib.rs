//! Client for the LAN Drive file storage HTTP API.

pub mod dialog;
pub mod download;
pub mod drive;
pub mod error;
pub mod file_list;
pub mod file_manager;
pub mod storage_api;

pub use crate::dialog::{Dialog, TerminalDialog};
pub use crate::download::{DirectorySink, DownloadSink};
pub use crate::drive::client::DriveClient;
pub use crate::drive::config::Config;
pub use crate::drive::file::{FileEntry, SelectedFile};
pub use crate::error::{DriveError, DriveResult};
pub use crate::file_list::{FileList, FileRow, RowAction};
pub use crate::file_manager::FileManager;
pub use crate::storage_api::StorageApi;
