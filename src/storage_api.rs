use bytes::Bytes;
use futures::future::BoxFuture;

use crate::drive::file::FileEntry;
use crate::error::DriveResult;

pub type ApiFuture<'a, T> = BoxFuture<'a, DriveResult<T>>;

/// The remote file store. Every call is one request/response round trip;
/// non-2xx answers come back as `DriveError::Status`.
pub trait StorageApi: Send + Sync {
    fn list_files(&self) -> ApiFuture<'_, Vec<FileEntry>>;

    fn download<'a>(&'a self, name: &'a str) -> ApiFuture<'a, Bytes>;

    fn delete<'a>(&'a self, name: &'a str) -> ApiFuture<'a, ()>;

    fn upload<'a>(&'a self, name: &'a str, data: Bytes) -> ApiFuture<'a, ()>;

    fn file_info<'a>(&'a self, name: &'a str) -> ApiFuture<'a, FileEntry>;
}
