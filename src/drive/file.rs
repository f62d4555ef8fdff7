use serde::{Deserialize, Serialize};

/// Metadata the server reports for one stored file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<u64>,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, size: u64) -> FileEntry {
        FileEntry {
            name: name.into(),
            size,
            modified: None,
        }
    }
}

/// Body of `GET /api/files`.
#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct FileListing {
    pub files: Vec<FileEntry>,
}

/// A file picked for upload.
#[derive(Clone, Debug)]
pub struct SelectedFile {
    pub name: String,
    pub data: bytes::Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_accepts_modified_time() {
        let listing: FileListing = serde_json::from_str(
            r#"{"files": [{"name": "a.txt", "size": 10, "modified": 1700000000}, {"name": "b", "size": 0}]}"#,
        )
        .unwrap();
        assert_eq!(listing.files.len(), 2);
        assert_eq!(listing.files[0].modified, Some(1700000000));
        assert_eq!(listing.files[1], FileEntry::new("b", 0));
    }

    #[test]
    fn listing_without_files_key_is_rejected() {
        assert!(serde_json::from_str::<FileListing>(r#"{"error": "Cannot list files"}"#).is_err());
    }
}
