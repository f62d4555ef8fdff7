use std::fmt;

use chrono::{TimeZone, Utc};

use crate::drive::file::FileEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Download(String),
    Delete(String),
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Download(_) => "Download",
            RowAction::Delete(_) => "Delete",
        }
    }

    pub fn target(&self) -> &str {
        match self {
            RowAction::Download(name) | RowAction::Delete(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRow {
    pub label: String,
    pub actions: [RowAction; 2],
}

impl FileRow {
    fn from_entry(entry: &FileEntry) -> FileRow {
        FileRow {
            label: format!("{} ({} bytes)", entry.name, entry.size),
            actions: [
                RowAction::Download(entry.name.clone()),
                RowAction::Delete(entry.name.clone()),
            ],
        }
    }
}

/// The entries of the last successful listing. Rows are always derived from
/// the entries, never the other way round.
#[derive(Debug, Clone, Default)]
pub struct FileList {
    entries: Vec<FileEntry>,
}

impl FileList {
    pub fn new() -> FileList {
        FileList::default()
    }

    /// Drop whatever was listed before and take `entries` as the new state.
    pub fn replace(&mut self, entries: Vec<FileEntry>) {
        self.entries = entries;
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn render(&self) -> Vec<FileRow> {
        self.entries.iter().map(FileRow::from_entry).collect()
    }
}

impl fmt::Display for FileList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "No files on server");
        }
        for row in self.render() {
            let actions: Vec<&str> = row.actions.iter().map(RowAction::label).collect();
            writeln!(f, "{}  [{}]", row.label, actions.join("] ["))?;
        }
        Ok(())
    }
}

/// Human readable size, e.g. `1.5 KB`.
pub fn format_size(size: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if size == 0 {
        return "0 B".to_string();
    }
    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// `%Y-%m-%d %H:%M` in UTC; zero or out-of-range stamps are `Unknown`.
pub fn format_timestamp(secs: u64) -> String {
    if secs == 0 || secs > i64::MAX as u64 {
        return "Unknown".to_string();
    }
    match Utc.timestamp_opt(secs as i64, 0).single() {
        Some(time) => time.format("%Y-%m-%d %H:%M").to_string(),
        None => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_entry_one_row() {
        let mut list = FileList::new();
        list.replace(vec![FileEntry::new("a.txt", 10)]);
        let rows = list.render();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "a.txt (10 bytes)");
        assert_eq!(
            rows[0].actions,
            [
                RowAction::Download("a.txt".to_string()),
                RowAction::Delete("a.txt".to_string())
            ]
        );
    }

    #[test]
    fn replace_discards_previous_rows() {
        let mut list = FileList::new();
        list.replace(vec![FileEntry::new("a.txt", 10), FileEntry::new("b.bin", 2048)]);
        list.replace(vec![]);
        assert!(list.render().is_empty());
        assert_eq!(list.to_string(), "No files on server\n");
    }

    #[test]
    fn display_lists_actions() {
        let mut list = FileList::new();
        list.replace(vec![FileEntry::new("a.txt", 10)]);
        assert_eq!(list.to_string(), "a.txt (10 bytes)  [Download] [Delete]\n");
    }

    #[test]
    fn sizes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512.0 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024 * 1024), "5120.0 GB");
    }

    #[test]
    fn timestamps() {
        assert_eq!(format_timestamp(1700000000), "2023-11-14 22:13");
        assert_eq!(format_timestamp(0), "Unknown");
        assert_eq!(format_timestamp(u64::MAX), "Unknown");
    }

    #[test]
    fn entries_follow_last_replace() {
        let mut list = FileList::new();
        list.replace(vec![FileEntry::new("a.txt", 10)]);
        list.replace(vec![FileEntry::new("b.bin", 1)]);
        assert_eq!(list.entries(), &[FileEntry::new("b.bin", 1)][..]);
    }
}
