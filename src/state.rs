use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{null_as_default, optional_minutes, Settings, Snapshot, TimeEntry};

/// Where the persisted app state lives. Always passed in explicitly by the
/// caller; nothing in the crate goes looking for state on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSource {
    path: PathBuf,
}

impl StateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawState {
    #[serde(default, deserialize_with = "null_as_default")]
    entries: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    settings: Settings,
    #[serde(default, deserialize_with = "optional_minutes")]
    overtime_paid_minutes: Option<i64>,
}

/// Load the snapshot behind `source`. `Ok(None)` means there is nothing to
/// export (no file, or an empty one).
pub fn load_snapshot(source: &StateSource) -> Result<Option<Snapshot>> {
    let path = source.path();
    if !path.exists() {
        info!(path = %path.display(), "no persisted state found");
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        info!(path = %path.display(), "persisted state is empty");
        return Ok(None);
    }
    let snapshot = parse_snapshot(&content)?;
    debug!(
        path = %path.display(),
        entries = snapshot.entries.len(),
        "loaded snapshot"
    );
    Ok(Some(snapshot))
}

/// Decode a state document. Entries are decoded one at a time so a single
/// malformed record does not sink the whole export.
pub fn parse_snapshot(content: &str) -> Result<Snapshot> {
    let raw: RawState = serde_json::from_str(content)?;
    let mut settings = raw.settings;
    if let Some(paid) = raw.overtime_paid_minutes {
        settings.overtime_paid_minutes = paid;
    }

    let mut entries = Vec::with_capacity(raw.entries.len());
    for (idx, value) in raw.entries.into_iter().enumerate() {
        match serde_json::from_value::<TimeEntry>(value) {
            Ok(entry) => entries.push(entry),
            Err(e) => warn!(index = idx, error = %e, "skipping malformed entry"),
        }
    }

    Ok(Snapshot { entries, settings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryType;
    use crate::period::ExportMode;
    use crate::timesheet::Timesheet;

    #[test]
    fn test_missing_file_is_nothing_to_export() {
        let dir = tempfile::tempdir().unwrap();
        let source = StateSource::new(dir.path().join("absent.json"));
        assert!(load_snapshot(&source).unwrap().is_none());
    }

    #[test]
    fn test_empty_file_is_nothing_to_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "  \n").unwrap();
        assert!(load_snapshot(&StateSource::new(&path)).unwrap().is_none());
    }

    #[test]
    fn test_load_snapshot_reads_entries_and_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(
            &path,
            r#"{
                "entries": [
                    {"date":"2026-02-02","type":"Werk","netMin":480},
                    {"date":"2026-02-03","type":"Recup","netMin":0}
                ],
                "settings": {"normDayMin": 450, "lang": "en"}
            }"#,
        )
        .unwrap();
        let snap = load_snapshot(&StateSource::new(&path)).unwrap().unwrap();
        assert_eq!(snap.entries.len(), 2);
        assert_eq!(snap.entries[1].entry_type, EntryType::Recup);
        assert_eq!(snap.settings.lang, "en");
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let snap = parse_snapshot(
            r#"{"entries": [
                {"date":"2026-02-02","type":"Werk","netMin":480},
                "not an object",
                {"date":["2026-02-03"],"type":"Werk"},
                {"date":"2026-02-04","type":"Ziekte"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(snap.entries.len(), 2);
        assert_eq!(snap.entries[1].entry_type, EntryType::Sick);
    }

    #[test]
    fn test_null_fields_keep_entries_in_the_balance() {
        let snap = parse_snapshot(
            r#"{"entries": [
                {"date":"2026-01-20","type":"Recup","start":null,"end":null,"note":null,"netMin":null},
                {"date":"2026-02-02","type":"Werk","start":"08:00","end":"16:30","netMin":480,"note":null},
                {"date":"2026-02-03","type":"Overig","note":null}
            ], "settings": {"normDayMin": 450}}"#,
        )
        .unwrap();
        assert_eq!(snap.entries.len(), 3);
        assert_eq!(snap.entries[2].entry_type, EntryType::Other("Overig".to_string()));

        let range = ExportMode::Month("2026-02".into()).resolve().unwrap();
        let sheet = Timesheet::build(&snap, &range);
        assert_eq!(sheet.aggregate.prior_saldo_minutes, -450);
        assert_eq!(sheet.aggregate.total_work_minutes, 480);
        assert_eq!(sheet.aggregate.overtime_minutes, 30);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[1].info, "Overig");
    }

    #[test]
    fn test_null_settings_do_not_abort() {
        let snap = parse_snapshot(
            r#"{"entries": [], "settings": {"normDayMin": null, "employerName": null, "lang": null},
                "overtimePaidMinutes": null}"#,
        )
        .unwrap();
        assert_eq!(snap.settings.norm_day_minutes, 450);
        assert_eq!(snap.settings.employer_name, "");
        assert_eq!(snap.settings.overtime_paid_minutes, 0);

        let snap = parse_snapshot(r#"{"entries": null, "settings": null}"#).unwrap();
        assert!(snap.entries.is_empty());
        assert_eq!(snap.settings.norm_day_minutes, 450);
    }

    #[test]
    fn test_root_paid_minutes_wins() {
        let snap = parse_snapshot(
            r#"{"entries": [], "settings": {"overtimePaidMinutes": 10}, "overtimePaidMinutes": 90}"#,
        )
        .unwrap();
        assert_eq!(snap.settings.overtime_paid_minutes, 90);

        let snap =
            parse_snapshot(r#"{"settings": {"overtimePaidMinutes": 10}}"#).unwrap();
        assert_eq!(snap.settings.overtime_paid_minutes, 10);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(parse_snapshot("{ nope").is_err());
    }
}
