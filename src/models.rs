use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Kind of a logged day entry, read from the names the app persists.
/// Unknown names are kept as `Other` so the entry still shows up as a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum EntryType {
    Work,
    Vacation,
    Sick,
    Recup,
    Holiday,
    Other(String),
    #[default]
    Untyped,
}

impl EntryType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Werk" | "Work" => EntryType::Work,
            "Vakantie" | "Vacation" => EntryType::Vacation,
            "Ziekte" | "Sick" => EntryType::Sick,
            "Recup" => EntryType::Recup,
            "Feestdag" | "Holiday" => EntryType::Holiday,
            "" => EntryType::Untyped,
            other => EntryType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EntryType::Work => "Werk",
            EntryType::Vacation => "Vakantie",
            EntryType::Sick => "Ziekte",
            EntryType::Recup => "Recup",
            EntryType::Holiday => "Feestdag",
            EntryType::Other(name) => name,
            EntryType::Untyped => "",
        }
    }
}

impl Serialize for EntryType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntryType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(EntryType::from_name(&name))
    }
}

/// `null` reads as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Minutes as persisted: integer or fractional numbers (rounded), numeric
/// strings, anything else is absent.
fn lenient_minutes(value: &Value) -> Option<i64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then(|| n.round() as i64)
}

fn minutes_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(lenient_minutes(&Value::deserialize(deserializer)?).unwrap_or(0))
}

fn norm_day_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(lenient_minutes(&Value::deserialize(deserializer)?).unwrap_or_else(default_norm_day))
}

pub(crate) fn optional_minutes<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    Ok(lenient_minutes(&Value::deserialize(deserializer)?))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(rename = "type", default)]
    pub entry_type: EntryType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end: String,
    #[serde(
        rename = "netMin",
        alias = "netMinutes",
        default,
        deserialize_with = "minutes_or_zero"
    )]
    pub net_minutes: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Value>,
}

impl TimeEntry {
    /// A soft-deleted entry is excluded from every computation. Only a
    /// truthy marker counts: `""`, `false`, `0` and `null` do not.
    pub fn is_deleted(&self) -> bool {
        match &self.deleted_at {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().map_or(false, |v| v != 0.0 && !v.is_nan()),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }

    /// Entries without a date cannot be grouped and are left out.
    pub fn is_usable(&self) -> bool {
        !self.is_deleted() && !self.date.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(
        rename = "normDayMin",
        alias = "normDayMinutes",
        default = "default_norm_day",
        deserialize_with = "norm_day_or_default"
    )]
    pub norm_day_minutes: i64,
    #[serde(
        rename = "startSaldoMin",
        alias = "startSaldoMinutes",
        default,
        deserialize_with = "minutes_or_zero"
    )]
    pub start_saldo_minutes: i64,
    #[serde(default, deserialize_with = "minutes_or_zero")]
    pub overtime_paid_minutes: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub employer_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub employee_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lang: String,
}

/// 7h30
fn default_norm_day() -> i64 {
    450
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            norm_day_minutes: default_norm_day(),
            start_saldo_minutes: 0,
            overtime_paid_minutes: 0,
            employer_name: String::new(),
            employee_name: String::new(),
            lang: String::new(),
        }
    }
}

/// Read-only view of the persisted app state used for one report build.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub entries: Vec<TimeEntry>,
    pub settings: Settings,
}

impl Snapshot {
    /// Entries that take part in accounting: not deleted and dated.
    pub fn usable_entries(&self) -> impl Iterator<Item = &TimeEntry> {
        self.entries.iter().filter(|e| e.is_usable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_accepts_persisted_field_names() {
        let json = r#"{"date":"2026-02-02","type":"Werk","start":"08:00","end":"16:30","netMin":480,"note":""}"#;
        let e: TimeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(e.entry_type, EntryType::Work);
        assert_eq!(e.net_minutes, 480);
        assert!(e.is_usable());
    }

    #[test]
    fn test_entry_accepts_descriptive_names() {
        let json = r#"{"date":"2026-02-02","type":"Holiday","netMinutes":0}"#;
        let e: TimeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(e.entry_type, EntryType::Holiday);
        assert!(e.note.is_empty());
    }

    #[test]
    fn test_deleted_marker() {
        let json = r#"{"date":"2026-02-02","type":"Werk","netMin":60,"deletedAt":"2026-02-03T10:00:00Z"}"#;
        let e: TimeEntry = serde_json::from_str(json).unwrap();
        assert!(e.is_deleted());
        assert!(!e.is_usable());

        let json = r#"{"date":"2026-02-02","type":"Werk","netMin":60,"deletedAt":null}"#;
        let e: TimeEntry = serde_json::from_str(json).unwrap();
        assert!(!e.is_deleted());
    }

    #[test]
    fn test_falsy_deleted_markers_keep_entry() {
        for marker in [r#""""#, "false", "0"] {
            let json = format!(r#"{{"date":"2026-02-02","type":"Werk","deletedAt":{marker}}}"#);
            let e: TimeEntry = serde_json::from_str(&json).unwrap();
            assert!(!e.is_deleted(), "{marker}");
            assert!(e.is_usable());
        }
        for marker in ["true", "1", r#""x""#] {
            let json = format!(r#"{{"date":"2026-02-02","type":"Werk","deletedAt":{marker}}}"#);
            let e: TimeEntry = serde_json::from_str(&json).unwrap();
            assert!(e.is_deleted(), "{marker}");
        }
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let json = r#"{"date":"2026-01-20","type":"Recup","start":null,"end":null,"note":null,"netMin":null}"#;
        let e: TimeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(e.entry_type, EntryType::Recup);
        assert_eq!(e.start, "");
        assert_eq!(e.end, "");
        assert_eq!(e.note, "");
        assert_eq!(e.net_minutes, 0);
    }

    #[test]
    fn test_fractional_minutes_are_rounded() {
        let e: TimeEntry =
            serde_json::from_str(r#"{"date":"2026-02-02","type":"Werk","netMin":479.6}"#).unwrap();
        assert_eq!(e.net_minutes, 480);
        let e: TimeEntry =
            serde_json::from_str(r#"{"date":"2026-02-02","type":"Werk","netMin":"90"}"#).unwrap();
        assert_eq!(e.net_minutes, 90);
    }

    #[test]
    fn test_unknown_type_is_kept() {
        let e: TimeEntry =
            serde_json::from_str(r#"{"date":"2026-02-02","type":"Overig"}"#).unwrap();
        assert_eq!(e.entry_type, EntryType::Other("Overig".to_string()));
        let e: TimeEntry = serde_json::from_str(r#"{"date":"2026-02-02","type":null}"#).unwrap();
        assert_eq!(e.entry_type, EntryType::Untyped);
        let e: TimeEntry = serde_json::from_str(r#"{"date":"2026-02-02"}"#).unwrap();
        assert_eq!(e.entry_type, EntryType::Untyped);
    }

    #[test]
    fn test_entry_without_date_is_not_usable() {
        let json = r#"{"type":"Recup"}"#;
        let e: TimeEntry = serde_json::from_str(json).unwrap();
        assert!(!e.is_usable());
    }

    #[test]
    fn test_settings_defaults() {
        let s: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(s.norm_day_minutes, 450);
        assert_eq!(s.start_saldo_minutes, 0);
        assert!(s.lang.is_empty());

        let s: Settings =
            serde_json::from_str(r#"{"normDayMin":480,"startSaldoMin":-30,"employerName":"Acme"}"#)
                .unwrap();
        assert_eq!(s.norm_day_minutes, 480);
        assert_eq!(s.start_saldo_minutes, -30);
        assert_eq!(s.employer_name, "Acme");
    }

    #[test]
    fn test_null_settings_fall_back() {
        let s: Settings = serde_json::from_str(
            r#"{"normDayMin":null,"startSaldoMin":null,"overtimePaidMinutes":null,
                "employerName":null,"employeeName":null,"lang":null}"#,
        )
        .unwrap();
        assert_eq!(s.norm_day_minutes, 450);
        assert_eq!(s.start_saldo_minutes, 0);
        assert_eq!(s.overtime_paid_minutes, 0);
        assert_eq!(s.employer_name, "");
        assert_eq!(s.lang, "");
    }
}
