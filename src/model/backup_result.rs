use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const RESULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Summary of one execute pass, as stored in `history.json` and `log.json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BackupResult {
    #[serde(with = "result_date")]
    pub date: NaiveDateTime,
    pub copied_files: usize,
    pub modified_files: usize,
    pub copied_folders: usize,
    pub modified_folders: usize,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub errors: Vec<String>,
}

impl BackupResult {
    pub fn date_label(&self) -> String {
        self.date.format(RESULT_DATE_FORMAT).to_string()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_changes(&self) -> bool {
        self.copied_files > 0 || self.modified_files > 0
    }
}

mod result_date {
    use super::RESULT_DATE_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(RESULT_DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&value, RESULT_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn serializes_with_history_schema() {
        let result = BackupResult {
            date: NaiveDate::from_ymd_opt(2026, 3, 2)
                .unwrap()
                .and_hms_opt(14, 5, 9)
                .unwrap(),
            copied_files: 2,
            modified_files: 1,
            copied_folders: 1,
            modified_folders: 3,
            source: PathBuf::from("/data/photos"),
            destination: PathBuf::from("/mnt/backup/photos"),
            errors: vec![],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["date"], "2026-03-02 14:05:09");
        assert_eq!(json["copied_files"], 2);
        assert_eq!(json["errors"], serde_json::json!([]));

        let parsed: BackupResult = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, result);
        assert_eq!(parsed.date_label(), "2026-03-02 14:05:09");
        assert!(parsed.has_changes());
        assert!(!parsed.has_errors());
    }
}
