use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One student as held by the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StudentRecord {
    pub last_name: String,
    pub first_name: String,
    #[serde(default, deserialize_with = "birth_date::nullable_string")]
    pub middle_name: String,
    pub course: i32,
    pub group: String,
    #[serde(with = "birth_date")]
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: String,
}

/// Unvalidated input for a record, as typed into a form or passed on the
/// command line. Becomes a [`StudentRecord`] only through validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub course: String,
    pub group: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: String,
}

impl From<&StudentRecord> for StudentDraft {
    fn from(record: &StudentRecord) -> Self {
        Self {
            last_name: record.last_name.clone(),
            first_name: record.first_name.clone(),
            middle_name: record.middle_name.clone(),
            course: record.course.to_string(),
            group: record.group.clone(),
            birth_date: record.birth_date,
            email: record.email.clone(),
            phone: record.phone.clone(),
        }
    }
}

/// `BirthDate` is written as a date/time value at midnight and read back from
/// any of the date/time shapes other tools commonly produce.
pub(crate) mod birth_date {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const WRITE_FORMAT: &str = "%Y-%m-%dT00:00:00";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(WRITE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid BirthDate value '{}'", raw))
        })
    }

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(dt.date());
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.date_naive());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    pub fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }
}
