use crate::domain::model::StudentRecord;
use crate::utils::error::{DataFormat, Result, RosterError};

/// Pretty-printed JSON array, one object per record.
pub fn serialize_json(records: &[StudentRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).map_err(|e| RosterError::parse(DataFormat::Json, e.to_string()))
}

/// Parses a JSON array of records. Any error rejects the whole document.
pub fn deserialize_json(text: &str) -> Result<Vec<StudentRecord>> {
    let records: Vec<StudentRecord> =
        serde_json::from_str(text).map_err(|e| RosterError::parse(DataFormat::Json, e.to_string()))?;
    tracing::debug!("Parsed {} records from JSON", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Vec<StudentRecord> {
        vec![
            StudentRecord {
                last_name: "Smirnov".to_string(),
                first_name: "Pavel".to_string(),
                middle_name: "Andreevich".to_string(),
                course: 1,
                group: "IT-11".to_string(),
                birth_date: NaiveDate::from_ymd_opt(2006, 10, 5).unwrap(),
                email: "pavel@gmail.com".to_string(),
                phone: "+7-901-234-56-78".to_string(),
            },
            StudentRecord {
                last_name: "Orlova".to_string(),
                first_name: "Maria".to_string(),
                middle_name: String::new(),
                course: 4,
                group: "IT-41".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1999, 12, 31).unwrap(),
                email: "m.orlova@icloud.com".to_string(),
                phone: "+7-999-888-77-66".to_string(),
            },
        ]
    }

    #[test]
    fn test_round_trip() {
        let records = sample();
        let text = serialize_json(&records).unwrap();
        assert_eq!(deserialize_json(&text).unwrap(), records);
    }

    #[test]
    fn test_field_names_and_date_shape() {
        let text = serialize_json(&sample()[..1]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let obj = value[0].as_object().unwrap();

        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["BirthDate", "Course", "Email", "FirstName", "Group", "LastName", "MiddleName", "Phone"]
        );
        assert_eq!(obj["BirthDate"], "2006-10-05T00:00:00");
        assert_eq!(obj["Course"], 1);
    }

    #[test]
    fn test_null_or_missing_middle_name_becomes_empty() {
        let text = r#"[
            {"LastName":"A","FirstName":"B","MiddleName":null,"Course":2,"Group":"G",
             "BirthDate":"2000-01-01T00:00:00","Email":"abc@gmail.com","Phone":"+7-000-000-00-00"},
            {"LastName":"C","FirstName":"D","Course":3,"Group":"G",
             "BirthDate":"2001-02-03","Email":"abc@gmail.com","Phone":"+7-000-000-00-00"}
        ]"#;
        let records = deserialize_json(text).unwrap();
        assert_eq!(records[0].middle_name, "");
        assert_eq!(records[1].middle_name, "");
        assert_eq!(records[1].birth_date, NaiveDate::from_ymd_opt(2001, 2, 3).unwrap());
    }

    #[test]
    fn test_malformed_input_is_parse_error() {
        for text in [
            "not json",
            "{}",
            r#"[{"LastName":"A"}]"#,
            r#"[{"LastName":"A","FirstName":"B","MiddleName":"","Course":"two","Group":"G",
                 "BirthDate":"2000-01-01T00:00:00","Email":"e","Phone":"p"}]"#,
            r#"[{"LastName":"A","FirstName":"B","MiddleName":"","Course":2,"Group":"G",
                 "BirthDate":"01.01.2000","Email":"e","Phone":"p"}]"#,
        ] {
            assert!(
                matches!(
                    deserialize_json(text),
                    Err(RosterError::ParseError { format: DataFormat::Json, .. })
                ),
                "expected parse error for {text}"
            );
        }
    }

    #[test]
    fn test_empty_array_is_empty_roster() {
        assert!(deserialize_json("[]").unwrap().is_empty());
    }
}
