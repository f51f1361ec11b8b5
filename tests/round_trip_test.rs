use chrono::NaiveDate;
use student_roster::{
    count_by_course, count_by_group, deserialize_json, parse_csv, serialize_csv, serialize_json,
    DataFormat, RosterError, StudentRecord,
};

fn student(last_name: &str, course: i32, group: &str, born: (i32, u32, u32)) -> StudentRecord {
    StudentRecord {
        last_name: last_name.to_string(),
        first_name: "Svetlana".to_string(),
        middle_name: if course % 2 == 0 { "Igorevna".to_string() } else { String::new() },
        course,
        group: group.to_string(),
        birth_date: NaiveDate::from_ymd_opt(born.0, born.1, born.2).unwrap(),
        email: format!("{}@gmail.com", last_name.to_lowercase()),
        phone: "+7-916-222-33-44".to_string(),
    }
}

fn roster() -> Vec<StudentRecord> {
    vec![
        student("Nikolaeva", 1, "EK-11", (2006, 1, 31)),
        student("Gromova", 2, "EK-21", (2005, 2, 28)),
        student("Tarasova", 1, "EK-11", (2006, 12, 1)),
        student("Vasilieva", 4, "EK-41", (1991, 12, 25)),
    ]
}

#[test]
fn test_json_and_csv_round_trip_agree() {
    let records = roster();

    let from_json = deserialize_json(&serialize_json(&records).unwrap()).unwrap();
    let from_csv = parse_csv(&serialize_csv(&records).unwrap()).unwrap();

    assert_eq!(from_json, records);
    assert_eq!(from_csv, records);
}

#[test]
fn test_json_written_by_desktop_app_loads() {
    let text = r#"[
  {
    "LastName": "Belov",
    "FirstName": "Kirill",
    "MiddleName": "Olegovich",
    "Course": 3,
    "Group": "SE-31",
    "BirthDate": "2002-11-17T00:00:00",
    "Email": "kirill@yandex.ru",
    "Phone": "+7-925-765-43-21"
  }
]"#;
    let records = deserialize_json(text).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].birth_date, NaiveDate::from_ymd_opt(2002, 11, 17).unwrap());
    assert_eq!(records[0].middle_name, "Olegovich");
}

#[test]
fn test_csv_import_mixed_quality_file() {
    let text = "LastName,FirstName,MiddleName,Course,Group,BirthDate,Email,Phone\n\
                Belov,Kirill,,3,SE-31,17.11.2002,kirill@yandex.ru,+7-925-765-43-21\n\
                Belov,Kirill\n\
                Zueva,Olga,Pavlovna,1,SE-11,05.05.2006,olga@icloud.com,+7-925-000-00-01,note\n";
    let records = parse_csv(text).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].course, 3);
    assert_eq!(records[1].middle_name, "Pavlovna");
}

#[test]
fn test_csv_import_rejects_whole_file_on_bad_date() {
    let text = "LastName,FirstName,MiddleName,Course,Group,BirthDate,Email,Phone\n\
                Belov,Kirill,,3,SE-31,17.11.2002,kirill@yandex.ru,+7-925-765-43-21\n\
                Zueva,Olga,,1,SE-11,2006-05-05,olga@icloud.com,+7-925-000-00-01\n";
    assert!(matches!(
        parse_csv(text),
        Err(RosterError::ParseError { format: DataFormat::Csv, .. })
    ));
}

#[test]
fn test_counts_cover_every_record() {
    let records = roster();
    let by_course = count_by_course(&records);
    let by_group = count_by_group(&records);

    assert_eq!(by_course, vec![(1, 2), (2, 1), (4, 1)]);
    assert_eq!(by_course.iter().map(|(_, n)| n).sum::<usize>(), records.len());
    assert_eq!(by_group.iter().map(|(_, n)| n).sum::<usize>(), records.len());

    let groups: Vec<&str> = by_group.iter().map(|(g, _)| g.as_str()).collect();
    assert_eq!(groups, vec!["EK-11", "EK-21", "EK-41"]);
}
