use crate::domain::model::{StudentDraft, StudentRecord};
use crate::utils::error::{Field, Result, RosterError};
use chrono::{Local, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[^@]{3,}@(yandex\.ru|gmail\.com|icloud\.com)$").expect("valid email pattern")
});

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+7-[0-9]{3}-[0-9]{3}-[0-9]{2}-[0-9]{2}$").expect("valid phone pattern")
});

/// Earliest birth date the roster accepts.
pub fn default_min_birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1991, 12, 25).expect("valid calendar date")
}

/// Knobs for the birth date rule, the only one that depends on context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub check_birth_date: bool,
    pub min_birth_date: NaiveDate,
    pub today: NaiveDate,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            check_birth_date: true,
            min_birth_date: default_min_birth_date(),
            today: Local::now().date_naive(),
        }
    }
}

pub fn validate_non_empty_string(field: Field, value: &str, reason: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RosterError::validation(field, reason));
    }
    Ok(())
}

pub fn validate_course(value: &str) -> Result<i32> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| RosterError::validation(Field::Course, "Course must be a number"))
}

pub fn validate_email(value: &str) -> Result<()> {
    if value.trim().is_empty() || !EMAIL_PATTERN.is_match(value) {
        return Err(RosterError::validation(
            Field::Email,
            "Invalid email. Allowed domains: yandex.ru, gmail.com, icloud.com",
        ));
    }
    Ok(())
}

pub fn validate_phone(value: &str) -> Result<()> {
    if !PHONE_PATTERN.is_match(value) {
        return Err(RosterError::validation(
            Field::Phone,
            "Phone must be in the format +7-XXX-XXX-XX-XX",
        ));
    }
    Ok(())
}

pub fn validate_birth_date(value: NaiveDate, policy: &ValidationPolicy) -> Result<()> {
    if value < policy.min_birth_date || value > policy.today {
        return Err(RosterError::validation(
            Field::BirthDate,
            format!(
                "Birth date must be between {} and {}",
                policy.min_birth_date.format("%d.%m.%Y"),
                policy.today.format("%d.%m.%Y")
            ),
        ));
    }
    Ok(())
}

/// Checks a draft against every field rule, stopping at the first failure.
/// The order matches the form's field order; the birth date rule comes last.
pub fn validate_draft(draft: &StudentDraft, policy: &ValidationPolicy) -> Result<StudentRecord> {
    validate_non_empty_string(Field::LastName, &draft.last_name, "Last name is required")?;
    validate_non_empty_string(Field::FirstName, &draft.first_name, "First name is required")?;
    let course = validate_course(&draft.course)?;
    validate_non_empty_string(Field::Group, &draft.group, "Group is required")?;
    validate_email(&draft.email)?;
    validate_phone(&draft.phone)?;
    if policy.check_birth_date {
        validate_birth_date(draft.birth_date, policy)?;
    }

    Ok(StudentRecord {
        last_name: draft.last_name.clone(),
        first_name: draft.first_name.clone(),
        middle_name: draft.middle_name.clone(),
        course,
        group: draft.group.clone(),
        birth_date: draft.birth_date,
        email: draft.email.clone(),
        phone: draft.phone.clone(),
    })
}
