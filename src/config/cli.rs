use crate::core::csv_codec::parse_csv_date;
use crate::core::stats::SortKey;
use crate::domain::model::StudentDraft;
use crate::utils::error::{Field, Result, RosterError};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "roster")]
#[command(about = "Keep a roster of student records in a JSON file")]
pub struct CliConfig {
    /// Path to the TOML configuration file (optional)
    #[arg(long, default_value = "roster.toml")]
    pub config: String,

    /// Data file to work on, overriding storage.data_file
    #[arg(long)]
    pub data: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add a student
    Add(StudentArgs),
    /// Change fields of an existing student; omitted fields keep their value
    Edit {
        index: usize,
        #[command(flatten)]
        fields: StudentArgs,
    },
    /// Remove a student
    Delete { index: usize },
    /// Print the roster
    List {
        #[arg(long, value_enum)]
        sort: Option<SortKey>,
    },
    /// Head counts per course and per group
    Stats,
    /// Write the roster to a CSV file
    Export { path: String },
    /// Replace the roster with the contents of a CSV file
    Import { path: String },
    /// Validate student fields without storing them
    Check(StudentArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct StudentArgs {
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub middle_name: Option<String>,
    #[arg(long)]
    pub course: Option<String>,
    #[arg(long)]
    pub group: Option<String>,
    /// Birth date as dd.mm.yyyy
    #[arg(long)]
    pub birth_date: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

impl StudentArgs {
    /// A fresh draft. Missing text fields stay empty so validation reports
    /// them; a missing birth date defaults to `today`.
    pub fn into_draft(self, today: NaiveDate) -> Result<StudentDraft> {
        let base = StudentDraft {
            last_name: String::new(),
            first_name: String::new(),
            middle_name: String::new(),
            course: String::new(),
            group: String::new(),
            birth_date: today,
            email: String::new(),
            phone: String::new(),
        };
        self.apply_to(base)
    }

    /// Overlays the given fields on an existing draft.
    pub fn apply_to(self, mut draft: StudentDraft) -> Result<StudentDraft> {
        if let Some(v) = self.last_name {
            draft.last_name = v;
        }
        if let Some(v) = self.first_name {
            draft.first_name = v;
        }
        if let Some(v) = self.middle_name {
            draft.middle_name = v;
        }
        if let Some(v) = self.course {
            draft.course = v;
        }
        if let Some(v) = self.group {
            draft.group = v;
        }
        if let Some(raw) = self.birth_date {
            draft.birth_date = parse_csv_date(raw.trim()).ok_or_else(|| {
                RosterError::validation(Field::BirthDate, "Birth date must be written as dd.mm.yyyy")
            })?;
        }
        if let Some(v) = self.email {
            draft.email = v;
        }
        if let Some(v) = self.phone {
            draft.phone = v;
        }
        Ok(draft)
    }
}
