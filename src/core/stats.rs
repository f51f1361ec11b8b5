use crate::domain::model::StudentRecord;
use std::collections::BTreeMap;
use std::fmt;

pub fn count_by_course(records: &[StudentRecord]) -> Vec<(i32, usize)> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.course).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

pub fn count_by_group(records: &[StudentRecord]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.group.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(group, count)| (group.to_string(), count))
        .collect()
}

/// Per-course and per-group head counts for a roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub total: usize,
    pub by_course: Vec<(i32, usize)>,
    pub by_group: Vec<(String, usize)>,
}

impl Statistics {
    pub fn from_records(records: &[StudentRecord]) -> Self {
        Self {
            total: records.len(),
            by_course: count_by_course(records),
            by_group: count_by_group(records),
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statistics by course:")?;
        for (course, count) in &self.by_course {
            writeln!(f, "  Course {}: {} students", course, count)?;
        }
        writeln!(f)?;
        writeln!(f, "Statistics by group:")?;
        for (group, count) in &self.by_group {
            writeln!(f, "  Group {}: {} students", group, count)?;
        }
        write!(f, "\nTotal: {} students", self.total)
    }
}

/// Columns a roster listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SortKey {
    LastName,
    Course,
    Group,
    BirthDate,
}

/// Stable ordering of the records by `key`, each paired with its position in
/// `records`. The input slice is untouched.
pub fn sorted_view(records: &[StudentRecord], key: SortKey) -> Vec<(usize, &StudentRecord)> {
    let mut view: Vec<(usize, &StudentRecord)> = records.iter().enumerate().collect();
    match key {
        SortKey::LastName => view.sort_by(|(_, a), (_, b)| a.last_name.cmp(&b.last_name)),
        SortKey::Course => view.sort_by_key(|(_, r)| r.course),
        SortKey::Group => view.sort_by(|(_, a), (_, b)| a.group.cmp(&b.group)),
        SortKey::BirthDate => view.sort_by_key(|(_, r)| r.birth_date),
    }
    view
}
