use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

const SPANISH_MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Anything that covers an inclusive calendar period.
pub trait PeriodBounds {
    fn period_start(&self) -> NaiveDate;
    fn period_end(&self) -> NaiveDate;
}

/// Section label for a date, e.g. `"enero 2025"`.
pub fn month_label(date: NaiveDate) -> String {
    let month = SPANISH_MONTHS[date.month0() as usize];
    format!("{} {:04}", month, date.year())
}

/// One table section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodGroup<T> {
    pub label: String,
    pub records: Vec<T>,
}

/// Buckets records by the month of their period end.
///
/// Records are first sorted by period start, newest first (stable, so equal
/// starts keep their input order). Buckets are keyed on the rendered label and
/// appear in the order their first record was seen.
pub fn group_by_period_end<T, I>(records: I) -> Vec<PeriodGroup<T>>
where
    T: PeriodBounds,
    I: IntoIterator<Item = T>,
{
    let mut sorted: Vec<T> = records.into_iter().collect();
    sorted.sort_by(|a, b| b.period_start().cmp(&a.period_start()));

    let mut groups: Vec<PeriodGroup<T>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in sorted {
        let label = month_label(record.period_end());
        match index.get(&label) {
            Some(&at) => groups[at].records.push(record),
            None => {
                index.insert(label.clone(), groups.len());
                groups.push(PeriodGroup {
                    label,
                    records: vec![record],
                });
            }
        }
    }

    groups
}
