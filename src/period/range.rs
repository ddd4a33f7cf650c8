use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::grouper::PeriodBounds;

/// Optional date filter shared by list screens and forwarded to the backend
/// as query parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams, ToSchema)]
pub struct DateRange {
    #[schema(example = "2025-01-01", value_type = Option<String>, format = "date")]
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::utils::de::opt_date_lenient"
    )]
    pub period_start: Option<NaiveDate>,

    #[schema(example = "2025-01-31", value_type = Option<String>, format = "date")]
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::utils::de::opt_date_lenient"
    )]
    pub period_end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(period_start: Option<NaiveDate>, period_end: Option<NaiveDate>) -> Self {
        Self {
            period_start,
            period_end,
        }
    }

    /// Record starts on or after the range start and ends on or before the
    /// range end. Unset bounds do not filter.
    pub fn contains<T: PeriodBounds>(&self, record: &T) -> bool {
        let after_start = self
            .period_start
            .is_none_or(|from| record.period_start() >= from);
        let before_end = self
            .period_end
            .is_none_or(|to| record.period_end() <= to);

        after_start && before_end
    }

    pub fn filter<T: PeriodBounds>(&self, records: Vec<T>) -> Vec<T> {
        records.into_iter().filter(|r| self.contains(r)).collect()
    }

    /// January 1st of `today`'s year through the last day of its month.
    pub fn year_to_month_end(today: NaiveDate) -> Self {
        let start = NaiveDate::from_ymd_opt(today.year(), 1, 1);
        let end = today
            .with_day(1)
            .and_then(|first| first.checked_add_months(Months::new(1)))
            .and_then(|next| next.pred_opt());
        Self::new(start, end)
    }

    /// Fills unset bounds from `fallback`.
    pub fn or(self, fallback: DateRange) -> Self {
        Self {
            period_start: self.period_start.or(fallback.period_start),
            period_end: self.period_end.or(fallback.period_end),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.period_start.is_none() && self.period_end.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Eval(NaiveDate, NaiveDate);

    impl PeriodBounds for Eval {
        fn period_start(&self) -> NaiveDate {
            self.0
        }
        fn period_end(&self) -> NaiveDate {
            self.1
        }
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn unset_range_keeps_everything() {
        let range = DateRange::default();
        assert!(range.is_empty());
        assert!(range.contains(&Eval(d("1999-01-01"), d("2099-01-01"))));
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = DateRange::new(Some(d("2025-01-01")), Some(d("2025-03-31")));
        assert!(range.contains(&Eval(d("2025-01-01"), d("2025-03-31"))));
        assert!(!range.contains(&Eval(d("2024-12-31"), d("2025-01-15"))));
        assert!(!range.contains(&Eval(d("2025-03-01"), d("2025-04-01"))));
    }

    #[test]
    fn filter_applies_each_bound_alone() {
        let records = vec![
            Eval(d("2025-01-01"), d("2025-01-31")),
            Eval(d("2025-02-01"), d("2025-02-28")),
            Eval(d("2025-03-01"), d("2025-03-31")),
        ];
        let from_feb = DateRange::new(Some(d("2025-02-01")), None);
        assert_eq!(from_feb.filter(records).len(), 2);

        let records = vec![
            Eval(d("2025-01-01"), d("2025-01-31")),
            Eval(d("2025-02-01"), d("2025-02-28")),
        ];
        let until_jan = DateRange::new(None, Some(d("2025-01-31")));
        assert_eq!(until_jan.filter(records).len(), 1);
    }

    #[test]
    fn default_range_runs_from_new_year_to_month_end() {
        let range = DateRange::year_to_month_end(d("2024-02-10"));
        assert_eq!(range.period_start, Some(d("2024-01-01")));
        assert_eq!(range.period_end, Some(d("2024-02-29")));

        let december = DateRange::year_to_month_end(d("2025-12-31"));
        assert_eq!(december.period_end, Some(d("2025-12-31")));
    }

    #[test]
    fn explicit_bounds_win_over_fallback() {
        let fallback = DateRange::year_to_month_end(d("2025-06-15"));
        let chosen = DateRange::new(Some(d("2025-03-01")), None).or(fallback);
        assert_eq!(chosen.period_start, Some(d("2025-03-01")));
        assert_eq!(chosen.period_end, Some(d("2025-06-30")));
    }
}
