//! Statistics aggregation.
//!
//! Pure functions over expense rows: resolve a reporting window, bucket
//! expenses per category (with a sentinel for "all categories") and sum the
//! buckets per currency. Everything here is independent of the database and
//! of the chat layer, which keeps it directly testable.

use std::collections::HashMap;

use chrono::{Days, Months, NaiveDate};

use crate::expenses;

/// Sentinel category id meaning "every category". Real categories get
/// positive autoincrement ids, so the two can never collide.
pub const ALL_CATEGORIES_ID: i64 = -1;

/// A named reporting window, anchored to "today".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
    All,
}

impl Period {
    /// The wire tag used in callback payloads.
    pub fn tag(&self) -> &'static str {
        match self {
            Period::Day => "day_period",
            Period::Week => "week_period",
            Period::Month => "month_period",
            Period::Year => "year_period",
            Period::All => "all_time_period",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Period> {
        match tag {
            "day_period" => Some(Period::Day),
            "week_period" => Some(Period::Week),
            "month_period" => Some(Period::Month),
            "year_period" => Some(Period::Year),
            "all_time_period" => Some(Period::All),
            _ => None,
        }
    }
}

/// Resolve a named period to an inclusive `[start, end]` date range.
///
/// Month and year use calendar arithmetic, not a fixed day count, so "a
/// month before March 31st" clamps to the end of February.
pub fn resolve_period(period: Period, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = match period {
        Period::Day => today.checked_sub_days(Days::new(1)),
        Period::Week => today.checked_sub_days(Days::new(7)),
        Period::Month => today.checked_sub_months(Months::new(1)),
        Period::Year => today.checked_sub_months(Months::new(12)),
        Period::All => Some(NaiveDate::MIN),
    };
    (start.unwrap_or(NaiveDate::MIN), today)
}

/// Everything a statistics run needs, collected over the dialogue.
///
/// Selected categories keep their selection order, which fixes the order of
/// the output pages.
#[derive(Clone, Debug, Default)]
pub struct StatisticsRequest {
    pub period: Option<Period>,
    pub custom_range: Option<(NaiveDate, NaiveDate)>,
    pub categories: Vec<(i64, String)>,
}

impl StatisticsRequest {
    /// Exactly one of period / custom range, a non-inverted range and at
    /// least one selected category.
    pub fn is_valid(&self) -> bool {
        if self.categories.is_empty() {
            return false;
        }
        match (self.period, self.custom_range) {
            (Some(_), None) => true,
            (None, Some((start, end))) => start <= end,
            _ => false,
        }
    }

    pub fn date_range(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        if !self.is_valid() {
            return None;
        }
        match (self.period, self.custom_range) {
            (Some(period), None) => Some(resolve_period(period, today)),
            (None, Some(range)) => Some(range),
            _ => None,
        }
    }
}

/// One output page: a category and its per-currency totals in the order the
/// currencies were first seen. An empty `totals` means the category had no
/// expenses in range.
#[derive(Clone, Debug, PartialEq)]
pub struct StatsPage {
    pub category_name: String,
    pub totals: Vec<(String, f64)>,
}

/// Bucket in-range expenses under each requested category id.
///
/// When the "all categories" sentinel is among the requested ids, every
/// in-range expense is additionally bucketed under the sentinel, so a single
/// expense can show up in two buckets.
pub fn aggregate<'a>(
    expenses: &'a [expenses::Model],
    category_ids: &[i64],
    range: (NaiveDate, NaiveDate),
) -> HashMap<i64, Vec<&'a expenses::Model>> {
    let (start, end) = range;
    let mut buckets: HashMap<i64, Vec<&expenses::Model>> = category_ids
        .iter()
        .map(|id| (*id, Vec::new()))
        .collect();

    for expense in expenses {
        if expense.date < start || expense.date > end {
            continue;
        }
        if let Some(bucket) = buckets.get_mut(&expense.category_id) {
            bucket.push(expense);
        }
        if expense.category_id != ALL_CATEGORIES_ID {
            if let Some(all) = buckets.get_mut(&ALL_CATEGORIES_ID) {
                all.push(expense);
            }
        }
    }
    buckets
}

/// Sum a bucket per currency, keeping first-observed currency order.
pub fn currency_totals(bucket: &[&expenses::Model]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for expense in bucket {
        match totals.iter_mut().find(|(code, _)| *code == expense.currency) {
            Some((_, sum)) => *sum += expense.amount,
            None => totals.push((expense.currency.clone(), expense.amount)),
        }
    }
    totals
}

/// Build the display pages for a request, one page per selected category in
/// selection order. `None` when the request is invalid or no expense
/// survived the date filter.
pub fn build_pages(
    expenses: &[expenses::Model],
    request: &StatisticsRequest,
    today: NaiveDate,
) -> Option<Vec<StatsPage>> {
    let range = request.date_range(today)?;
    let ids: Vec<i64> = request.categories.iter().map(|(id, _)| *id).collect();
    let buckets = aggregate(expenses, &ids, range);

    if buckets.values().all(Vec::is_empty) {
        return None;
    }

    let pages = request
        .categories
        .iter()
        .map(|(id, name)| StatsPage {
            category_name: name.clone(),
            totals: currency_totals(buckets.get(id).map(Vec::as_slice).unwrap_or(&[])),
        })
        .collect();
    Some(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(category_id: i64, amount: f64, currency: &str, date: NaiveDate) -> expenses::Model {
        expenses::Model {
            id: 0,
            name: "test".to_string(),
            currency: currency.to_string(),
            amount,
            date,
            user_tg_id: 1,
            category_id,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_subtraction_is_calendar_aware() {
        let (start, end) = resolve_period(Period::Month, date(2026, 3, 31));
        assert_eq!(start, date(2026, 2, 28));
        assert_eq!(end, date(2026, 3, 31));
    }

    #[test]
    fn all_time_starts_at_minimum_date() {
        let (start, _) = resolve_period(Period::All, date(2026, 3, 31));
        assert_eq!(start, NaiveDate::MIN);
    }

    #[test]
    fn request_requires_exactly_one_window() {
        let mut request = StatisticsRequest {
            categories: vec![(3, "Food".to_string())],
            ..StatisticsRequest::default()
        };
        assert!(!request.is_valid());

        request.period = Some(Period::Week);
        assert!(request.is_valid());

        request.custom_range = Some((date(2026, 1, 1), date(2026, 2, 1)));
        assert!(!request.is_valid());

        request.period = None;
        assert!(request.is_valid());
    }

    #[test]
    fn request_rejects_inverted_range() {
        let request = StatisticsRequest {
            custom_range: Some((date(2026, 2, 1), date(2026, 1, 1))),
            categories: vec![(3, "Food".to_string())],
            ..StatisticsRequest::default()
        };
        assert!(!request.is_valid());
    }

    #[test]
    fn request_requires_categories() {
        let request = StatisticsRequest {
            period: Some(Period::Week),
            ..StatisticsRequest::default()
        };
        assert!(!request.is_valid());
    }

    #[test]
    fn all_sentinel_collects_every_in_range_expense() {
        let today = date(2026, 8, 30);
        let rows = vec![
            expense(1, 10.0, "EUR", date(2026, 8, 29)),
            expense(2, 20.0, "EUR", date(2026, 8, 28)),
        ];
        let buckets = aggregate(&rows, &[1, ALL_CATEGORIES_ID], resolve_period(Period::Week, today));

        assert_eq!(buckets[&ALL_CATEGORIES_ID].len(), 2);
        assert_eq!(buckets[&1].len(), 1);
        assert_eq!(buckets[&1][0].amount, 10.0);
    }

    #[test]
    fn week_filter_runs_before_currency_grouping() {
        let today = date(2026, 8, 30);
        let rows = vec![
            expense(3, 100.0, "USD", date(2026, 8, 27)),
            expense(3, 50.0, "USD", date(2026, 8, 25)),
            expense(3, 200.0, "EUR", date(2026, 7, 21)),
        ];
        let request = StatisticsRequest {
            period: Some(Period::Week),
            categories: vec![(3, "Food".to_string())],
            ..StatisticsRequest::default()
        };

        let pages = build_pages(&rows, &request, today).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].category_name, "Food");
        assert_eq!(pages[0].totals, vec![("USD".to_string(), 150.0)]);
    }

    #[test]
    fn pages_follow_selection_order() {
        let today = date(2026, 8, 30);
        let rows = vec![
            expense(2, 5.0, "EUR", date(2026, 8, 29)),
            expense(1, 7.0, "EUR", date(2026, 8, 29)),
        ];
        let request = StatisticsRequest {
            period: Some(Period::Week),
            categories: vec![(2, "Bar".to_string()), (1, "Food".to_string())],
            ..StatisticsRequest::default()
        };

        let pages = build_pages(&rows, &request, today).unwrap();
        assert_eq!(pages[0].category_name, "Bar");
        assert_eq!(pages[1].category_name, "Food");
    }

    #[test]
    fn empty_result_yields_no_pages() {
        let today = date(2026, 8, 30);
        let rows = vec![expense(3, 100.0, "USD", date(2020, 1, 1))];
        let request = StatisticsRequest {
            period: Some(Period::Week),
            categories: vec![(3, "Food".to_string())],
            ..StatisticsRequest::default()
        };
        assert!(build_pages(&rows, &request, today).is_none());
    }

    #[test]
    fn currency_totals_keep_first_seen_order() {
        let rows = vec![
            expense(3, 1.0, "USD", date(2026, 8, 29)),
            expense(3, 2.0, "EUR", date(2026, 8, 29)),
            expense(3, 3.0, "USD", date(2026, 8, 29)),
        ];
        let refs: Vec<&expenses::Model> = rows.iter().collect();
        assert_eq!(
            currency_totals(&refs),
            vec![("USD".to_string(), 4.0), ("EUR".to_string(), 2.0)]
        );
    }
}
