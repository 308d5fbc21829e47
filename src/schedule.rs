//! Payment schedule ordering.

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

use crate::format::{format_amount, format_date, parse_date};

/// One expected payment of a lease contract.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PaymentScheduleEntry {
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(deserialize_with = "amount_text")]
    pub amount: String,
    #[serde(default)]
    pub status: String,
}

impl PaymentScheduleEntry {
    pub fn new(due_date: Option<&str>, amount: &str) -> Self {
        Self {
            due_date: due_date.map(str::to_string),
            amount: amount.to_string(),
            status: String::new(),
        }
    }

    /// The due date as an instant, or `None` when it is missing or not a date.
    pub fn due_instant(&self) -> Option<DateTime<FixedOffset>> {
        self.due_date.as_deref().and_then(parse_date)
    }
}

/// A display-ready schedule line. `number` is the 1-based position after sorting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleRow {
    pub number: usize,
    pub due_date: String,
    pub amount: String,
    pub status: String,
}

/// Three-way comparison of due dates where a missing date is later than any date.
pub fn compare_due_dates(
    a: Option<&DateTime<FixedOffset>>,
    b: Option<&DateTime<FixedOffset>>,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.cmp(b),
    }
}

/// Order entries by due date, ascending. Entries without a valid due date go
/// last and keep their relative order, as do entries sharing a due date.
pub fn sort_payments(entries: &[PaymentScheduleEntry]) -> Vec<&PaymentScheduleEntry> {
    let mut keyed: Vec<_> = entries
        .iter()
        .map(|entry| (entry.due_instant(), entry))
        .collect();

    // `sort_by` is stable.
    keyed.sort_by(|(a, _), (b, _)| compare_due_dates(a.as_ref(), b.as_ref()));

    keyed.into_iter().map(|(_, entry)| entry).collect()
}

/// Sort and format a schedule for display.
pub fn schedule_rows(entries: &[PaymentScheduleEntry]) -> Vec<ScheduleRow> {
    sort_payments(entries)
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| ScheduleRow {
            number: idx + 1,
            due_date: entry.due_date.as_deref().map(format_date).unwrap_or_default(),
            amount: format_amount(&entry.amount),
            status: entry.status.clone(),
        })
        .collect()
}

/// Accept amounts given either as JSON strings or JSON numbers.
fn amount_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Amount::deserialize(deserializer)? {
        Amount::Text(text) => text,
        Amount::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amounts(sorted: &[&PaymentScheduleEntry]) -> Vec<String> {
        sorted.iter().map(|e| e.amount.clone()).collect()
    }

    #[test]
    fn test_sort_ascending() {
        let entries = vec![
            PaymentScheduleEntry::new(Some("2025-03-01"), "3"),
            PaymentScheduleEntry::new(Some("2025-01-01"), "1"),
            PaymentScheduleEntry::new(Some("2025-02-01"), "2"),
        ];

        assert_eq!(amounts(&sort_payments(&entries)), ["1", "2", "3"]);
    }

    #[test]
    fn test_sort_invalid_last() {
        let entries = vec![
            PaymentScheduleEntry::new(None, "missing"),
            PaymentScheduleEntry::new(Some("2025-02-01"), "feb"),
            PaymentScheduleEntry::new(Some("garbage"), "garbage"),
            PaymentScheduleEntry::new(Some("2025-01-01"), "jan"),
        ];

        assert_eq!(
            amounts(&sort_payments(&entries)),
            ["jan", "feb", "missing", "garbage"]
        );
    }

    #[test]
    fn test_sort_does_not_touch_input() {
        let entries = vec![
            PaymentScheduleEntry::new(Some("2025-02-01"), "b"),
            PaymentScheduleEntry::new(Some("2025-01-01"), "a"),
        ];
        let before = entries.clone();

        let _ = sort_payments(&entries);

        assert_eq!(entries, before);
    }

    #[test]
    fn test_sort_compares_instants_across_offsets() {
        let entries = vec![
            PaymentScheduleEntry::new(Some("2025-01-01T10:00:00+00:00"), "later"),
            PaymentScheduleEntry::new(Some("2025-01-01T11:00:00+02:00"), "earlier"),
        ];

        assert_eq!(amounts(&sort_payments(&entries)), ["earlier", "later"]);
    }

    #[test]
    fn test_compare_due_dates_cases() {
        let date = parse_date("2025-01-01");

        assert_eq!(compare_due_dates(None, None), Ordering::Equal);
        assert_eq!(compare_due_dates(None, date.as_ref()), Ordering::Greater);
        assert_eq!(compare_due_dates(date.as_ref(), None), Ordering::Less);
        assert_eq!(
            compare_due_dates(date.as_ref(), date.as_ref()),
            Ordering::Equal
        );
    }

    #[test]
    fn test_schedule_rows_number_after_sorting() {
        let entries = vec![
            PaymentScheduleEntry::new(Some("2025-04-10"), "2000"),
            PaymentScheduleEntry::new(None, "oops"),
            PaymentScheduleEntry::new(Some("2025-03-10"), "1234.5"),
        ];

        let rows = schedule_rows(&entries);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].number, 1);
        assert_eq!(rows[0].due_date, "10.03.2025");
        assert_eq!(rows[0].amount, "1\u{a0}234,50");
        assert_eq!(rows[1].due_date, "10.04.2025");
        assert_eq!(rows[2].number, 3);
        assert_eq!(rows[2].due_date, "");
        assert_eq!(rows[2].amount, "oops");
    }

    #[test]
    fn test_entry_deserialization() {
        let json = r#"[
            {"due_date": "2025-05-01", "amount": "1500.00", "status": "pending"},
            {"due_date": null, "amount": 250},
            {"amount": 99.5, "status": "paid"}
        ]"#;

        let entries: Vec<PaymentScheduleEntry> = serde_json::from_str(json).unwrap();

        assert_eq!(entries[0].amount, "1500.00");
        assert_eq!(entries[0].status, "pending");
        assert_eq!(entries[1].due_date, None);
        assert_eq!(entries[1].amount, "250");
        assert_eq!(entries[2].amount, "99.5");
        assert_eq!(entries[2].status, "paid");
    }
}
