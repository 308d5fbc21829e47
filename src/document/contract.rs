//! Lease contract ("Договір лізингу") layout.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::format::format_calendar_date;
use crate::layout::{Align, Column, Document, Node, Table, Width};
use crate::schedule::{schedule_rows, PaymentScheduleEntry};

pub const SCHEDULE_TITLE: &str = "Графік платежів";

/// Contract data as posted by the host application.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractInput {
    pub contract_number: String,
    pub client_name: String,
    pub client_phone: String,
    #[serde(default)]
    pub client_email: Option<String>,
    pub vehicle_description: String,
    pub vehicle_year: u16,
    /// Registration plate.
    pub car_number: String,
    /// Shown verbatim; today's date is used when absent.
    #[serde(default)]
    pub contract_date: Option<String>,
    #[serde(default)]
    pub payments: Option<Vec<PaymentScheduleEntry>>,
}

impl ContractInput {
    pub fn payments(&self) -> &[PaymentScheduleEntry] {
        self.payments.as_deref().unwrap_or_default()
    }
}

/// Build the contract layout, dating it today when no contract date is given.
pub fn contract_layout(input: &ContractInput) -> Document {
    contract_layout_on(input, Local::now().date_naive())
}

/// Build the contract layout with an explicit "today".
pub fn contract_layout_on(input: &ContractInput, today: NaiveDate) -> Document {
    let title = format!("Договір лізингу № {}", input.contract_number);
    let date = input
        .contract_date
        .clone()
        .unwrap_or_else(|| format_calendar_date(today));

    let mut nodes = vec![
        Node::title(title.clone()),
        Node::field("Дата:", date),
        Node::field("Клієнт (ПІБ):", &input.client_name),
        Node::field("Телефон:", &input.client_phone),
    ];

    nodes.extend(Node::optional_field(
        "Email:",
        input.client_email.as_deref(),
    ));

    nodes.push(Node::field(
        "Об'єкт лізингу (ТЗ):",
        format!(
            "{}, рік випуску {}",
            input.vehicle_description, input.vehicle_year
        ),
    ));
    nodes.push(Node::field("Держ. номер:", &input.car_number));

    nodes.extend(schedule_table(input.payments()));

    Document::single_page(title, nodes)
}

/// The payment table, or nothing for an empty schedule.
fn schedule_table(payments: &[PaymentScheduleEntry]) -> Option<Node> {
    if payments.is_empty() {
        return None;
    }

    let rows = schedule_rows(payments)
        .into_iter()
        .map(|row| vec![row.number.to_string(), row.due_date, row.amount])
        .collect();

    Some(Node::Table(Table {
        title: SCHEDULE_TITLE.to_string(),
        columns: vec![
            Column::new("№", Width::Fixed(28), Align::Left),
            Column::new("Дата платежу", Width::Flex(1), Align::Left),
            Column::new("Сума", Width::Fixed(72), Align::Right),
        ],
        rows,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ContractInput {
        ContractInput {
            contract_number: "LZ-2025-017".into(),
            client_name: "Шевченко Тарас Григорович".into(),
            client_phone: "+380 67 123 45 67".into(),
            client_email: None,
            vehicle_description: "Toyota Corolla".into(),
            vehicle_year: 2021,
            car_number: "AA1234BB".into(),
            contract_date: Some("01.02.2025".into()),
            payments: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
    }

    #[test]
    fn test_required_fields() {
        let doc = contract_layout_on(&input(), today());

        assert_eq!(doc.title, "Договір лізингу № LZ-2025-017");
        assert_eq!(doc.field_values("Дата:"), ["01.02.2025"]);
        assert_eq!(doc.field_values("Клієнт (ПІБ):"), ["Шевченко Тарас Григорович"]);
        assert_eq!(
            doc.field_values("Об'єкт лізингу (ТЗ):"),
            ["Toyota Corolla, рік випуску 2021"]
        );
        assert_eq!(doc.field_values("Держ. номер:"), ["AA1234BB"]);
    }

    #[test]
    fn test_date_defaults_to_today() {
        let mut input = input();
        input.contract_date = None;

        let doc = contract_layout_on(&input, today());

        assert_eq!(doc.field_values("Дата:"), ["05.03.2025"]);
    }

    #[test]
    fn test_email_omitted_when_absent() {
        let doc = contract_layout_on(&input(), today());
        assert!(doc.field_values("Email:").is_empty());

        let mut empty = input();
        empty.client_email = Some(String::new());
        let doc = contract_layout_on(&empty, today());
        assert!(doc.field_values("Email:").is_empty());
    }

    #[test]
    fn test_email_included_once() {
        let mut input = input();
        input.client_email = Some("a@b.com".into());

        let doc = contract_layout_on(&input, today());

        assert_eq!(doc.field_values("Email:"), ["a@b.com"]);
    }

    #[test]
    fn test_no_table_for_empty_schedule() {
        let doc = contract_layout_on(&input(), today());
        assert!(doc.tables().is_empty());

        let mut input = input();
        input.payments = Some(Vec::new());
        let doc = contract_layout_on(&input, today());
        assert!(doc.tables().is_empty());
    }

    #[test]
    fn test_schedule_table_sorted() {
        let mut input = input();
        input.payments = Some(vec![
            PaymentScheduleEntry::new(Some("2025-05-01"), "2000"),
            PaymentScheduleEntry::new(Some("2025-04-01"), "1234.5"),
        ]);

        let doc = contract_layout_on(&input, today());
        let tables = doc.tables();

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].title, SCHEDULE_TITLE);
        assert_eq!(tables[0].rows[0], ["1", "01.04.2025", "1\u{a0}234,50"]);
        assert_eq!(tables[0].rows[1], ["2", "01.05.2025", "2\u{a0}000,00"]);
    }

    #[test]
    fn test_input_deserialization() {
        let json = r#"{
            "contractNumber": "7",
            "clientName": "Іван",
            "clientPhone": "+380",
            "clientEmail": null,
            "vehicleDescription": "Skoda Octavia",
            "vehicleYear": 2019,
            "carNumber": "KA0001AA",
            "payments": [{"due_date": "2025-01-10", "amount": "100", "status": "pending"}]
        }"#;

        let input: ContractInput = serde_json::from_str(json).unwrap();

        assert_eq!(input.contract_number, "7");
        assert!(input.client_email.is_none());
        assert!(input.contract_date.is_none());
        assert_eq!(input.payments().len(), 1);
    }
}
