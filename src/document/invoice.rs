//! Invoice ("Рахунок-фактура") layout.
//!
//! All amounts are precomputed by the caller and printed as given.

use serde::{Deserialize, Serialize};

use crate::layout::{present, Align, Column, Document, Node, Table, TotalRow, Width};

pub const ITEMS_TITLE: &str = "Позиції рахунку";

/// Invoice type tag. Tags outside the known set are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum InvoiceKind {
    Advance,
    Deposit,
    Rental,
    Other(String),
}

impl InvoiceKind {
    pub fn tag(&self) -> &str {
        match self {
            InvoiceKind::Advance => "advance",
            InvoiceKind::Deposit => "deposit",
            InvoiceKind::Rental => "rental",
            InvoiceKind::Other(tag) => tag,
        }
    }

    /// Printed label; unknown tags are printed verbatim.
    pub fn label(&self) -> &str {
        match self {
            InvoiceKind::Advance => "Аванс",
            InvoiceKind::Deposit => "Залічка",
            InvoiceKind::Rental => "Орендна",
            InvoiceKind::Other(tag) => tag,
        }
    }
}

impl From<String> for InvoiceKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "advance" => InvoiceKind::Advance,
            "deposit" => InvoiceKind::Deposit,
            "rental" => InvoiceKind::Rental,
            _ => InvoiceKind::Other(tag),
        }
    }
}

impl From<InvoiceKind> for String {
    fn from(kind: InvoiceKind) -> Self {
        kind.tag().to_string()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InvoiceSeller {
    pub name: String,
    pub address: String,
    /// Tax identification number.
    pub nip: String,
}

/// Buyer, a physical person.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InvoiceBuyer {
    pub name: String,
    #[serde(default)]
    pub passport: Option<String>,
    /// Polish national identification number.
    #[serde(default)]
    pub pesel: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LineItem {
    pub row_number: u32,
    pub product_name: String,
    pub quantity: String,
    pub net_price: String,
    pub net_value: String,
    pub vat_percent: String,
    pub tax_amount: String,
    pub gross_value: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InvoiceInput {
    pub invoice_number: String,
    pub issue_date: String,
    #[serde(rename = "type")]
    pub kind: InvoiceKind,
    pub seller: InvoiceSeller,
    pub buyer: InvoiceBuyer,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    pub total_net: String,
    pub total_tax: String,
    pub total_gross: String,
}

pub fn invoice_layout(input: &InvoiceInput) -> Document {
    let title = format!("Рахунок-фактура № {}", input.invoice_number);

    let nodes = vec![
        Node::title(title.clone()),
        Node::field("Тип", input.kind.label()),
        Node::field("Дата", &input.issue_date),
        Node::Columns {
            columns: vec![seller_block(&input.seller), buyer_block(&input.buyer)],
        },
        items_table(&input.line_items),
        Node::Totals {
            rows: vec![
                TotalRow::new("Всього нетто:", &input.total_net),
                TotalRow::new("ПДВ:", &input.total_tax),
                TotalRow::new("Всього брутто:", &input.total_gross),
            ],
        },
    ];

    Document::single_page(title, nodes)
}

fn seller_block(seller: &InvoiceSeller) -> Node {
    Node::Block {
        label: "Продавець".to_string(),
        children: vec![
            Node::text(&seller.name),
            Node::text(&seller.address),
            Node::text(format!("NIP: {}", seller.nip)),
        ],
    }
}

fn buyer_block(buyer: &InvoiceBuyer) -> Node {
    let mut children = vec![Node::text(&buyer.name)];

    if let Some(passport) = present(buyer.passport.as_deref()) {
        children.push(Node::text(format!("Паспорт: {passport}")));
    }
    if let Some(pesel) = present(buyer.pesel.as_deref()) {
        children.push(Node::text(format!("PESEL: {pesel}")));
    }

    Node::Block {
        label: "Покупець".to_string(),
        children,
    }
}

fn items_table(items: &[LineItem]) -> Node {
    let rows = items
        .iter()
        .map(|item| {
            vec![
                item.row_number.to_string(),
                item.product_name.clone(),
                item.quantity.clone(),
                item.net_price.clone(),
                item.net_value.clone(),
                item.vat_percent.clone(),
                item.tax_amount.clone(),
                item.gross_value.clone(),
            ]
        })
        .collect();

    Node::Table(Table {
        title: ITEMS_TITLE.to_string(),
        columns: vec![
            Column::new("№", Width::Fixed(28), Align::Center),
            Column::new("Назва продукту/послуги", Width::Flex(2), Align::Left),
            Column::new("Кількість", Width::Fixed(48), Align::Right),
            Column::new("Ціна нетто", Width::Fixed(56), Align::Right),
            Column::new("Вартість нетто", Width::Fixed(64), Align::Right),
            Column::new("ПДВ %", Width::Fixed(40), Align::Right),
            Column::new("Сума ПДВ", Width::Fixed(64), Align::Right),
            Column::new("Вартість брутто", Width::Fixed(64), Align::Right),
        ],
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> InvoiceInput {
        InvoiceInput {
            invoice_number: "FV/2025/03/001".into(),
            issue_date: "05.03.2025".into(),
            kind: InvoiceKind::Rental,
            seller: InvoiceSeller {
                name: "Auto Lease Sp. z o.o.".into(),
                address: "ul. Prosta 1, Warszawa".into(),
                nip: "5250000000".into(),
            },
            buyer: InvoiceBuyer {
                name: "Олена Коваль".into(),
                passport: None,
                pesel: None,
            },
            line_items: vec![LineItem {
                row_number: 1,
                product_name: "Оренда авто, березень".into(),
                quantity: "1".into(),
                net_price: "1000.00".into(),
                net_value: "1000.00".into(),
                vat_percent: "23".into(),
                tax_amount: "230.00".into(),
                gross_value: "1230.00".into(),
            }],
            total_net: "1000.00".into(),
            total_tax: "230.00".into(),
            total_gross: "1230.00".into(),
        }
    }

    fn texts(doc: &Document) -> Vec<&str> {
        doc.nodes()
            .into_iter()
            .filter_map(|node| match node {
                Node::Text { value } => Some(value.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(InvoiceKind::from("advance".to_string()).label(), "Аванс");
        assert_eq!(InvoiceKind::from("deposit".to_string()).label(), "Залічка");
        assert_eq!(InvoiceKind::from("rental".to_string()).label(), "Орендна");
        assert_eq!(InvoiceKind::from("final".to_string()).label(), "final");
    }

    #[test]
    fn test_kind_round_trips_unknown_tag() {
        let kind: InvoiceKind = serde_json::from_str(r#""correction""#).unwrap();
        assert_eq!(kind, InvoiceKind::Other("correction".into()));
        assert_eq!(serde_json::to_string(&kind).unwrap(), r#""correction""#);
    }

    #[test]
    fn test_header_fields() {
        let doc = invoice_layout(&input());

        assert_eq!(doc.title, "Рахунок-фактура № FV/2025/03/001");
        assert_eq!(doc.field_values("Тип"), ["Орендна"]);
        assert_eq!(doc.field_values("Дата"), ["05.03.2025"]);
    }

    #[test]
    fn test_buyer_optional_ids_omitted() {
        let doc = invoice_layout(&input());
        let texts = texts(&doc);

        assert!(!texts.iter().any(|t| t.starts_with("Паспорт:")));
        assert!(!texts.iter().any(|t| t.starts_with("PESEL:")));
        assert!(texts.contains(&"NIP: 5250000000"));
    }

    #[test]
    fn test_buyer_optional_ids_included() {
        let mut input = input();
        input.buyer.passport = Some("FA123456".into());
        input.buyer.pesel = Some("".into());

        let doc = invoice_layout(&input);
        let texts = texts(&doc);

        assert_eq!(
            texts.iter().filter(|t| t.starts_with("Паспорт:")).count(),
            1
        );
        assert!(texts.contains(&"Паспорт: FA123456"));
        assert!(!texts.iter().any(|t| t.starts_with("PESEL:")));
    }

    #[test]
    fn test_items_passed_through() {
        let doc = invoice_layout(&input());
        let tables = doc.tables();

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].columns.len(), 8);
        assert_eq!(
            tables[0].rows[0],
            ["1", "Оренда авто, березень", "1", "1000.00", "1000.00", "23", "230.00", "1230.00"]
        );
    }

    #[test]
    fn test_totals_verbatim() {
        let doc = invoice_layout(&input());

        let totals = doc
            .nodes()
            .into_iter()
            .find_map(|node| match node {
                Node::Totals { rows } => Some(rows.clone()),
                _ => None,
            })
            .unwrap();

        assert_eq!(totals[0], TotalRow::new("Всього нетто:", "1000.00"));
        assert_eq!(totals[1], TotalRow::new("ПДВ:", "230.00"));
        assert_eq!(totals[2], TotalRow::new("Всього брутто:", "1230.00"));
    }

    #[test]
    fn test_input_deserialization() {
        let json = r#"{
            "invoice_number": "12",
            "issue_date": "2025-03-05",
            "type": "deposit",
            "seller": {"name": "S", "address": "A", "nip": "1"},
            "buyer": {"name": "B", "pesel": "90010112345"},
            "line_items": [],
            "total_net": "0", "total_tax": "0", "total_gross": "0"
        }"#;

        let input: InvoiceInput = serde_json::from_str(json).unwrap();

        assert_eq!(input.kind, InvoiceKind::Deposit);
        assert!(input.buyer.passport.is_none());
        assert_eq!(input.buyer.pesel.as_deref(), Some("90010112345"));
    }
}
