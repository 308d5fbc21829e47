//! Layout tree handed to the renderer.
//!
//! A `Document` is a list of pages, each holding a flat list of top-level
//! nodes. Only `Block` and `Columns` nest.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Centered document heading.
    Title { text: String },
    /// A label line followed by its value.
    Field { label: String, value: String },
    /// A plain line of text.
    Text { value: String },
    /// A labelled group of lines, e.g. one party of an invoice.
    Block { label: String, children: Vec<Node> },
    /// Nodes placed side by side with equal widths.
    Columns { columns: Vec<Node> },
    Table(Table),
    /// Right-aligned label/value summary lines.
    Totals { rows: Vec<TotalRow> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub title: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub header: String,
    pub width: Width,
    pub align: Align,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Width {
    /// Width in points.
    Fixed(u16),
    /// Share of the remaining width.
    Flex(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalRow {
    pub label: String,
    pub value: String,
}

/// `Some` only for a value that is present and non-empty.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl Node {
    pub fn title(text: impl Into<String>) -> Self {
        Node::Title { text: text.into() }
    }

    pub fn field(label: impl Into<String>, value: impl Into<String>) -> Self {
        Node::Field {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
        }
    }

    /// Zero or one field node depending on whether `value` is present.
    pub fn optional_field(label: &str, value: Option<&str>) -> Option<Self> {
        present(value).map(|v| Node::field(label, v))
    }

    /// Nested nodes, if any.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Block { children, .. } => children.as_slice(),
            Node::Columns { columns } => columns.as_slice(),
            _ => &[],
        }
    }
}

impl Column {
    pub fn new(header: impl Into<String>, width: Width, align: Align) -> Self {
        Self {
            header: header.into(),
            width,
            align,
        }
    }
}

impl TotalRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl Document {
    /// Document with a single page.
    pub fn single_page(title: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            title: title.into(),
            pages: vec![Page { nodes }],
        }
    }

    /// Every node of every page, depth first.
    pub fn nodes(&self) -> Vec<&Node> {
        fn walk<'a>(nodes: &'a [Node], out: &mut Vec<&'a Node>) {
            for node in nodes {
                out.push(node);
                walk(node.children(), out);
            }
        }

        let mut out = Vec::new();
        for page in &self.pages {
            walk(&page.nodes, &mut out);
        }
        out
    }

    /// Values of all fields carrying `label`.
    pub fn field_values(&self, label: &str) -> Vec<&str> {
        self.nodes()
            .into_iter()
            .filter_map(|node| match node {
                Node::Field { label: l, value } if l == label => Some(value.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn tables(&self) -> Vec<&Table> {
        self.nodes()
            .into_iter()
            .filter_map(|node| match node {
                Node::Table(table) => Some(table),
                _ => None,
            })
            .collect()
    }
}
