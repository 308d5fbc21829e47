use std::fs;
use std::path::Path;
use std::process::Command;

use crate::config::RenderSettings;
use crate::error::{DocumentError, Result};
use crate::layout::{Align, Column, Document, Node, Table, TotalRow, Width};

const LABEL_GRAY: &str = r##"rgb("#6b7280")"##;
const HEADER_FILL: &str = r##"rgb("#f3f4f6")"##;
const HEADER_RULE: &str = r##"rgb("#374151")"##;
const ROW_RULE: &str = r##"rgb("#e5e7eb")"##;

const SOURCE_FILE: &str = "document.typ";
const PDF_FILE: &str = "document.pdf";

/// Escape special characters for a Typst string literal.
pub fn escape_typst_string(value: &str) -> String {
    value
        .replace('\\', r"\\")
        .replace('"', r#"\""#)
        .replace('\n', r"\n")
        .replace('\r', r"\r")
        .replace('\t', r"\t")
}

fn lit(value: &str) -> String {
    format!("\"{}\"", escape_typst_string(value))
}

/// Serialize a layout tree into a standalone Typst source.
///
/// All text from the document is emitted as string literals, never as markup.
pub fn to_typst(doc: &Document, settings: &RenderSettings) -> String {
    let mut out = String::new();

    out.push_str(&format!("#set document(title: {})\n", lit(&doc.title)));
    out.push_str(&format!(
        "#set text(font: {}, size: 11pt, lang: \"uk\")\n",
        lit(&settings.font)
    ));
    out.push_str(&format!(
        "#set page(paper: {}, margin: {}pt)\n",
        lit(&settings.paper),
        settings.margin_pt
    ));

    for (idx, page) in doc.pages.iter().enumerate() {
        if idx > 0 {
            out.push_str("#pagebreak()\n");
        }
        for node in &page.nodes {
            out.push_str(&format!("#{}\n", node_expr(node)));
        }
    }

    out
}

fn node_expr(node: &Node) -> String {
    match node {
        Node::Title { text } => format!(
            "block(width: 100%, below: 20pt, align(center, text(size: 16pt, {})))",
            lit(text)
        ),
        Node::Field { label, value } => format!(
            "block(below: 14pt, stack(spacing: 2pt, text(size: 10pt, {}), text(size: 11pt, {})))",
            lit(label),
            lit(value)
        ),
        Node::Text { value } => format!("text(size: 11pt, {})", lit(value)),
        Node::Block { label, children } => {
            let mut parts = vec![format!(
                "text(size: 9pt, fill: {LABEL_GRAY}, {})",
                lit(label)
            )];
            parts.extend(children.iter().map(node_expr));
            format!("block(below: 12pt, stack(spacing: 3pt, {}))", parts.join(", "))
        }
        Node::Columns { columns } => {
            let widths = vec!["1fr"; columns.len()].join(", ");
            let cells: Vec<String> = columns.iter().map(node_expr).collect();
            format!(
                "block(below: 16pt, grid(columns: ({widths},), column-gutter: 40pt, {}))",
                cells.join(", ")
            )
        }
        Node::Table(table) => table_expr(table),
        Node::Totals { rows } => totals_expr(rows),
    }
}

fn width_expr(width: Width) -> String {
    match width {
        Width::Fixed(pt) => format!("{pt}pt"),
        Width::Flex(share) => format!("{share}fr"),
    }
}

fn align_expr(align: Align) -> &'static str {
    match align {
        Align::Left => "left",
        Align::Center => "center",
        Align::Right => "right",
    }
}

fn table_expr(table: &Table) -> String {
    let columns: Vec<String> = table.columns.iter().map(|c| width_expr(c.width)).collect();
    let aligns: Vec<&str> = table.columns.iter().map(|c| align_expr(c.align)).collect();
    let header: Vec<String> = table.columns.iter().map(header_cell).collect();
    let cells: Vec<String> = table
        .rows
        .iter()
        .flatten()
        .map(|cell| format!("text(size: 9pt, {})", lit(cell)))
        .collect();

    let mut body = format!(
        "table(columns: ({},), align: ({},), inset: 5pt, \
         stroke: (x, y) => (bottom: if y == 0 {{ 1pt + {HEADER_RULE} }} else {{ 1pt + {ROW_RULE} }}), \
         fill: (x, y) => if y == 0 {{ {HEADER_FILL} }}, \
         table.header({})",
        columns.join(", "),
        aligns.join(", "),
        header.join(", ")
    );
    for cell in cells {
        body.push_str(", ");
        body.push_str(&cell);
    }
    body.push(')');

    format!(
        "block(above: 18pt, below: 14pt, stack(spacing: 6pt, text(size: 12pt, weight: \"bold\", {}), {body}))",
        lit(&table.title)
    )
}

fn header_cell(column: &Column) -> String {
    format!("text(size: 9pt, weight: \"bold\", {})", lit(&column.header))
}

fn totals_expr(rows: &[TotalRow]) -> String {
    let lines: Vec<String> = rows
        .iter()
        .map(|row| {
            format!(
                "block(width: 100%, above: 8pt, inset: (top: 8pt), stroke: (top: 1pt + {HEADER_RULE}), \
                 align(right, grid(columns: 2, column-gutter: 24pt, \
                 text(size: 10pt, weight: \"bold\", {}), text(size: 10pt, {}))))",
                lit(&row.label),
                lit(&row.value)
            )
        })
        .collect();

    format!("stack({})", lines.join(", "))
}

/// Compile a Typst source to a PDF at `output_path` using the Typst CLI.
pub fn compile_pdf(source: &str, settings: &RenderSettings, output_path: &Path) -> Result<()> {
    // Check if typst is available
    let typst_check = Command::new(&settings.typst).arg("--version").output();

    if typst_check.is_err() {
        return Err(DocumentError::TypstNotFound);
    }

    let temp_dir = tempfile::tempdir()?;
    let source_path = temp_dir.path().join(SOURCE_FILE);
    let pdf_path = temp_dir.path().join(PDF_FILE);
    fs::write(&source_path, source)?;

    log::debug!(
        "running {} compile in {}",
        settings.typst,
        temp_dir.path().display()
    );

    let output = Command::new(&settings.typst)
        .arg("compile")
        .arg("--root")
        .arg(temp_dir.path())
        .arg(&source_path)
        .arg(&pdf_path)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DocumentError::PdfGeneration(stderr.to_string()));
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(&pdf_path, output_path)?;

    Ok(())
}
