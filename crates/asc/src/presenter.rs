use asc_client::document::next_link;
use asc_common::Colors;
use serde_json::Map;
use serde_json::Value;

use crate::commands::OutputFormat;
use crate::error::CliError;

/// Trait for presenting output to the user.
///
/// Handlers return JSON values; presenters decide how they reach stdout and
/// how errors reach stderr.
pub trait Presenter {
    /// Render a result value.
    fn render(&self, value: &Value) -> String;

    /// Render an error for stderr.
    fn render_error(&self, error: &CliError) -> String {
        render_error_text(error)
    }

    fn present(&self, value: &Value) {
        let rendered = self.render(value);
        if !rendered.is_empty() {
            println!("{}", rendered);
        }
    }

    fn present_error(&self, error: &CliError) {
        eprintln!("{}", self.render_error(error));
    }
}

fn render_error_text(error: &CliError) -> String {
    let mut lines = vec![format!("{} {}", Colors::error("Error:"), error)];
    if let Some(suggestion) = error.suggestion() {
        lines.push(format!("{} {}", Colors::warning("Suggestion:"), suggestion));
    }
    if error.is_retryable() {
        lines.push(Colors::dim("(This error may be transient - retry may succeed)"));
    }
    lines.join("\n")
}

pub struct JsonPresenter {
    pub pretty: bool,
}

impl JsonPresenter {
    fn to_string(&self, value: &Value) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_default()
    }
}

impl Presenter for JsonPresenter {
    fn render(&self, value: &Value) -> String {
        self.to_string(value)
    }

    fn render_error(&self, error: &CliError) -> String {
        self.to_string(&error.to_json())
    }
}

/// Aligned plain-text table.
pub struct TablePresenter;

impl Presenter for TablePresenter {
    fn render(&self, value: &Value) -> String {
        let Some(table) = tabulate(value) else {
            return String::new();
        };
        let widths: Vec<usize> = table
            .headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                table
                    .rows
                    .iter()
                    .map(|row| display_width(&row[i]))
                    .chain(std::iter::once(display_width(header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let format_row = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| pad(&single_line(cell), *width))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut lines = vec![format_row(&table.headers)];
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        lines.extend(table.rows.iter().map(|row| format_row(row)));
        lines.join("\n")
    }
}

/// GitHub-flavored markdown table.
pub struct MarkdownPresenter;

impl Presenter for MarkdownPresenter {
    fn render(&self, value: &Value) -> String {
        let Some(table) = tabulate(value) else {
            return String::new();
        };
        let row = |cells: &[String]| {
            format!(
                "| {} |",
                cells
                    .iter()
                    .map(|c| escape_markdown(c))
                    .collect::<Vec<_>>()
                    .join(" | ")
            )
        };
        let mut lines = vec![row(&table.headers)];
        lines.push(format!(
            "|{}|",
            vec![" --- "; table.headers.len()].join("|")
        ));
        lines.extend(table.rows.iter().map(|r| row(r)));
        lines.join("\n")
    }
}

pub fn create_presenter(format: OutputFormat, pretty: bool) -> Box<dyn Presenter> {
    match format {
        OutputFormat::Json => Box::new(JsonPresenter { pretty }),
        OutputFormat::Table => Box::new(TablePresenter),
        OutputFormat::Markdown => Box::new(MarkdownPresenter),
    }
}

/// For table and markdown output a truncated list has no visible cursor;
/// this returns the hint printed to stderr in that case.
pub fn pagination_hint(value: &Value) -> Option<String> {
    next_link(value).map(|next| format!("More results available: --next \"{}\"", next))
}

#[derive(Debug, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Flattens a result into rows.
///
/// JSON:API documents become one row per resource with `id`, `type` and the
/// attribute names in first-seen order. Other objects become field/value
/// rows. `null` yields no table.
pub fn tabulate(value: &Value) -> Option<Table> {
    match value {
        Value::Null => None,
        Value::Object(object) if object.contains_key("data") => {
            Some(tabulate_resources(object.get("data").unwrap_or(&Value::Null)))
        }
        Value::Object(object) => Some(tabulate_fields(object)),
        array @ Value::Array(_) => Some(tabulate_resources(array)),
        scalar => Some(Table {
            headers: vec!["value".to_string()],
            rows: vec![vec![cell(scalar)]],
        }),
    }
}

fn tabulate_resources(data: &Value) -> Table {
    let resources: Vec<&Value> = match data {
        Value::Array(items) => items.iter().collect(),
        Value::Null => Vec::new(),
        single => vec![single],
    };

    let mut attribute_names: Vec<String> = Vec::new();
    for resource in &resources {
        if let Some(attributes) = resource.get("attributes").and_then(Value::as_object) {
            for name in attributes.keys() {
                if !attribute_names.contains(name) {
                    attribute_names.push(name.clone());
                }
            }
        }
    }

    let mut headers = vec!["id".to_string(), "type".to_string()];
    headers.extend(attribute_names.iter().cloned());

    let rows = resources
        .iter()
        .map(|resource| {
            let mut row = vec![
                cell(resource.get("id").unwrap_or(&Value::Null)),
                cell(resource.get("type").unwrap_or(&Value::Null)),
            ];
            for name in &attribute_names {
                row.push(cell(
                    resource
                        .get("attributes")
                        .and_then(|a| a.get(name))
                        .unwrap_or(&Value::Null),
                ));
            }
            row
        })
        .collect();

    Table { headers, rows }
}

fn tabulate_fields(object: &Map<String, Value>) -> Table {
    Table {
        headers: vec!["field".to_string(), "value".to_string()],
        rows: object
            .iter()
            .map(|(key, value)| vec![key.clone(), cell(value)])
            .collect(),
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        nested => serde_json::to_string(nested).unwrap_or_default(),
    }
}

fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

fn display_width(text: &str) -> usize {
    single_line(text).chars().count()
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn escape_markdown(text: &str) -> String {
    text.replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace(['\n', '\r'], "<br>")
}
