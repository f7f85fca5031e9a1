//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use datahub_browser::breadcrumb::BreadcrumbView;
use datahub_browser::hierarchy::RowView;
use datahub_browser::metadata::MetadataFieldView;
use datahub_browser::nav::NavEntryView;
use datahub_core::events::{Alert, AlertKind};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// A child folder or item row
#[derive(Debug, Serialize, Tabled)]
pub struct ChildRow {
    /// Checkbox state
    #[tabled(rename = "")]
    pub checked: String,
    /// Kind
    pub kind: String,
    /// Name
    pub name: String,
    /// Size
    pub size: String,
    /// ID
    pub id: String,
}

impl From<&RowView> for ChildRow {
    fn from(row: &RowView) -> Self {
        Self {
            checked: if row.checked { "[x]" } else { "[ ]" }.to_string(),
            kind: row.kind.to_string(),
            name: row.name.clone(),
            size: format_size(row.size),
            id: row.id.to_string(),
        }
    }
}

/// A navigation link row
#[derive(Debug, Serialize, Tabled)]
pub struct NavRow {
    /// Active marker
    #[tabled(rename = "")]
    pub active: String,
    /// Name
    pub name: String,
    /// Route
    pub target: String,
}

impl From<&NavEntryView> for NavRow {
    fn from(entry: &NavEntryView) -> Self {
        Self {
            active: if entry.active { "*" } else { "" }.to_string(),
            name: entry.name.clone(),
            target: entry.target.clone(),
        }
    }
}

/// A metadata row
#[derive(Debug, Serialize, Tabled)]
pub struct MetaRow {
    /// Position
    #[tabled(rename = "#")]
    pub index: usize,
    /// Key
    pub key: String,
    /// Value
    pub value: String,
}

impl From<&MetadataFieldView> for MetaRow {
    fn from(field: &MetadataFieldView) -> Self {
        Self {
            index: field.index,
            key: field.key.clone(),
            value: field.value.clone(),
        }
    }
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                let table = Table::new(items).to_string();
                println!("{}", table);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{}", json);
        }
    }
}

/// Print a single value as JSON
pub fn print_json<T: Serialize>(item: &T) {
    let json = serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string());
    println!("{}", json);
}

/// Print a breadcrumb bar, e.g. `Data / raw / [2024]`
pub fn print_breadcrumb(view: &BreadcrumbView) {
    let mut parts: Vec<String> = view
        .links
        .iter()
        .map(|link| format!("{}:{}", link.index, link.name))
        .collect();
    parts.push(format!("[{}]", view.current.name));
    println!("{}", parts.join(" / "));
}

/// Print an alert according to its kind
pub fn print_alert(alert: &Alert) {
    match alert.kind {
        AlertKind::Success | AlertKind::Info => print_success(&alert.text),
        AlertKind::Warning => print_warning(&alert.text),
        AlertKind::Danger => print_error(&alert.text),
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {}", msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {}", msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {}", msg);
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{}:", key), value);
}

/// Human-readable byte size
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
