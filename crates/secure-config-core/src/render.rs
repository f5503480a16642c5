//! Text rendering of the view state.
//!
//! Everything here is a pure function of its input. Loading and error states are
//! drawn by [`render_view`]; the config renderers only ever see a loaded record.

use crate::{ProtectedConfig, ViewState};

pub const PLACEHOLDER: &str = "Not available";

const TITLE: &str = "Secure Config Demo";
const SUBTITLE: &str = "This application demonstrates secure handling of configuration and API keys.";
const FOOTER: &str = "Secure Config Management Example (c) 2025";
const LOADING: &str = "Loading configuration...";

const RED: &str = "\x1B[31m";
const RESET: &str = "\x1B[0m";

fn text_or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

fn detail_rows(config: &ProtectedConfig) -> [(&'static str, String); 4] {
    [
        (
            "Entra Client ID",
            text_or_placeholder(config.entra_client_id.as_deref()),
        ),
        (
            "Entra Scope",
            text_or_placeholder(config.entra_scope.as_deref()),
        ),
        ("Timestamp", text_or_placeholder(config.timestamp.as_deref())),
        (
            "Enabled",
            config
                .is_enabled
                .map(|b| b.to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        ),
    ]
}

/// Two-column table of the known fields, with [`PLACEHOLDER`] for missing ones.
pub fn render_details(config: &ProtectedConfig) -> String {
    let rows = detail_rows(config);
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0);

    let border = format!(
        "+{}+{}+",
        "-".repeat(label_width + 2),
        "-".repeat(value_width + 2)
    );

    let mut lines = vec![border.clone()];
    for (label, value) in &rows {
        lines.push(format!(
            "| {:<lw$} | {:<vw$} |",
            label,
            value,
            lw = label_width,
            vw = value_width
        ));
    }
    lines.push(border);
    lines.join("\n")
}

/// Pretty JSON of the record as received; absent fields are left out.
pub fn render_json(config: &ProtectedConfig) -> String {
    serde_json::to_string_pretty(config).unwrap_or_else(|_| "{}".to_string())
}

pub fn render_config(config: &ProtectedConfig) -> String {
    format!(
        "Configuration Values\n\
         These values were securely fetched from the backend API using a runtime-injected API key.\n\n\
         {}\n\n\
         Details\n\
         {}",
        render_json(config),
        render_details(config)
    )
}

/// Bordered message box for a failed load.
pub fn render_error(message: &str, color: bool) -> String {
    let text = format!("Error: {message}");
    let width = text.chars().count();
    let border = format!("+{}+", "-".repeat(width + 2));
    let body = format!("| {} |", text);

    if color {
        format!("{RED}{border}\n{body}\n{border}{RESET}")
    } else {
        format!("{border}\n{body}\n{border}")
    }
}

/// Whole page for the current state: header, one body section, footer.
pub fn render_view(state: &ViewState, color: bool) -> String {
    let mut sections = vec![format!("{TITLE}\n{SUBTITLE}")];

    if state.loading {
        sections.push(LOADING.to_string());
    }

    if let Some(message) = &state.error {
        sections.push(render_error(message, color));
    }

    if let Some(config) = &state.data {
        sections.push(render_config(config));
    }

    sections.push(FOOTER.to_string());
    sections.join("\n\n")
}
