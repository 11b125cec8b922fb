use clap::ValueEnum;

use crate::models::UserRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub fn render(records: &[UserRecord], format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Table => Ok(render_table(records)),
        OutputFormat::Json => serde_json::to_string_pretty(records).map(|json| json + "\n"),
    }
}

/// Two left-aligned columns, `username` and `profile_url`, sized to the
/// widest cell.
pub fn render_table(records: &[UserRecord]) -> String {
    const USERNAME: &str = "username";
    const PROFILE_URL: &str = "profile_url";

    let width = records
        .iter()
        .map(|r| r.username.chars().count())
        .chain(std::iter::once(USERNAME.len()))
        .max()
        .unwrap_or(USERNAME.len());
    let url_width = records
        .iter()
        .map(|r| r.profile_url.chars().count())
        .chain(std::iter::once(PROFILE_URL.len()))
        .max()
        .unwrap_or(PROFILE_URL.len());

    let mut out = String::new();
    out.push_str(&format!("{:<width$}  {}\n", USERNAME, PROFILE_URL, width = width));
    out.push_str(&format!("{}  {}\n", "-".repeat(width), "-".repeat(url_width)));
    for record in records {
        out.push_str(&format!(
            "{:<width$}  {}\n",
            record.username,
            record.profile_url,
            width = width
        ));
    }
    out
}
