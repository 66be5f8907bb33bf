use crate::cli::{Cli, OutputFormat};
use chrono::{DateTime, Local, Utc};
use clap::CommandFactory;
use clap_complete::Shell;
use colored::Colorize;
use servicetitan_auth::config::CLIENT_SECRET;
use servicetitan_auth::{ApiEnvironment, AuthHeaders, ConnectionConfig, TokenResponse};
use std::collections::BTreeMap;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl EntryRow {
    fn new(key: &str, value: &str) -> Self {
        let value = if value.is_empty() {
            format!("{}", "(not set)".yellow())
        } else {
            value.to_string()
        };
        Self {
            key: key.to_string(),
            value,
        }
    }
}

fn print_entries(entries: &BTreeMap<&str, String>, format: &OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(entries).expect("serialization should not fail")
            );
        }
        OutputFormat::Compact => {
            for (key, value) in entries {
                println!("{}={}", key, value);
            }
        }
        OutputFormat::Table => {
            let rows: Vec<EntryRow> = entries
                .iter()
                .map(|(key, value)| EntryRow::new(key, value))
                .collect();
            let table = Table::new(rows).with(Style::rounded()).to_string();
            println!("{table}");
        }
    }
}

pub fn format_connection(conn: &ConnectionConfig, format: &OutputFormat) {
    let entries: BTreeMap<&str, String> = conn
        .to_map()
        .into_iter()
        .map(|(key, value)| {
            let value = if key == CLIENT_SECRET {
                mask_secret(value)
            } else {
                value.to_string()
            };
            (key, value)
        })
        .collect();
    print_entries(&entries, format);
}

pub fn format_headers(headers: &AuthHeaders, format: &OutputFormat) {
    match format {
        OutputFormat::Compact => {
            for (name, value) in headers.to_map() {
                println!("{}: {}", name, value);
            }
        }
        _ => {
            let entries: BTreeMap<&str, String> = headers
                .to_map()
                .into_iter()
                .map(|(name, value)| (name, value.to_string()))
                .collect();
            print_entries(&entries, format);
        }
    }
}

pub fn format_token(token: &TokenResponse, issued_at: DateTime<Utc>, format: &OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(token).expect("serialization should not fail")
            );
        }
        OutputFormat::Compact => {
            println!("{}", token.access_token);
        }
        OutputFormat::Table => {
            println!("{}: {}", "Access token".dimmed(), token.access_token);
            if let Some(token_type) = &token.token_type {
                println!("{}: {}", "Type".dimmed(), token_type);
            }
            if let Some(scope) = &token.scope {
                println!("{}: {}", "Scope".dimmed(), scope);
            }
            match token.expires_at(issued_at) {
                Some(expires) => println!(
                    "{}: {}",
                    "Expires".dimmed(),
                    expires.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
                ),
                None => println!("{}: {}", "Expires".dimmed(), "unknown".yellow()),
            }
        }
    }
}

pub fn format_urls(environment: ApiEnvironment, format: &OutputFormat) {
    match format {
        OutputFormat::Compact => {
            println!("{}", environment.auth_root_url());
            println!("{}", environment.api_root_url());
        }
        _ => {
            let entries = BTreeMap::from([
                ("environment", environment.to_string()),
                ("auth_root", environment.auth_root_url().to_string()),
                ("api_root", environment.api_root_url().to_string()),
            ]);
            print_entries(&entries, format);
        }
    }
}

pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else if secret.chars().count() >= 8 {
        let chars: Vec<char> = secret.chars().collect();
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret_long() {
        assert_eq!(mask_secret("supersecretvalue"), "supe...alue");
    }

    #[test]
    fn test_mask_secret_short() {
        assert_eq!(mask_secret("short"), "***");
    }

    #[test]
    fn test_mask_secret_exactly_eight() {
        assert_eq!(mask_secret("abcdefgh"), "abcd...efgh");
    }

    #[test]
    fn test_mask_secret_empty_stays_empty() {
        assert_eq!(mask_secret(""), "");
    }

    #[test]
    fn test_mask_secret_unicode() {
        assert_eq!(mask_secret("sécrétvalüe"), "sécr...alüe");
    }

    #[test]
    fn test_entry_row_marks_empty_values() {
        let row = EntryRow::new("SERVICETITAN_APP_ID", "");
        assert!(row.value.contains("(not set)"));

        let row = EntryRow::new("SERVICETITAN_APP_ID", "app");
        assert_eq!(row.value, "app");
    }
}
