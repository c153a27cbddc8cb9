//! Terminal rendering for dynamic API payloads

use colored::Colorize;
use serde_json::Value;
use tabled::{Table, Tabled};

/// Render a scalar without JSON quoting; null collapses to an empty string
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// "true" counts as success, whether the API answered a bare boolean or the
/// string form
pub fn truthy(payload: &Value) -> bool {
    matches!(payload, Value::Bool(true))
        || matches!(payload, Value::String(s) if s == "true")
}

/// Key/value listing of an object payload; nested objects are indented
pub fn object(payload: &Value) {
    match payload {
        Value::Object(map) => {
            for (key, value) in map {
                match value {
                    Value::Object(inner) => {
                        println!("\n{}:", key.bold());
                        for (inner_key, inner_value) in inner {
                            println!("\t{}: {}", inner_key, display_value(inner_value));
                        }
                        println!();
                    }
                    other => println!("{}: {}", key, display_value(other)),
                }
            }
        }
        other => println!("{}", display_value(other)),
    }
}

pub fn outcome(payload: &Value, success: &str, failure: &str) {
    if truthy(payload) {
        println!("{}", success.green());
    } else {
        println!("{}", failure.yellow());
    }
}

#[derive(Tabled)]
struct DomainRow {
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Mails")]
    count_mails: String,
}

pub fn domain_table(payload: &Value) {
    let rows: Vec<DomainRow> = payload
        .as_array()
        .map(|rows| {
            rows.iter()
                .map(|row| DomainRow {
                    domain: display_value(&row["domain"]),
                    count_mails: display_value(&row["count_mails"]),
                })
                .collect()
        })
        .unwrap_or_default();

    if rows.is_empty() {
        println!("\n{}", "No domains found.".yellow());
    } else {
        println!("{}", Table::new(rows));
    }
}

#[derive(Tabled)]
struct MailRow {
    #[tabled(rename = "Mail")]
    mail: String,
    #[tabled(rename = "Type")]
    kind: String,
}

pub fn mail_table(payload: &Value) {
    let rows: Vec<MailRow> = payload
        .as_array()
        .map(|rows| {
            rows.iter()
                .map(|row| MailRow {
                    mail: display_value(&row["mail"]),
                    kind: display_value(&row["type"]),
                })
                .collect()
        })
        .unwrap_or_default();

    if rows.is_empty() {
        println!("\n{}", "No mails found.".yellow());
    } else {
        println!("{}", Table::new(rows));
    }
}

/// Context list payload: context id mapped to its domains
pub fn context_list(payload: &Value) {
    match payload {
        Value::Object(map) => {
            for (context_id, domains) in map {
                println!("Context-ID {}:", context_id.bold());
                if let Some(list) = domains.as_array() {
                    for domain in list {
                        println!("\t{}", display_value(domain));
                    }
                }
            }
        }
        other => object(other),
    }
}

/// Search payload: section mapped to its matches
pub fn search_results(payload: &Value) {
    match payload {
        Value::Object(map) => {
            for (section, matches) in map {
                match matches {
                    Value::Array(values) => {
                        println!("\n{}:", section.bold());
                        for value in values {
                            println!("\t{}", display_value(value));
                        }
                    }
                    other => println!("{}: {}", section, display_value(other)),
                }
            }
        }
        other => object(other),
    }
}

/// Plain line listing (blacklist entries)
pub fn lines(payload: &Value) {
    match payload.as_array() {
        Some(values) if !values.is_empty() => {
            for value in values {
                println!("{}", display_value(value));
            }
        }
        _ => println!("\n{}", "No entries found.".yellow()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthy_accepts_bool_and_string_forms() {
        assert!(truthy(&json!(true)));
        assert!(truthy(&json!("true")));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&json!("yes")));
        assert!(!truthy(&json!({"ok": true})));
    }

    #[test]
    fn test_display_value_unquotes_strings_and_hides_null() {
        assert_eq!(display_value(&json!("plain")), "plain");
        assert_eq!(display_value(&json!(null)), "");
        assert_eq!(display_value(&json!(32)), "32");
        assert_eq!(display_value(&json!([1, 2])), "[1,2]");
    }
}
