//! PostgreSQL identifier rules
//!
//! Names that are plain lower-case identifiers pass through:
//!   book        → book
//!   created_at  → created_at
//!
//! Reserved words and anything else get double-quoted:
//!   user        → "user"
//!   BookAuthor  → "BookAuthor"

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PLAIN_IDENT: Regex = Regex::new(r"^[a-z_][a-z0-9_$]*$").unwrap();
    static ref FIELD_NAME: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
    static ref RESERVED: HashSet<&'static str> = [
        "all", "analyse", "analyze", "and", "any", "array", "as", "asc", "asymmetric",
        "both", "case", "cast", "check", "collate", "column", "constraint", "create",
        "current_catalog", "current_date", "current_role", "current_time",
        "current_timestamp", "current_user", "default", "deferrable", "desc", "distinct",
        "do", "else", "end", "except", "false", "fetch", "for", "foreign", "from", "grant",
        "group", "having", "in", "initially", "intersect", "into", "lateral", "leading",
        "limit", "localtime", "localtimestamp", "not", "null", "offset", "on", "only", "or",
        "order", "placing", "primary", "references", "returning", "select", "session_user",
        "some", "symmetric", "table", "then", "to", "trailing", "true", "union", "unique",
        "user", "using", "variadic", "when", "where", "window", "with",
    ]
    .into_iter()
    .collect();
}

/// Quote `name` if PostgreSQL would not accept it bare
pub fn quote_ident(name: &str) -> String {
    if PLAIN_IDENT.is_match(name) && !RESERVED.contains(name) {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

/// Whether `name` can be used as a schema field name
pub fn is_field_name(name: &str) -> bool {
    FIELD_NAME.is_match(name)
}
