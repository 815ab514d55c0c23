//! Key/value Config sheet ⇄ strongly-typed [`Project`].
//!
//! The sheet holds one key per row with a serialized value cell. Scalar
//! fields are stored as the raw text the user sees; the cable-type list is a
//! JSON array. Decoding attempts JSON and keeps the raw string otherwise; an
//! absent key yields the field's documented default (empty string / empty
//! list). Nothing here can fail.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use super::cell;
use crate::model::{CableType, Project};
use crate::store::{Cell, Row, Table};

const KEY_NAME: &str = "projectName";
const KEY_START: &str = "startDate";
const KEY_TARGET: &str = "targetDate";
const KEY_AS_OF: &str = "asOf";
const KEY_TYPES: &str = "cableTypes";

const COLUMNS: [&str; 2] = ["Key", "Value"];

/// Decode the Config sheet into a [`Project`].
pub fn decode_project(table: &Table) -> Project {
    let kv = raw_values(table);

    Project {
        name: string_value(&kv, KEY_NAME),
        start_date: string_value(&kv, KEY_START),
        target_date: string_value(&kv, KEY_TARGET),
        as_of: string_value(&kv, KEY_AS_OF),
        types: types_value(&kv),
    }
}

/// Encode a [`Project`] as key/value rows.
pub fn encode_project(project: &Project) -> Table {
    let types_json =
        serde_json::to_string(&project.types).unwrap_or_else(|_| "[]".to_string());

    let mut table = Table::new(COLUMNS.iter().map(|c| c.to_string()).collect());
    table.text_columns = vec![1];
    for (key, value) in [
        (KEY_NAME, project.name.as_str()),
        (KEY_START, project.start_date.as_str()),
        (KEY_TARGET, project.target_date.as_str()),
        (KEY_AS_OF, project.as_of.as_str()),
        (KEY_TYPES, types_json.as_str()),
    ] {
        table
            .rows
            .push(Row::data(vec![Cell::text(key), Cell::text(value)]));
    }
    table
}

fn raw_values(table: &Table) -> IndexMap<String, String> {
    let mut kv = IndexMap::new();
    for row in &table.rows {
        if row.note {
            continue;
        }
        let key = cell::text(row.cell(0));
        if key.trim().is_empty() || key.starts_with('#') {
            continue;
        }
        kv.insert(key, cell::text(row.cell(1)));
    }
    kv
}

fn string_value(kv: &IndexMap<String, String>, key: &str) -> String {
    let Some(raw) = kv.get(key) else {
        return String::new();
    };
    // a value that was stored as a JSON string unwraps to its content;
    // everything else stays as the raw cell text
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::String(s)) => s,
        _ => raw.clone(),
    }
}

fn types_value(kv: &IndexMap<String, String>) -> Vec<CableType> {
    let Some(raw) = kv.get(KEY_TYPES) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<CableType>>(raw) {
        Ok(types) => types,
        Err(err) => {
            debug!(%err, "cableTypes cell is not a valid JSON array, using empty list");
            Vec::new()
        }
    }
}
