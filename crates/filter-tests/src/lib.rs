#![allow(dead_code)]

use connectors::memory::Record;
use model::{SchemaConfig, SchemaRegistry};
use serde_json::{Value as JsonValue, json};


const TICKET_SCHEMA: &str = r#"{
  "models": {
    "ticket": {
      "fields": [
        { "name": "status", "type": "enum", "operators": ["eq", "ne", "in"],
          "enum_values": ["open", { "value": "closed", "label": "Closed" }] },
        { "name": "priority", "type": "enum", "operators": ["eq", "in", "notin"],
          "enum_values": ["low", "medium", "high", "critical"] },
        { "name": "title", "type": "string", "operators": ["eq", "contains", "startswith"],
          "label": "Title" },
        { "name": "age", "type": "number" },
        { "name": "urgent", "type": "boolean" },
        { "name": "created", "type": "date", "operators": ["gt", "lt", "between"] },
        { "name": "assignee", "type": "reference", "operators": ["eq", "in", "isnull"],
          "operator_labels": { "isnull": "is unassigned" } }
      ]
    }
  }
}"#;

const PROJECT_SCHEMA: &str = r#"{
  "models": {
    "project": {
      "fields": [
        { "name": "name", "type": "string" },
        { "name": "archived", "type": "boolean" }
      ]
    }
  }
}"#;

/// Registry holding the `ticket` model.
pub fn ticket_registry() -> SchemaRegistry {
    registry_from(TICKET_SCHEMA)
}

/// Registry holding only the `project` model.
pub fn project_registry() -> SchemaRegistry {
    registry_from(PROJECT_SCHEMA)
}

fn registry_from(source: &str) -> SchemaRegistry {
    let config = SchemaConfig::from_json_str(source).expect("parse schema config");
    SchemaRegistry::from_config(config).expect("build registry")
}

pub fn tickets() -> Vec<Record> {
    [
        json!({ "id": 1, "status": "open", "priority": "high", "title": "Login fails",
                "age": 3, "urgent": true, "created": "2024-01-10", "assignee": 7 }),
        json!({ "id": 2, "status": "open", "priority": "low", "title": "Typo in footer",
                "age": 40, "urgent": false, "created": "2023-11-02", "assignee": null }),
        json!({ "id": 3, "status": "closed", "priority": "critical", "title": "Login page 500",
                "age": 12, "urgent": true, "created": "2024-03-01", "assignee": "usr_9" }),
        json!({ "id": 4, "status": "open", "priority": "critical", "title": "Crash on save",
                "urgent": false, "created": "2024-02-14" }),
        json!({ "id": 5, "status": "closed", "priority": "medium", "title": "100% CPU",
                "age": 90, "urgent": false, "created": "2022-06-30", "assignee": 7 }),
    ]
    .into_iter()
    .filter_map(|record| match record {
        JsonValue::Object(map) => Some(map),
        _ => None,
    })
    .collect()
}

/// `id`s of the given records, in order.
pub fn ids(records: &[&Record]) -> Vec<i64> {
    records
        .iter()
        .filter_map(|r| r.get("id").and_then(JsonValue::as_i64))
        .collect()
}
