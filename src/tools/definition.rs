// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Tool definition types
//!
//! These types are used to define tools for the LLM.

use serde_json::Value;

use crate::llm::provider::ToolInputSchema;

/// Helper to create a tool input schema
pub struct SchemaBuilder {
    properties: serde_json::Map<String, Value>,
    required: Vec<String>,
}

impl SchemaBuilder {
    /// Create a new schema builder
    pub fn new() -> Self {
        Self {
            properties: serde_json::Map::new(),
            required: vec![],
        }
    }

    /// Add a string property
    pub fn string(mut self, name: &str, description: &str, required: bool) -> Self {
        self.properties.insert(
            name.to_string(),
            serde_json::json!({
                "type": "string",
                "description": description
            }),
        );
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Build the schema
    pub fn build(self) -> ToolInputSchema {
        ToolInputSchema {
            schema_type: "object".to_string(),
            properties: Value::Object(self.properties),
            required: self.required,
        }
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_builder_string_required() {
        let schema = SchemaBuilder::new()
            .string("command", "The command", true)
            .build();

        assert_eq!(schema.schema_type, "object");
        assert_eq!(schema.properties["command"]["type"], "string");
        assert_eq!(schema.properties["command"]["description"], "The command");
        assert_eq!(schema.required, vec!["command".to_string()]);
    }

    #[test]
    fn test_schema_builder_string_optional() {
        let schema = SchemaBuilder::new().string("note", "A note", false).build();

        assert!(schema.properties.get("note").is_some());
        assert!(schema.required.is_empty());
    }

    #[test]
    fn test_schema_builder_keeps_required_order() {
        let schema = SchemaBuilder::default()
            .string("script", "Script body", true)
            .string("suggestedName", "File name", true)
            .build();

        assert_eq!(schema.required, vec!["script", "suggestedName"]);
    }
}
