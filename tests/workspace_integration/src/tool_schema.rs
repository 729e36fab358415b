//! Tool schema validity tests.
//!
//! Every registered tool must carry a name, a description and an input schema
//! of type `object` listing its parameters.

use serde_json::Value;

/// Validates that a JSON schema has the required structure.
fn validate_json_schema(schema: &Value) -> Result<(), String> {
    let obj = schema
        .as_object()
        .ok_or_else(|| "Schema must be an object".to_string())?;

    // Tool params are always objects
    if let Some(type_val) = obj.get("type") {
        if type_val != "object" {
            return Err(format!("Expected type 'object', got {:?}", type_val));
        }
    }

    if let Some(properties) = obj.get("properties") {
        if !properties.is_object() {
            return Err("Properties must be an object".to_string());
        }
    }

    Ok(())
}

/// Validates that a tool has required fields.
fn validate_tool(tool: &rmcp::model::Tool) -> Result<(), String> {
    if tool.name.is_empty() {
        return Err("Tool name cannot be empty".to_string());
    }

    match tool.description.as_deref() {
        Some(description) if !description.is_empty() => {}
        _ => return Err(format!("Tool '{}' must have a description", tool.name)),
    }

    if tool.input_schema.is_empty() {
        return Err(format!("Tool '{}' must have an input schema", tool.name));
    }

    let schema_value = serde_json::to_value(&*tool.input_schema)
        .map_err(|e| format!("Failed to serialize schema: {}", e))?;
    validate_json_schema(&schema_value)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::schema_for;
    use std::borrow::Cow;
    use std::sync::Arc;
    use vlmrun_mcp::server::{TOOL_DESCRIPTION, TOOL_NAME};
    use vlmrun_mcp::{VlmRunParams, VlmRunServer};

    #[test]
    fn test_json_schema_validation() {
        let valid_schema = serde_json::json!({
            "type": "object",
            "properties": {
                "prompt": {
                    "type": "string"
                }
            }
        });
        assert!(validate_json_schema(&valid_schema).is_ok());

        let invalid_schema = serde_json::json!({
            "type": "string"
        });
        assert!(validate_json_schema(&invalid_schema).is_err());
    }

    #[test]
    fn test_tool_validation_rejects_missing_description() {
        let tool = rmcp::model::Tool {
            name: Cow::Borrowed("vlm_run"),
            description: None,
            input_schema: Arc::new(serde_json::Map::new()),
            annotations: None,
            icons: None,
            meta: None,
            output_schema: None,
            title: None,
        };
        assert!(validate_tool(&tool).is_err());
    }

    #[test]
    fn test_registered_tools_are_valid() {
        for tool in VlmRunServer::tool_definitions() {
            let result = validate_tool(&tool);
            assert!(result.is_ok(), "Tool {} should be valid: {:?}", tool.name, result.err());
        }
    }

    #[test]
    fn test_vlm_run_tool_metadata() {
        let tools = VlmRunServer::tool_definitions();
        let tool = tools.iter().find(|t| t.name == TOOL_NAME).unwrap();
        assert_eq!(tool.description.as_deref(), Some(TOOL_DESCRIPTION));
    }

    #[test]
    fn test_vlm_run_params_schema() {
        let schema = serde_json::to_value(schema_for!(VlmRunParams)).unwrap();
        assert!(validate_json_schema(&schema).is_ok());

        let properties = schema["properties"].as_object().unwrap();
        assert!(properties.contains_key("prompt"), "Schema should have 'prompt' property");
        assert!(
            properties.contains_key("generation_type"),
            "Schema should have 'generation_type' property"
        );
    }

    /// Both parameters stay optional in the schema so that a missing value is
    /// reported by the tool rather than rejected by the client.
    #[test]
    fn test_vlm_run_params_not_required_in_schema() {
        let schema = serde_json::to_value(schema_for!(VlmRunParams)).unwrap();
        let required = schema
            .get("required")
            .and_then(|r| r.as_array())
            .cloned()
            .unwrap_or_default();
        assert!(required.is_empty(), "Unexpected required fields: {:?}", required);
    }

    #[test]
    fn test_schema_descriptions_mention_generation_types() {
        let schema = serde_json::to_value(schema_for!(VlmRunParams)).unwrap();
        let description = schema["properties"]["generation_type"]["description"]
            .as_str()
            .unwrap_or_default();
        assert!(description.contains("image"));
        assert!(description.contains("document"));
    }
}

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;
    use vlmrun_mcp::VlmRunParams;

    proptest! {
        /// Any string arguments deserialize into tool params unchanged.
        #[test]
        fn string_arguments_deserialize(prompt in ".{0,64}", generation_type in "[a-zA-Z]{0,12}") {
            let arguments = serde_json::json!({
                "prompt": prompt,
                "generation_type": generation_type,
            });
            let params: VlmRunParams = serde_json::from_value(arguments).unwrap();
            prop_assert_eq!(params, VlmRunParams::new(prompt, generation_type));
        }

        /// Non-string prompts are rejected at deserialization.
        #[test]
        fn numeric_prompt_rejected(prompt in any::<i64>()) {
            let arguments = serde_json::json!({
                "prompt": prompt,
                "generation_type": "image",
            });
            prop_assert!(serde_json::from_value::<VlmRunParams>(arguments).is_err());
        }
    }
}
