//! Output format tests.
//!
//! Every `vlm_run` call answers with exactly one non-empty text content item.
//! Failures set `is_error` instead of returning a protocol error.

use rmcp::model::{CallToolResult, Content, RawContent};

/// Validates that a CallToolResult carries a single text message.
fn validate_tool_result(result: &CallToolResult) -> Result<(), String> {
    if result.is_error.is_none() {
        return Err("Result should state whether it is an error".to_string());
    }

    if result.content.len() != 1 {
        return Err(format!(
            "Result should have exactly one content item, got {}",
            result.content.len()
        ));
    }

    validate_content(&result.content[0])
}

/// Validates that a Content item is non-empty text.
fn validate_content(content: &Content) -> Result<(), String> {
    match &content.raw {
        RawContent::Text(text_content) => {
            if text_content.text.is_empty() {
                return Err("Text content should not be empty".to_string());
            }
            Ok(())
        }
        other => Err(format!("Expected text content, got {:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vlmrun_mcp::{GenerationOutcome, GenerationType, VlmRunParams, VlmRunServer};
    use vlmrun_mcp_common::Config;

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => "",
        }
    }

    fn offline_server() -> VlmRunServer {
        VlmRunServer::new(Config {
            base_url: "http://127.0.0.1:9".to_string(),
            ..Config::default()
        })
    }

    #[test]
    fn test_text_content_passes() {
        let result = CallToolResult::success(vec![Content::text("Image generated successfully. URL: u")]);
        assert!(validate_tool_result(&result).is_ok());
    }

    #[test]
    fn test_empty_text_fails() {
        let result = CallToolResult::success(vec![Content::text("")]);
        assert!(validate_tool_result(&result).is_err());
    }

    #[test]
    fn test_image_content_fails() {
        let result = CallToolResult::success(vec![Content::image("base64data", "image/png")]);
        assert!(validate_tool_result(&result).is_err());
    }

    #[test]
    fn test_multiple_items_fail() {
        let result = CallToolResult::success(vec![Content::text("First"), Content::text("Second")]);
        assert!(validate_tool_result(&result).is_err());
    }

    #[test]
    fn test_success_messages() {
        let image = GenerationOutcome {
            generation_type: GenerationType::Image,
            value: Some("https://example.com/image.jpg".to_string()),
        };
        assert_eq!(
            image.message(),
            "Image generated successfully. URL: https://example.com/image.jpg"
        );

        let document = GenerationOutcome {
            generation_type: GenerationType::Document,
            value: None,
        };
        assert_eq!(document.message(), "Document generated successfully. Content: N/A");
    }

    #[tokio::test]
    async fn test_invalid_call_is_error_result() {
        let result = offline_server()
            .vlm_run(VlmRunParams::new("A cat", "audio"))
            .await
            .unwrap();

        assert!(validate_tool_result(&result).is_ok());
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Invalid generation_type. Must be 'image' or 'document'.");
    }

    #[tokio::test]
    async fn test_unreachable_api_is_error_result() {
        let result = offline_server()
            .vlm_run(VlmRunParams::new("A cat", "image"))
            .await
            .unwrap();

        assert!(validate_tool_result(&result).is_ok());
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).starts_with("Error occurred while calling VLM Run API: "));
    }
}

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;
    use vlmrun_mcp::{GenerationOutcome, GenerationType};

    fn generation_type_strategy() -> impl Strategy<Value = GenerationType> {
        prop_oneof![Just(GenerationType::Image), Just(GenerationType::Document)]
    }

    proptest! {
        /// The reported value always follows the label verbatim
        #[test]
        fn message_ends_with_value(
            generation_type in generation_type_strategy(),
            value in "[a-zA-Z0-9:/._ -]{1,80}",
        ) {
            let body = serde_json::json!({ generation_type.result_field(): value });
            let outcome = GenerationOutcome::from_response(generation_type, &body);
            let message = outcome.message();
            let expected_suffix = format!(": {}", value);
            prop_assert!(message.ends_with(&expected_suffix));
            let label = match generation_type {
                GenerationType::Image => "Image generated successfully. URL",
                GenerationType::Document => "Document generated successfully. Content",
            };
            prop_assert!(message.starts_with(label));
        }

        /// Responses without the expected field report N/A
        #[test]
        fn missing_field_reports_not_available(
            generation_type in generation_type_strategy(),
            key in "[a-z]{1,12}",
        ) {
            prop_assume!(key != generation_type.result_field());
            let body = serde_json::json!({ key: "ignored" });
            let outcome = GenerationOutcome::from_response(generation_type, &body);
            prop_assert_eq!(&outcome.value, &None);
            prop_assert!(outcome.message().ends_with(": N/A"));
        }
    }
}
