//! Response text extraction - an ordered chain of pure extractors.
//!
//! Each extractor understands one response shape and returns `None` when the
//! value does not match it. The first non-blank hit wins.

use serde_json::Value;

/// Pulls analysis text out of one response shape.
pub type TextExtractor = fn(&Value) -> Option<String>;

/// Extractors in the order they are tried.
pub const EXTRACTORS: &[TextExtractor] = &[
    chat_message_text,
    chat_message_blocks,
    output_text,
    output_blocks,
    streamed_deltas,
];

/// Runs the extractor chain against a parsed response body.
pub fn extract_text(value: &Value) -> Option<String> {
    EXTRACTORS
        .iter()
        .find_map(|extract| extract(value).filter(|text| !text.trim().is_empty()))
}

/// Parses a response body as JSON, or as server-sent events.
///
/// An event stream becomes an array of its `data:` payloads, skipping the
/// `[DONE]` marker and payloads that are not JSON.
pub fn parse_body(body: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return Some(value);
    }

    let events: Vec<Value> = body
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(str::trim)
        .filter(|data| *data != "[DONE]")
        .filter_map(|data| serde_json::from_str(data).ok())
        .collect();

    (!events.is_empty()).then_some(Value::Array(events))
}

/// Chat completions: `choices[0].message.content` as a plain string.
fn chat_message_text(value: &Value) -> Option<String> {
    value
        .pointer("/choices/0/message/content")?
        .as_str()
        .map(str::to_string)
}

/// Chat completions: `choices[0].message.content` as an array of text blocks.
fn chat_message_blocks(value: &Value) -> Option<String> {
    let blocks = value.pointer("/choices/0/message/content")?.as_array()?;
    join_block_text(blocks.iter())
}

/// Responses API convenience field `output_text`.
fn output_text(value: &Value) -> Option<String> {
    value.get("output_text")?.as_str().map(str::to_string)
}

/// Responses API: `output[].content[]` blocks of type `output_text`.
fn output_blocks(value: &Value) -> Option<String> {
    let items = value.get("output")?.as_array()?;
    let blocks = items
        .iter()
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .filter(|block| block.get("type").and_then(Value::as_str) == Some("output_text"));
    join_block_text(blocks)
}

/// Streamed chat chunks: concatenated `choices[0].delta.content` fragments.
fn streamed_deltas(value: &Value) -> Option<String> {
    let chunks = match value.as_array() {
        Some(chunks) => chunks.as_slice(),
        None => std::slice::from_ref(value),
    };

    let fragments: Vec<&str> = chunks
        .iter()
        .filter_map(|chunk| chunk.pointer("/choices/0/delta/content"))
        .filter_map(Value::as_str)
        .collect();

    (!fragments.is_empty()).then(|| fragments.concat())
}

fn join_block_text<'a>(blocks: impl Iterator<Item = &'a Value>) -> Option<String> {
    let texts: Vec<&str> = blocks
        .filter_map(|block| block.get("text").and_then(Value::as_str))
        .collect();
    (!texts.is_empty()).then(|| texts.concat())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_chat_string_content() {
        let value = json!({"choices": [{"message": {"role": "assistant", "content": "Calm(2)"}}]});
        assert_eq!(extract_text(&value).as_deref(), Some("Calm(2)"));
    }

    #[test]
    fn extracts_chat_block_content() {
        let value = json!({"choices": [{"message": {"content": [
            {"type": "text", "text": "Calm(2)\n\n"},
            {"type": "text", "text": "Summary"}
        ]}}]});
        assert_eq!(extract_text(&value).as_deref(), Some("Calm(2)\n\nSummary"));
    }

    #[test]
    fn extracts_output_text_field() {
        let value = json!({"output_text": "Hopeful(1)", "output": []});
        assert_eq!(extract_text(&value).as_deref(), Some("Hopeful(1)"));
    }

    #[test]
    fn extracts_output_blocks_skipping_reasoning_items() {
        let value = json!({"output": [
            {"type": "reasoning", "summary": []},
            {"type": "message", "content": [
                {"type": "output_text", "text": "Joyful(4)"},
                {"type": "refusal", "text": "ignored"}
            ]}
        ]});
        assert_eq!(extract_text(&value).as_deref(), Some("Joyful(4)"));
    }

    #[test]
    fn extracts_streamed_deltas_in_order() {
        let body = concat!(
            "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"Calm\"}}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"(3)\"}}]}\n\n",
            "data: [DONE]\n\n"
        );
        let value = parse_body(body).unwrap();
        assert_eq!(extract_text(&value).as_deref(), Some("Calm(3)"));
    }

    #[test]
    fn blank_text_falls_through_to_later_extractors() {
        let value = json!({
            "choices": [{"message": {"content": "   "}}],
            "output_text": "Grateful(2)"
        });
        assert_eq!(extract_text(&value).as_deref(), Some("Grateful(2)"));
    }

    #[test]
    fn unknown_shape_yields_none() {
        assert_eq!(extract_text(&json!({"error": {"message": "nope"}})), None);
        assert_eq!(extract_text(&json!([])), None);
    }

    #[test]
    fn parse_body_rejects_plain_text() {
        assert!(parse_body("<html>Bad Gateway</html>").is_none());
    }
}
