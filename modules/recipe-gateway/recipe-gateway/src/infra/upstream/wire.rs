//! Wire format of the OpenAI-style chat-completions API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ports::ChatRequest;

#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct Message<'a> {
    pub role: &'static str,
    pub content: MessageContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Debug, Serialize)]
pub struct ImageUrl<'a> {
    pub url: &'a str,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(model: &'a str, request: &'a ChatRequest) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(Message {
                role: "system",
                content: MessageContent::Text(system),
            });
        }

        let user_content = match &request.image_url {
            Some(url) => MessageContent::Parts(vec![
                ContentPart::Text {
                    text: &request.user_text,
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl { url },
                },
            ]),
            None => MessageContent::Text(&request.user_text),
        };
        messages.push(Message {
            role: "user",
            content: user_content,
        });

        Self {
            model,
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    #[serde(default)]
    pub content: Option<Value>,
}

impl CompletionResponse {
    /// Text of the first choice. Array content is flattened from its text parts.
    pub fn into_text(self) -> Option<String> {
        let content = self.choices.into_iter().next()?.message.content?;
        match content {
            Value::String(text) => Some(text),
            Value::Array(parts) => {
                let text: String = parts
                    .iter()
                    .filter_map(|part| part.get("text").and_then(Value::as_str))
                    .collect();
                Some(text)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde_json::json;

    use super::*;

    fn chat(image_url: Option<&str>) -> ChatRequest {
        ChatRequest {
            system: Some("sys".to_owned()),
            user_text: "olhe".to_owned(),
            image_url: image_url.map(str::to_owned),
            max_tokens: Some(2000),
            temperature: None,
        }
    }

    #[test]
    fn image_request_uses_multimodal_parts() {
        let req = chat(Some("data:image/png;base64,AA"));
        let body = serde_json::to_value(CompletionRequest::new("m", &req)).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "m",
                "messages": [
                    { "role": "system", "content": "sys" },
                    { "role": "user", "content": [
                        { "type": "text", "text": "olhe" },
                        { "type": "image_url", "image_url": { "url": "data:image/png;base64,AA" } }
                    ]}
                ],
                "max_tokens": 2000
            })
        );
    }

    #[test]
    fn text_request_omits_unset_options() {
        let req = ChatRequest {
            system: None,
            user_text: "mude".to_owned(),
            image_url: None,
            max_tokens: None,
            temperature: Some(0.5),
        };
        let body = serde_json::to_value(CompletionRequest::new("m", &req)).unwrap();
        assert_eq!(body["messages"], json!([{ "role": "user", "content": "mude" }]));
        assert!(body.get("max_tokens").is_none());
        assert_eq!(body["temperature"], json!(0.5));
    }

    #[test]
    fn text_parts_are_concatenated() {
        let resp: CompletionResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "content": [
                { "type": "text", "text": "{\"a\":" },
                { "type": "text", "text": "1}" }
            ]}}]
        }))
        .unwrap();
        assert_eq!(resp.into_text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn missing_choice_or_content_is_none() {
        let empty: CompletionResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert!(empty.into_text().is_none());

        let null: CompletionResponse =
            serde_json::from_value(json!({ "choices": [{ "message": { "content": null } }] }))
                .unwrap();
        assert!(null.into_text().is_none());
    }
}
