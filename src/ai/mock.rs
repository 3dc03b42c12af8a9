use super::GenerationProvider;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Status(u16, String),
    Empty(serde_json::Value),
}

/// Scripted provider: replies are consumed in order, then a default text is
/// returned. Every prompt is recorded.
#[derive(Clone)]
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_text(self, text: &str) -> Self {
        self.push(MockReply::Text(text.to_string()))
    }

    /// Reply with a non-success provider status.
    pub fn with_status(self, status: u16, body: &str) -> Self {
        self.push(MockReply::Status(status, body.to_string()))
    }

    /// Reply with an envelope that holds no text.
    pub fn with_empty(self, raw: serde_json::Value) -> Self {
        self.push(MockReply::Empty(raw))
    }

    fn push(self, reply: MockReply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationProvider for MockProvider {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Status(status, body)) => Err(Error::Provider { status, body }),
            Some(MockReply::Empty(raw)) => Err(Error::Extraction { raw }),
            None => Ok("The story went on.".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_default_text() {
        let provider = MockProvider::new();
        let text = provider.generate("anything").await.unwrap();
        assert_eq!(text, "The story went on.");
    }

    #[tokio::test]
    async fn test_mock_provider_replies_in_order() {
        let provider = MockProvider::new()
            .with_text("first")
            .with_status(503, "unavailable")
            .with_empty(serde_json::json!({}));

        assert_eq!(provider.generate("a").await.unwrap(), "first");
        assert!(matches!(
            provider.generate("b").await.unwrap_err(),
            Error::Provider { status: 503, .. }
        ));
        assert!(matches!(
            provider.generate("c").await.unwrap_err(),
            Error::Extraction { .. }
        ));
        assert_eq!(provider.generate("d").await.unwrap(), "The story went on.");
    }

    #[tokio::test]
    async fn test_mock_provider_records_prompts() {
        let provider = MockProvider::new();

        assert_eq!(provider.get_call_count(), 0);

        provider.generate("one").await.unwrap();
        provider.generate("two").await.unwrap();
        assert_eq!(provider.get_call_count(), 2);
        assert_eq!(provider.get_prompts(), vec!["one", "two"]);
    }
}
