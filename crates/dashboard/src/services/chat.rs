//! Mock AI business assistant.
//!
//! Replies are picked at random from a fixed list after the chat delay; the
//! message content is not inspected.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::Latency;

pub const CANNED_REPLIES: [&str; 5] = [
    "Based on your sales data, I recommend focusing on promoting products with higher margins this quarter.",
    "Your inventory shows 3 items with low stock. Would you like me to generate a restock report?",
    "Customer retention has improved by 15% this month. Great work on your engagement strategies!",
    "I've analyzed your cash flow patterns. Consider adjusting payment terms with suppliers to improve liquidity.",
    "Your top-selling category is Electronics. Consider expanding your product line in this area.",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Pick one of the canned replies.
pub fn pick_reply(rng: &mut impl Rng) -> &'static str {
    CANNED_REPLIES.choose(rng).copied().unwrap_or_default()
}

/// Chat service.
pub struct ChatService<'a> {
    latency: &'a Latency,
}

impl<'a> ChatService<'a> {
    #[must_use]
    pub const fn new(latency: &'a Latency) -> Self {
        Self { latency }
    }

    /// Answer a message.
    #[instrument(skip_all, fields(message_len = message.len()))]
    pub async fn reply(&self, message: &str) -> ChatReply {
        self.latency.simulate_chat().await;
        ChatReply {
            reply: pick_reply(&mut rand::rng()).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reply_is_canned() {
        let latency = Latency::none();
        let reply = ChatService::new(&latency).reply("How are sales?").await;
        assert!(CANNED_REPLIES.contains(&reply.reply.as_str()));
    }
}
