//! Team-messaging facade (`SLACK`).

use crate::engine::ToolEngine;
use crate::tools::ToolDescriptor;
use crate::types::Result;
use serde::{Deserialize, Serialize};

pub const TOOLKIT: &str = "SLACK";

pub const SEND_MESSAGE: &str = "SLACK_SEND_MESSAGE";
pub const LIST_CHANNELS: &str = "SLACK_LIST_ALL_CHANNELS";
pub const ADD_REACTION: &str = "SLACK_ADD_REACTION_TO_AN_ITEM";
pub const FETCH_HISTORY: &str = "SLACK_FETCH_CONVERSATION_HISTORY";

pub fn descriptors() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(TOOLKIT, SEND_MESSAGE)
            .describe("Post a message to a channel")
            .required(["channel", "text"]),
        ToolDescriptor::new(TOOLKIT, LIST_CHANNELS)
            .describe("List conversations visible to the workspace token")
            .default_value("limit", 100)
            .default_value("exclude_archived", true),
        ToolDescriptor::new(TOOLKIT, ADD_REACTION)
            .describe("Add an emoji reaction to a message")
            .required(["channel", "timestamp", "name"]),
        ToolDescriptor::new(TOOLKIT, FETCH_HISTORY)
            .describe("Fetch recent messages from a channel")
            .required(["channel"])
            .default_value("limit", 20),
    ]
}

// =============================================================================
// Parameters
// =============================================================================

#[derive(Debug, Clone, Default, Serialize)]
pub struct SendMessageParams {
    pub channel: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListChannelsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_archived: Option<bool>,
}

#[derive(Serialize)]
struct ReactionParams<'a> {
    channel: &'a str,
    timestamp: &'a str,
    name: &'a str,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HistoryParams {
    pub channel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

// =============================================================================
// Results
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PostedMessage {
    pub channel: String,
    pub ts: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Channel {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub num_members: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChannelList {
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub response_metadata: ResponseMetadata,
}

impl ChannelList {
    /// Cursor for the next page; Slack signals the last page with `""`.
    pub fn next_cursor(&self) -> Option<&str> {
        self.response_metadata
            .next_cursor
            .as_deref()
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub text: String,
    pub ts: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct History {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub ok: bool,
}

// =============================================================================
// Facade
// =============================================================================

#[derive(Debug, Clone)]
pub struct MessagingTools {
    engine: ToolEngine,
}

impl MessagingTools {
    pub fn new(engine: ToolEngine) -> Self {
        Self { engine }
    }

    pub async fn send_message(&self, params: &SendMessageParams) -> Result<PostedMessage> {
        self.engine.call(TOOLKIT, SEND_MESSAGE, params).await
    }

    pub async fn list_channels(&self, params: &ListChannelsParams) -> Result<ChannelList> {
        self.engine.call(TOOLKIT, LIST_CHANNELS, params).await
    }

    pub async fn add_reaction(&self, channel: &str, timestamp: &str, name: &str) -> Result<Acknowledgement> {
        let params = ReactionParams {
            channel,
            timestamp,
            name,
        };
        self.engine.call(TOOLKIT, ADD_REACTION, &params).await
    }

    pub async fn fetch_history(&self, params: &HistoryParams) -> Result<History> {
        self.engine.call(TOOLKIT, FETCH_HISTORY, params).await
    }
}
