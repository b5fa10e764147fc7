/// Messages exchanged between the popup and the background page
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reply sent back for a handled `openTab` request
pub const OPEN_TAB_ACK: &str = "done";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Message {
    OpenTab { url: String },
}

impl Message {
    /// Recognize an incoming runtime message; anything else is `None`
    pub fn parse(value: Value) -> Option<Message> {
        serde_json::from_value(value).ok()
    }

    pub fn ack(&self) -> &'static str {
        match self {
            Message::OpenTab { .. } => OPEN_TAB_ACK,
        }
    }
}
