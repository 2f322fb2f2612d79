use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;

use crate::schema::{messages, users};

// --- User ---

#[derive(Debug, Queryable, Identifiable, Serialize, Clone, PartialEq)]
#[diesel(table_name = users)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub email: Option<String>,
    pub college: Option<String>,
}

// --- Message ---

#[derive(Debug, Queryable, Identifiable, Serialize, Clone, PartialEq)]
#[diesel(table_name = messages)]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub sent_at: DateTime<Utc>,
    pub content: String,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = messages)]
pub struct NewMessage {
    pub sender_id: i64,
    pub recipient_id: i64,
    pub sent_at: DateTime<Utc>,
    pub content: String,
}

/// A stored message together with the usernames of both parties.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectMessage {
    pub id: i64,
    pub sender: String,
    pub recipient: String,
    pub sent_at: DateTime<Utc>,
    pub content: String,
}

impl DirectMessage {
    pub fn new(message: Message, sender: &User, recipient: &User) -> Self {
        Self {
            id: message.id,
            sender: sender.username.clone(),
            recipient: recipient.username.clone(),
            sent_at: message.sent_at,
            content: message.content,
        }
    }
}
