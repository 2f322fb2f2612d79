//! In-memory store, deterministic clock and router helpers for unit tests.

use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::{Clock, DefaultClock};
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;

use campus_shared::errors::{AppError, AppResult};

use crate::models::{Message, NewMessage, User};
use crate::store::{Repository, Store};
use crate::AppState;

#[derive(Debug, Clone, Default)]
struct Tables {
    users: Vec<User>,
    messages: Vec<Message>,
    next_message_id: i64,
}

/// `Store` over plain vectors. A transaction works on a copy of the tables
/// and swaps it in only when the closure succeeds.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    offline: bool,
    failing_commit: bool,
}

impl InMemoryStore {
    pub fn with_users(usernames: &[&str]) -> Self {
        let users = usernames
            .iter()
            .zip(1..)
            .map(|(name, id)| User {
                id,
                username: (*name).to_string(),
                password: Some(format!("hash-of-{name}")),
                email: Some(format!("{name}@campus.edu")),
                college: Some("Engineering".to_string()),
            })
            .collect();

        Self {
            tables: Mutex::new(Tables {
                users,
                messages: Vec::new(),
                next_message_id: 1,
            }),
            offline: false,
            failing_commit: false,
        }
    }

    /// Make every transaction fail at commit after its work succeeded.
    pub fn failing_commit(mut self) -> Self {
        self.failing_commit = true;
        self
    }

    /// Store whose health ping fails the way a refused connection would.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn message_count(&self) -> usize {
        self.tables.lock().unwrap().messages.len()
    }
}

impl Store for InMemoryStore {
    fn transaction<T, F>(&self, work: F) -> AppResult<T>
    where
        F: FnOnce(&mut dyn Repository) -> AppResult<T>,
    {
        let mut committed = self.tables.lock().unwrap();
        let mut working = committed.clone();

        let out = work(&mut working)?;
        if self.failing_commit {
            return Err(AppError::Internal(anyhow::anyhow!("commit failed")));
        }
        *committed = working;
        Ok(out)
    }

    fn ping(&self) -> AppResult<()> {
        if self.offline {
            return Err(AppError::Internal(anyhow::anyhow!(
                "could not connect to server: Connection refused (10.0.0.5:5432)"
            )));
        }
        Ok(())
    }
}

impl Repository for Tables {
    fn find_user_by_username(&mut self, username: &str) -> AppResult<Option<User>> {
        Ok(self.users.iter().find(|u| u.username == username).cloned())
    }

    fn insert_message(&mut self, message: &NewMessage) -> AppResult<Message> {
        let stored = Message {
            id: self.next_message_id,
            sender_id: message.sender_id,
            recipient_id: message.recipient_id,
            sent_at: message.sent_at,
            content: message.content.clone(),
        };
        self.next_message_id += 1;
        self.messages.push(stored.clone());
        Ok(stored)
    }

    fn messages_between(&mut self, user_a: i64, user_b: i64) -> AppResult<Vec<Message>> {
        let mut items: Vec<Message> = self
            .messages
            .iter()
            .filter(|m| {
                (m.sender_id == user_a && m.recipient_id == user_b)
                    || (m.sender_id == user_b && m.recipient_id == user_a)
            })
            .cloned()
            .collect();
        items.sort_by_key(|m| (m.sent_at, m.id));
        Ok(items)
    }
}

/// Clock that moves forward one second every time it is read.
pub struct SteppingClock(Mutex<DateTime<Utc>>);

impl SteppingClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self(Mutex::new(start))
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut now = self.0.lock().unwrap();
        let current = *now;
        *now += TimeDelta::seconds(1);
        current
    }
}

/// Formatted tracing output collected in memory.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Router over `store` using the system clock and no metrics recorder.
pub fn test_app(store: Arc<InMemoryStore>) -> Router {
    let state = AppState::new(store, Arc::new(DefaultClock), None);
    crate::routes::router(Arc::new(state))
}

/// Send one request and decode the JSON body (`Null` when empty).
pub async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);
    call_with_body(app, method, uri, body).await
}

/// Like [`call`] with an arbitrary request body sent as `text/plain`.
pub async fn call_with_body(
    app: &Router,
    method: &str,
    uri: &str,
    body: Body,
) -> (StatusCode, serde_json::Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "text/plain")
        .body(body)
        .unwrap();

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}
