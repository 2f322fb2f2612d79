use std::sync::Arc;

use mockable::Clock;

use campus_shared::errors::{AppError, AppResult, ErrorCode};

use crate::models::{DirectMessage, NewMessage, User};
use crate::store::{Repository, Store};

/// Business rules for direct messages: identity resolution, timestamping
/// and conversation lookup.
pub struct MessageService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl<S: Store> MessageService<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { store, clock }
    }

    /// Every message exchanged between the two users, oldest first.
    ///
    /// Fails with `UserNotFound` if either username is unknown. An existing
    /// pair with no history yields an empty list.
    pub fn conversation(&self, username_a: &str, username_b: &str) -> AppResult<Vec<DirectMessage>> {
        let items = self.store.transaction(|repo| {
            let user_a = resolve(repo, username_a, ErrorCode::UserNotFound, "user")?;
            let user_b = resolve(repo, username_b, ErrorCode::UserNotFound, "user")?;

            let items = repo
                .messages_between(user_a.id, user_b.id)?
                .into_iter()
                .map(|message| {
                    if message.sender_id == user_a.id {
                        DirectMessage::new(message, &user_a, &user_b)
                    } else {
                        DirectMessage::new(message, &user_b, &user_a)
                    }
                })
                .collect::<Vec<_>>();

            Ok(items)
        })?;

        tracing::debug!(
            user_a = %username_a,
            user_b = %username_b,
            count = items.len(),
            "conversation loaded"
        );

        Ok(items)
    }

    /// Persist a new message from `from_username` to `to_username`, stamped
    /// with the current server time.
    ///
    /// Content is stored as given. Each call creates a new row.
    pub fn send(&self, from_username: &str, to_username: &str, content: &str) -> AppResult<DirectMessage> {
        let message = self.store.transaction(|repo| {
            let sender = resolve(repo, from_username, ErrorCode::SenderNotFound, "sender user")?;
            let recipient = resolve(repo, to_username, ErrorCode::RecipientNotFound, "recipient user")?;

            let new_message = NewMessage {
                sender_id: sender.id,
                recipient_id: recipient.id,
                sent_at: self.clock.utc(),
                content: content.to_string(),
            };
            let stored = repo.insert_message(&new_message)?;

            Ok(DirectMessage::new(stored, &sender, &recipient))
        })?;

        tracing::info!(
            message_id = message.id,
            sender = %message.sender,
            recipient = %message.recipient,
            "direct message stored"
        );

        Ok(message)
    }
}

fn resolve(
    repo: &mut dyn Repository,
    username: &str,
    code: ErrorCode,
    role: &str,
) -> AppResult<User> {
    repo.find_user_by_username(username)?
        .ok_or_else(|| AppError::new(code, format!("{role} {username} not found")))
}
