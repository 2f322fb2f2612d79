//! Persistence seam between the services and the relational store.
//!
//! Services never touch a connection directly. They open a unit of work
//! with [`Store::transaction`] and issue reads and writes through the
//! [`Repository`] handed to the closure. The whole closure commits or rolls
//! back as one.

mod pg;

pub use pg::PgStore;

use campus_shared::errors::AppResult;

use crate::models::{Message, NewMessage, User};

/// Row-level operations available inside a transaction.
pub trait Repository {
    fn find_user_by_username(&mut self, username: &str) -> AppResult<Option<User>>;

    /// Insert one message and return the stored row with its generated id.
    fn insert_message(&mut self, message: &NewMessage) -> AppResult<Message>;

    /// All messages exchanged between the two users in either direction,
    /// oldest first, ties broken by id.
    fn messages_between(&mut self, user_a: i64, user_b: i64) -> AppResult<Vec<Message>>;
}

pub trait Store: Send + Sync + 'static {
    /// Run `work` in a single transaction: commit on `Ok`, roll back on `Err`.
    fn transaction<T, F>(&self, work: F) -> AppResult<T>
    where
        F: FnOnce(&mut dyn Repository) -> AppResult<T>;

    /// Cheap round trip used by the health check.
    fn ping(&self) -> AppResult<()>;
}
