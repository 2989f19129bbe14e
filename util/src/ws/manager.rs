//! Topic-based broadcast manager backing the live presence feeds.
//!
//! One Tokio broadcast channel per topic, created lazily on first subscribe
//! and dropped again once the last subscriber is gone. A per-topic presence
//! map tracks which authenticated users currently hold a subscription
//! (refcounted, so multiple tabs from the same user are handled).

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

type Topic = String;
type Sender = broadcast::Sender<String>;
type Receiver = broadcast::Receiver<String>;

/// Channel capacity per topic. A slow dashboard that lags behind simply
/// misses intermediate snapshots; delivery is best-effort by design.
const TOPIC_CAPACITY: usize = 100;

#[derive(Clone, Default)]
pub struct WebSocketManager {
    topics: Arc<RwLock<HashMap<Topic, Sender>>>,
    /// topic -> (user_id -> subscription refcount)
    presence: Arc<RwLock<HashMap<Topic, HashMap<i64, usize>>>>,
}

impl WebSocketManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to `topic`, creating the channel if necessary.
    pub async fn subscribe(&self, topic: &str) -> Receiver {
        let mut map = self.topics.write().await;
        map.entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(TOPIC_CAPACITY).0)
            .subscribe()
    }

    /// Broadcasts `msg` to all current subscribers of `topic`.
    ///
    /// A topic nobody subscribed to is a no-op; a topic whose subscribers all
    /// disconnected is removed after the send.
    pub async fn broadcast<T: Into<String>>(&self, topic: &str, msg: T) {
        let mut map = self.topics.write().await;
        if let Some(sender) = map.get(topic) {
            let _ = sender.send(msg.into());
            if sender.receiver_count() == 0 {
                tracing::debug!("removing topic '{topic}', no subscribers left");
                map.remove(topic);
            }
        }
    }

    /// Number of live subscribers on `topic`.
    pub async fn subscriber_count(&self, topic: &str) -> usize {
        let map = self.topics.read().await;
        map.get(topic).map_or(0, |s| s.receiver_count())
    }

    // -------------------- Presence API --------------------

    /// Increment the presence refcount for `user_id` on `topic`.
    pub async fn register(&self, topic: &str, user_id: i64) {
        let mut p = self.presence.write().await;
        let entry = p.entry(topic.to_string()).or_default();
        *entry.entry(user_id).or_insert(0) += 1;
    }

    /// Decrement the presence refcount for `user_id` on `topic`.
    pub async fn unregister(&self, topic: &str, user_id: i64) {
        let mut p = self.presence.write().await;
        if let Some(users) = p.get_mut(topic) {
            if let Some(cnt) = users.get_mut(&user_id) {
                if *cnt > 1 {
                    *cnt -= 1;
                } else {
                    users.remove(&user_id);
                }
            }
            if users.is_empty() {
                p.remove(topic);
            }
        }
    }

    /// Whether `user_id` currently holds at least one subscription to `topic`.
    pub async fn is_user_present_on(&self, topic: &str, user_id: i64) -> bool {
        let p = self.presence.read().await;
        p.get(topic).and_then(|m| m.get(&user_id)).is_some()
    }
}
