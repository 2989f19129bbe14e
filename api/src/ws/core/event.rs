use serde::Serialize;

/// An event knows its stable name and the topic it belongs on.
pub trait Event: Serialize {
    const NAME: &'static str;
    /// Canonical topic path (e.g. "presence:org:42").
    fn topic_path(&self) -> String;
}
