use serde::Deserialize;

/// Messages a presence observer may send upstream.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PresenceIncoming {
    /// Ask for a fresh snapshot to be rebroadcast on the org topic.
    RequestRoster,
    /// App-level ping; normally answered by the serving loop already.
    Ping,
}
