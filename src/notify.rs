use tokio::sync::broadcast;

use crate::error::CartFailure;

/// Fan-out channel for user-facing failure messages.
///
/// The rendering layer subscribes and shows each message however it likes
/// (toast, banner, log line); the store only supplies the text.
#[derive(Clone)]
pub struct Notifier {
    sender: broadcast::Sender<String>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.sender.subscribe()
    }

    /// Delivers one failure message. A send with no live subscribers is
    /// not an error; the message is simply dropped.
    pub fn failure(&self, failure: &CartFailure) {
        let _ = self.sender.send(failure.to_string());
    }
}
