use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// User-visible feedback broadcast by pages. Fire-and-forget; nothing in
/// this crate ever blocks on delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub cause: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    pub fn info(&self, message: impl Into<String>) {
        self.send(Notification {
            level: Level::Info,
            message: message.into(),
            cause: None,
        });
    }

    pub fn error(&self, message: impl Into<String>, cause: Option<String>) {
        self.send(Notification {
            level: Level::Error,
            message: message.into(),
            cause,
        });
    }

    fn send(&self, notification: Notification) {
        // A send with no listeners is fine.
        let _ = self.tx.send(notification);
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn notifications_reach_subscribers() {
        let notifier = Notifier::default();
        let mut rx = notifier.subscribe();

        notifier.info("saved");
        notifier.error("failed", Some("boom".to_string()));

        assert_eq!(rx.recv().await.unwrap().level, Level::Info);
        let error = rx.recv().await.unwrap();
        assert_eq!(error.level, Level::Error);
        assert_eq!(error.cause.as_deref(), Some("boom"));
    }

    #[test]
    fn sending_without_subscribers_does_not_panic() {
        Notifier::default().info("nobody listening");
    }
}
