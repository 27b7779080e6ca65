//! Transient (toast-style) notifications.
//!
//! Toasts are the sole channel for surfacing asynchronous errors to the
//! user. Stores emit through the `Notifier` trait; the host decides how to
//! render. The channel implementation hands the host a receiver to drain.

use tokio::sync::mpsc;

/// Default display duration, matching the original UI's 5s toasts.
pub const DEFAULT_TOAST_DURATION_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

/// One transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub duration_ms: u64,
    /// Whether a click dismisses the toast early.
    pub close_on_click: bool,
}

impl Toast {
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            duration_ms: DEFAULT_TOAST_DURATION_MS,
            close_on_click: true,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Info, message)
    }
}

/// Sink for toast notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);

    fn error(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Toast::error(message));
    }
}

/// Notifier that drops every toast. Useful for headless callers and tests
/// that do not assert on notifications.
#[derive(Debug, Default, Clone)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _toast: Toast) {}
}

/// Channel-backed notifier; the receiving half is drained by the UI shell.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Toast>,
}

impl ChannelNotifier {
    /// Creates the notifier together with the receiver to drain.
    pub fn pair() -> (Self, mpsc::UnboundedReceiver<Toast>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, toast: Toast) {
        // The receiver may be gone during shutdown; dropped toasts are fine.
        let _ = self.tx.send(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_notifier_delivers_in_order() {
        let (notifier, mut rx) = ChannelNotifier::pair();
        notifier.notify(Toast::error("first"));
        notifier.notify(Toast::info("second"));

        let first = rx.try_recv().unwrap();
        assert_eq!(first.level, ToastLevel::Error);
        assert_eq!(first.message, "first");
        assert_eq!(first.duration_ms, DEFAULT_TOAST_DURATION_MS);
        assert!(first.close_on_click);

        assert_eq!(rx.try_recv().unwrap().message, "second");
        assert!(rx.try_recv().is_err());
    }
}
