//! User-facing notices.
//!
//! The cart reports failures to the person using the storefront through a
//! [`Notifier`]. Every failed operation emits exactly one [`Notice`]; successful
//! ones emit none, since the UI already follows the cart snapshot.

use std::fmt;

use tokio::sync::broadcast;
use tracing::warn;

/// A message for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    /// The requested quantity exceeds the available stock.
    OutOfStock,
    /// Adding a product failed for any other reason.
    AddFailed,
    /// Removing a product failed.
    RemoveFailed,
    /// Changing a product's quantity failed for any reason other than stock.
    UpdateFailed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::OutOfStock => "Requested quantity is out of stock",
            Notice::AddFailed => "Error adding product",
            Notice::RemoveFailed => "Error removing product",
            Notice::UpdateFailed => "Error changing product quantity",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Sink for user-facing notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the log. Useful headless.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        warn!(%notice, "User notice");
    }
}

/// Fans notices out to every subscribed UI component.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<Notice>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, notice: Notice) {
        // No subscribers is fine: nobody is looking.
        let _ = self.sender.send(notice);
    }
}
