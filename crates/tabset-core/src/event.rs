//! Event and message system for settings screens
//!
//! Tab buttons, key bindings and setting observers all talk to the
//! application coordinator through [`Message`] values. The
//! [`MessageBus`] fans messages out to any interested subscriber, for
//! example the loop that persists settings.

use crossterm::event::{KeyEvent, MouseEvent};
use tokio::sync::broadcast;

use crate::error::CoreError;

/// Messages exchanged between widgets, pages and the coordinator
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Message {
    // === Navigation ===
    /// Activate the page at this index
    SwitchTab(usize),
    /// Activate the page with this id slug
    SwitchTabById(String),
    /// Activate the next page (wraps)
    NextTab,
    /// Activate the previous page (wraps)
    PrevTab,

    // === Settings ===
    /// A bound setting committed a new value
    SettingsChanged {
        /// Name of the setting that changed
        setting: String,
    },
    /// The settings screen is being closed by the host
    Hide,

    // === Global ===
    /// Quit the application
    Quit,
    /// Toggle help display
    ToggleHelp,

    // === Input ===
    /// Keyboard input event
    Key(KeyEvent),
    /// Mouse input event
    Mouse(MouseEvent),
    /// Terminal resize event
    Resize(u16, u16),

    // === Batch ===
    /// Multiple messages to process in sequence
    Batch(Vec<Message>),

    /// No operation
    #[default]
    None,
}

impl Message {
    /// Creates a settings-changed notification for the named setting
    ///
    /// # Example
    ///
    /// ```
    /// use tabset_core::event::Message;
    ///
    /// let msg = Message::settings_changed("Cache size");
    /// assert!(matches!(msg, Message::SettingsChanged { .. }));
    /// ```
    pub fn settings_changed<S: Into<String>>(setting: S) -> Self {
        Message::SettingsChanged {
            setting: setting.into(),
        }
    }

    /// Returns true if this is a no-op message
    pub fn is_none(&self) -> bool {
        matches!(self, Message::None)
    }

    /// Flattens nested batch messages into a single level
    ///
    /// Nested `Message::Batch` values are expanded recursively and
    /// `Message::None` entries are dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use tabset_core::event::Message;
    ///
    /// let nested = Message::Batch(vec![
    ///     Message::Quit,
    ///     Message::Batch(vec![Message::NextTab, Message::None]),
    /// ]);
    /// assert_eq!(nested.flatten().len(), 2);
    /// ```
    pub fn flatten(self) -> Vec<Message> {
        match self {
            Message::Batch(msgs) => msgs.into_iter().flat_map(|m| m.flatten()).collect(),
            Message::None => vec![],
            other => vec![other],
        }
    }
}

/// Message bus for broadcasting messages to multiple subscribers
///
/// Backed by a tokio broadcast channel. Sending is fire-and-forget:
/// a setting observer publishes and returns immediately, and whoever
/// subscribed picks the message up on its own schedule.
///
/// # Example
///
/// ```
/// use tabset_core::event::{Message, MessageBus};
///
/// let bus = MessageBus::new(16);
/// let mut rx = bus.subscribe();
/// bus.send(Message::NextTab).expect("one subscriber");
/// assert_eq!(rx.try_recv().ok(), Some(Message::NextTab));
/// ```
#[derive(Debug)]
pub struct MessageBus {
    sender: broadcast::Sender<Message>,
}

impl MessageBus {
    /// Creates a new message bus buffering up to `capacity` messages
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        MessageBus { sender }
    }

    /// Subscribe to messages sent after this call
    pub fn subscribe(&self) -> broadcast::Receiver<Message> {
        self.sender.subscribe()
    }

    /// Send a message to all subscribers
    ///
    /// Returns the number of receivers that received the message.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::EventError` if there are no active subscribers.
    pub fn send(&self, msg: Message) -> Result<usize, CoreError> {
        self.sender
            .send(msg)
            .map_err(|e| CoreError::EventError(format!("failed to send message: {}", e)))
    }

    /// Returns the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        MessageBus::new(256)
    }
}

impl Clone for MessageBus {
    fn clone(&self) -> Self {
        MessageBus {
            sender: self.sender.clone(),
        }
    }
}
