//! Observable lifecycle events
//!
//! Events are explicit and typed; each has a stable name that appears in
//! the `event` field of its log line.

use std::fmt;

/// Observable events in the inventory service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration resolved
    ConfigLoaded,
    /// Listener bound, accepting requests
    Serving,
    /// Shutdown signal received
    ShutdownStart,
    /// Server stopped
    ShutdownComplete,

    // Store
    /// Document store connection established
    StoreConnected,

    // Writes
    /// Product stored
    ProductCreated,
    /// Product modified
    ProductUpdated,
    /// Product removed
    ProductDeleted,
}

impl Event {
    /// Returns the stable event name
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "INVENTORY_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::Serving => "INVENTORY_SERVING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::StoreConnected => "STORE_CONNECTED",
            Event::ProductCreated => "PRODUCT_CREATED",
            Event::ProductUpdated => "PRODUCT_UPDATED",
            Event::ProductDeleted => "PRODUCT_DELETED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_unique() {
        let events = [
            Event::BootStart,
            Event::ConfigLoaded,
            Event::Serving,
            Event::ShutdownStart,
            Event::ShutdownComplete,
            Event::StoreConnected,
            Event::ProductCreated,
            Event::ProductUpdated,
            Event::ProductDeleted,
        ];

        let mut names: Vec<&str> = events.iter().map(Event::as_str).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), events.len());
    }

    #[test]
    fn test_display_matches_name() {
        assert_eq!(Event::StoreConnected.to_string(), "STORE_CONNECTED");
    }
}
