//! Observability for inventory
//!
//! Structured logging through `tracing`. Lifecycle events carry a stable
//! name so log pipelines can match on them.
//!
//! # Usage
//!
//! ```ignore
//! use inventory::observability::{self, Event, LogFormat};
//!
//! observability::init(LogFormat::Json);
//! observability::log_event(Event::BootStart);
//! observability::log_event_with_fields(Event::ProductCreated, &[("id", "65a1...")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{init, LogFormat, DEFAULT_FILTER};

use std::fmt;

use tracing::info;

/// Renders `key=value` pairs in the order given
struct Fields<'a>(&'a [(&'a str, &'a str)]);

impl fmt::Display for Fields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    info!(event = event.as_str());
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    info!(event = event.as_str(), fields = %Fields(fields));
}
