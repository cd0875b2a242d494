//! Lifecycle events
//!
//! Every log record that marks a lifecycle step carries one of these
//! names in its `event` field, so operators can grep for them.

use std::fmt;

/// Observable events in the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & lifecycle
    /// Startup begins
    BootStart,
    /// Configuration loaded and validated
    ConfigLoaded,
    /// HTTP listener bound, ready for requests
    Serving,
    /// Shutdown signal received
    ShutdownStart,
    /// Shutdown complete
    ShutdownComplete,

    // Database
    /// Database file opened
    DatabaseOpened,
    /// Schema script executed
    SchemaApplied,
    /// Seed script executed on an empty database
    DatabaseSeeded,
    /// Connection closed
    DatabaseClosed,

    // Administrative operations
    /// Researcher salary raise applied
    BulkRaiseApplied,
    /// Visitors without enrollments or passes removed
    InactiveVisitorsPurged,

    // Escape hatch
    /// Raw statement executed
    RawQueryExecuted,
    /// Raw statement blocked by the prefix guard
    RawQueryRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "NPS_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::Serving => "NPS_SERVING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::DatabaseOpened => "DATABASE_OPENED",
            Event::SchemaApplied => "SCHEMA_APPLIED",
            Event::DatabaseSeeded => "DATABASE_SEEDED",
            Event::DatabaseClosed => "DATABASE_CLOSED",

            Event::BulkRaiseApplied => "BULK_RAISE_APPLIED",
            Event::InactiveVisitorsPurged => "INACTIVE_VISITORS_PURGED",

            Event::RawQueryExecuted => "RAW_QUERY_EXECUTED",
            Event::RawQueryRejected => "RAW_QUERY_REJECTED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
