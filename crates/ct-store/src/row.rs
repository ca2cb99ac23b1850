//! Plain data rows written by store backends.
//!
//! Rows hold only primitives and static labels so backends need nothing from
//! the model crates.

/// A transporter after a lifecycle change (depot assigned, arrived, departed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransporterRow {
    pub tick:           u64,
    pub unix_millis:    i64,
    pub transporter_id: u32,
    pub transport_type: &'static str,
    pub direction:      &'static str,
    pub stage:          &'static str,
    /// `None` before depot assignment and after departure.
    pub depot:          Option<u32>,
    pub containers:     u32,
}

/// A crane after it was allocated or released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraneRow {
    pub tick:        u64,
    pub unix_millis: i64,
    pub crane_kind:  &'static str,
    pub crane_id:    u16,
    pub side:        &'static str,
    pub occupied:    bool,
    /// Operation label of the CRANE message, if one was involved.
    pub operation:   Option<&'static str>,
    pub container:   Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageEvent {
    Stored,
    Retrieved,
}

impl StorageEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageEvent::Stored    => "stored",
            StorageEvent::Retrieved => "retrieved",
        }
    }
}

/// A container entering or leaving the yard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageRow {
    pub tick:        u64,
    pub unix_millis: i64,
    pub container:   u32,
    pub crane_id:    u16,
    pub side:        &'static str,
    pub event:       StorageEvent,
}
