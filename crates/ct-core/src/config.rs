//! Terminal configuration.
//!
//! Loaded from TOML by the application crate and handed to the controller
//! builder.  Every field has a default, so an empty file is a valid config:
//!
//! ```toml
//! epoch         = "2004-12-01 00:00"
//! initial_speed = 10.0
//! agv_count     = 60
//!
//! [depots]
//! road = 20
//! rail = 1
//! inland_water = 2
//! sea = 1
//!
//! [cranes]
//! storage = 12
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{CraneKind, CtError, CtResult, SimDate, TransportType};

/// 2004-12-01 00:00:00 UTC.
const DEFAULT_EPOCH_MS: i64 = 1_101_859_200_000;

// ── Per-type tables ───────────────────────────────────────────────────────────

/// One value per [`TransportType`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerTransport<T> {
    pub road:         T,
    pub rail:         T,
    pub inland_water: T,
    pub sea:          T,
}

impl<T: Copy> PerTransport<T> {
    #[inline]
    pub fn get(&self, t: TransportType) -> T {
        match t {
            TransportType::Road        => self.road,
            TransportType::Rail        => self.rail,
            TransportType::InlandWater => self.inland_water,
            TransportType::Sea         => self.sea,
        }
    }
}

/// Number of cranes of each kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CranePoolSizes {
    pub truck:          u16,
    pub train:          u16,
    pub docking_inland: u16,
    pub docking_sea:    u16,
    pub storage:        u16,
}

impl CranePoolSizes {
    #[inline]
    pub fn get(&self, kind: CraneKind) -> u16 {
        match kind {
            CraneKind::TruckCrane         => self.truck,
            CraneKind::TrainCrane         => self.train,
            CraneKind::DockingCraneInland => self.docking_inland,
            CraneKind::DockingCraneSea    => self.docking_sea,
            CraneKind::StorageCrane       => self.storage,
        }
    }
}

impl Default for CranePoolSizes {
    fn default() -> Self {
        Self { truck: 20, train: 4, docking_inland: 8, docking_sea: 10, storage: 12 }
    }
}

fn default_depots() -> PerTransport<u16> {
    PerTransport { road: 20, rail: 1, inland_water: 2, sea: 1 }
}

fn default_pickup_capacity() -> PerTransport<u16> {
    PerTransport { road: 1, rail: 30, inland_water: 60, sea: 200 }
}

// ── TerminalConfig ────────────────────────────────────────────────────────────

/// Top-level controller configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Simulated date at which the run starts.
    pub epoch: SimDate,

    /// Speed multiplier announced to the client at startup.
    pub initial_speed: f32,

    /// Wall-clock length of one controller tick.
    pub tick_interval_ms: u64,

    /// Simulated time between two spawn passes.
    pub spawn_interval_ms: i64,

    /// Simulated time between two SPEED re-announcements.
    pub speed_announce_interval_ms: i64,

    /// Minimum ticks between two AGV dispatches for the same transporter.
    /// Road transporters are not paced.
    pub dispatch_interval_ticks: u64,

    /// Depot slots per transport type.
    #[serde(default = "default_depots")]
    pub depots: PerTransport<u16>,

    /// Crane pool sizes per kind.
    pub cranes: CranePoolSizes,

    /// Size of the AGV pool.
    pub agv_count: u16,

    /// Maximum containers one pickup transporter collects from storage.
    #[serde(default = "default_pickup_capacity")]
    pub pickup_capacity: PerTransport<u16>,

    /// Address the TCP transport listens on.
    pub bind_addr: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            epoch:                      SimDate::from_unix_millis(DEFAULT_EPOCH_MS),
            initial_speed:              1.0,
            tick_interval_ms:           50,
            spawn_interval_ms:          1_000,
            speed_announce_interval_ms: 10_000,
            dispatch_interval_ticks:    4,
            depots:                     default_depots(),
            cranes:                     CranePoolSizes::default(),
            agv_count:                  143,
            pickup_capacity:            default_pickup_capacity(),
            bind_addr:                  "127.0.0.1:6666".to_owned(),
        }
    }
}

impl TerminalConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> CtResult<Self> {
        let config: TerminalConfig =
            toml::from_str(s).map_err(|e| CtError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> CtResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject configurations the controller cannot run with.
    pub fn validate(&self) -> CtResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(CtError::Config("tick_interval_ms must be positive".into()));
        }
        if !self.initial_speed.is_finite() || self.initial_speed < 0.0 {
            return Err(CtError::Config(format!(
                "initial_speed must be a non-negative number, got {}",
                self.initial_speed
            )));
        }
        if self.spawn_interval_ms < 0 || self.speed_announce_interval_ms < 0 {
            return Err(CtError::Config("intervals must not be negative".into()));
        }
        if self.agv_count == 0 {
            return Err(CtError::Config("agv_count must be at least 1".into()));
        }
        for t in TransportType::ALL {
            if self.depots.get(t) == 0 {
                return Err(CtError::Config(format!("no depots configured for {t}")));
            }
            if self.pickup_capacity.get(t) == 0 {
                return Err(CtError::Config(format!("pickup_capacity for {t} must be positive")));
            }
        }
        for kind in CraneKind::ALL {
            if self.cranes.get(kind) == 0 {
                return Err(CtError::Config(format!("no cranes configured for {kind}")));
            }
        }
        Ok(())
    }

    /// Wall-clock tick length as a `Duration`.
    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
