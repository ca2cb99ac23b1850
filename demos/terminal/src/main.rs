//! terminal: runs the container-terminal controller against a live
//! visualization client.
//!
//! ```text
//! terminal [CONFIG.toml] [SCHEDULE.csv] [OUTPUT_DIR]
//! ```
//!
//! Defaults to the demo data shipped next to this crate and writes CSV
//! snapshots to `./output`.  The controller listens on `bind_addr`, waits for
//! one client, and runs until the client disconnects.  Log verbosity follows
//! `RUST_LOG` (default `info`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::prelude::*;

use ct_core::{TerminalConfig, Tick};
use ct_routing::DijkstraRouter;
use ct_schedule::load_containers_csv;
use ct_sim::{ControllerBuilder, ControllerObserver, TickStats};
use ct_store::CsvStore;
use ct_transport::TcpTransport;

// ── Constants ─────────────────────────────────────────────────────────────────

const CLIENT_WAIT:       Duration = Duration::from_secs(5);
const PROGRESS_EVERY:    u64      = 200; // ticks, about ten seconds at 50 ms
const DEFAULT_OUTPUT:    &str     = "output";

// ── Progress observer ─────────────────────────────────────────────────────────

#[derive(Default)]
struct Progress {
    spawned:  usize,
    departed: usize,
    acks:     usize,
    rejected: usize,
    misses:   usize,
}

impl ControllerObserver for Progress {
    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        self.spawned  += stats.spawned;
        self.departed += stats.departed;
        self.acks     += stats.acks;
        self.rejected += stats.rejected_acks;
        self.misses   += stats.allocation_misses;

        if tick.0 % PROGRESS_EVERY == 0 {
            info!(
                %tick,
                now = %stats.now,
                spawned = self.spawned,
                departed = self.departed,
                acks = self.acks,
                "progress"
            );
        }
    }

    fn on_stop(&mut self, final_tick: Tick) {
        info!(
            ticks = final_tick.0,
            spawned = self.spawned,
            departed = self.departed,
            acks = self.acks,
            rejected_acks = self.rejected,
            allocation_misses = self.misses,
            "run summary"
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let mut args = std::env::args().skip(1);
    let config_path   = args.next().map(PathBuf::from).unwrap_or_else(|| data.join("terminal.toml"));
    let schedule_path = args.next().map(PathBuf::from).unwrap_or_else(|| data.join("schedule.csv"));
    let output_dir    = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    // 1. Configuration and schedule.
    let config = TerminalConfig::load(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;
    let backlog = load_containers_csv(&schedule_path)
        .with_context(|| format!("loading schedule {}", schedule_path.display()))?;
    info!(
        containers = backlog.len(),
        first_arrival = ?backlog.next_arrival().map(|d| d.to_string()),
        agvs = config.agv_count,
        "terminal loaded"
    );

    // 2. Snapshot output.
    let store = CsvStore::new(&output_dir)
        .with_context(|| format!("creating output dir {}", output_dir.display()))?;

    // 3. Wait for the client.
    let transport = TcpTransport::bind(&config.bind_addr)?;
    info!(addr = %transport.local_addr(), "waiting for client");
    let client = loop {
        if let Some(addr) = transport.wait_for_client(CLIENT_WAIT) {
            break addr;
        }
        info!("still waiting for client");
    };
    info!(%client, "client connected");

    // 4. Run until the client goes away.
    let mut controller = ControllerBuilder::new(config, transport, DijkstraRouter, store)
        .backlog(backlog)
        .build()?;
    let mut progress = Progress::default();
    controller.run(&mut progress)?;

    info!(
        output = %output_dir.display(),
        stored = controller.model.storage.len(),
        store_errors = controller.store_errors(),
        "done"
    );
    Ok(())
}
