use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::time::Duration;

/// Command-line configuration. Every flag can also be set through an `AOSEARCH_*` variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "aosearch", version, about = "Tag-document search and ingestion queue node")]
pub struct Cli {
    /// Address the HTTP server listens on.
    #[arg(long, env = "AOSEARCH_BIND", default_value = "127.0.0.1:7000")]
    pub bind: SocketAddr,

    /// Which services this node runs.
    #[arg(long, env = "AOSEARCH_ROLE", value_enum, default_value_t = Role::All)]
    pub role: Role,

    /// Initial forwarding target of the queue (`local` or an indexing node URL such as
    /// `http://127.0.0.1:7000/index`). Can be changed later with `Set_target_process`.
    #[arg(long, env = "AOSEARCH_TARGET")]
    pub target: Option<String>,

    /// Default number of items forwarded per `Process_queue` call.
    #[arg(long, env = "AOSEARCH_BATCH_SIZE", default_value_t = 25)]
    pub batch_size: usize,

    /// Upper bound on the wait for one forwarded document.
    #[arg(long, env = "AOSEARCH_FORWARD_TIMEOUT_MS", default_value_t = 5_000)]
    pub forward_timeout_ms: u64,

    /// Drain the queue periodically every N milliseconds (0 disables).
    #[arg(long, env = "AOSEARCH_PROCESS_INTERVAL_MS", default_value_t = 0)]
    pub process_interval_ms: u64,

    /// Capacity of each service mailbox.
    #[arg(long, env = "AOSEARCH_MAILBOX_CAPACITY", default_value_t = 1_024)]
    pub mailbox_capacity: usize,

    /// `Get_queue_items` limit used when the caller sends none.
    #[arg(long, env = "AOSEARCH_ITEMS_LIMIT", default_value_t = 10)]
    pub items_limit: usize,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, env = "AOSEARCH_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Role {
    /// Indexing/query service only.
    Index,
    /// Ingestion queue service only.
    Queue,
    /// Both services in one process; the queue can target the indexer as `local`.
    All,
}

impl Role {
    pub fn runs_index(self) -> bool {
        matches!(self, Role::Index | Role::All)
    }

    pub fn runs_queue(self) -> bool {
        matches!(self, Role::Queue | Role::All)
    }
}

/// Settings handed to the service constructors.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub batch_size: usize,
    pub forward_timeout: Duration,
    pub process_interval: Option<Duration>,
    pub mailbox_capacity: usize,
    pub items_limit: usize,
    pub initial_target: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            batch_size: 25,
            forward_timeout: Duration::from_millis(5_000),
            process_interval: None,
            mailbox_capacity: 1_024,
            items_limit: 10,
            initial_target: None,
        }
    }
}

impl Cli {
    pub fn service_config(&self) -> anyhow::Result<ServiceConfig> {
        anyhow::ensure!(self.batch_size > 0, "--batch-size must be positive");
        anyhow::ensure!(self.forward_timeout_ms > 0, "--forward-timeout-ms must be positive");
        anyhow::ensure!(self.mailbox_capacity > 0, "--mailbox-capacity must be positive");
        anyhow::ensure!(self.items_limit > 0, "--items-limit must be positive");

        Ok(ServiceConfig {
            batch_size: self.batch_size,
            forward_timeout: Duration::from_millis(self.forward_timeout_ms),
            process_interval: (self.process_interval_ms > 0)
                .then(|| Duration::from_millis(self.process_interval_ms)),
            mailbox_capacity: self.mailbox_capacity,
            items_limit: self.items_limit,
            initial_target: self
                .target
                .as_deref()
                .map(str::trim)
                .filter(|target| !target.is_empty())
                .map(str::to_string),
        })
    }
}
