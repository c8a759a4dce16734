use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::modules::error::ManagerError;
use crate::modules::interface::ServiceOperation;
use crate::runtime::config::ManagerConfig;

/// One command line for every UNIX package manager and init system
#[derive(Parser, Debug)]
#[command(name = "tum")]
#[command(about = "Drive the host's package manager and init system through one interface")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct TumCli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to $TUM_CONFIG, then ~/.config/tum/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Kill the native tool after this many seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Treat every outcome except success and already-satisfied as an error
    #[arg(long, global = true)]
    pub strict: bool,

    /// Print the native command line instead of running it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl TumCli {
    /// Discover the configuration file and apply command-line overrides
    pub async fn load_config(&self) -> Result<ManagerConfig, ManagerError> {
        let mut config = ManagerConfig::discover(self.config.as_deref()).await?;
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Some(Duration::from_secs(secs)));
        }
        if self.strict {
            config = config.with_strict(true);
        }
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install packages
    Install {
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// Remove packages, keeping configuration
    Remove {
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// Remove packages together with their configuration
    Purge {
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// Show package details
    Query {
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// Refresh package indexes
    Update,
    /// Upgrade all packages, or only the named ones
    Upgrade { packages: Vec<String> },
    /// List installed packages
    List,
    /// Control a service through the host's init system
    Service {
        /// status, start, stop, restart, reload, enable, disable or is-enabled
        action: ServiceOperation,
        name: String,
    },
    /// Show the detected package manager and init system
    Detect,
    /// Run a tool's own subcommand, e.g. `tum native apt-mark -- hold curl`
    Native {
        tool: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}
