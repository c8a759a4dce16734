//! tum - one interface to every UNIX package manager and init system
//!
//! The crate detects which package manager and init system govern a host,
//! renders unified operations into each tool's own command line, runs it
//! and classifies the result into a tool-agnostic [`Outcome`].

pub mod cli;
pub mod modules;
pub mod runtime;

pub use modules::core::{CommandReport, CommandRunner, ExecutionResult, ExitState};
pub use modules::system::detection::{HostDetector, HostProbe, HostProfile, SystemProbe};
pub use modules::error::*;
pub use modules::interface::*;
pub use modules::registry::{Adapter, AdapterRegistry};
pub use runtime::{ManagerConfig, UnixManager};
