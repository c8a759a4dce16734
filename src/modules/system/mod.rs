//! Host-facing adapters and detection

pub mod detection;
pub mod distro;
pub mod package_managers;
pub mod service_managers;

pub use detection::{HostDetector, HostProbe, HostProfile, SystemProbe};
pub use distro::{DistroFamily, OsRelease};
pub use package_managers::PackageManager;
pub use service_managers::ServiceManager;
