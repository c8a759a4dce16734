//! Host detection: which package manager and init system govern this host
//!
//! Detection only checks for executables on the search path, tests for
//! marker files and reads small text files. Nothing is executed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::modules::error::ManagerError;
use crate::modules::interface::{InitSystemKind, PackageManagerKind};
use crate::modules::system::distro::{DistroFamily, OsRelease, FAMILY_MARKERS, OS_RELEASE_PATHS};

/// Package managers probed when nothing is known about the distribution,
/// in priority order. Auxiliary tools and low-level backends are never
/// candidates.
pub const PACKAGE_MANAGER_PRIORITY: &[PackageManagerKind] = &[
    PackageManagerKind::Apt,
    PackageManagerKind::AptGet,
    PackageManagerKind::Aptitude,
    PackageManagerKind::Dnf,
    PackageManagerKind::Yum,
    PackageManagerKind::Zypper,
    PackageManagerKind::Pacman,
    PackageManagerKind::Pamac,
    PackageManagerKind::Yay,
    PackageManagerKind::Trizen,
    PackageManagerKind::Apk,
    PackageManagerKind::Xbps,
    PackageManagerKind::Pkg,
    PackageManagerKind::PkgAdd,
    PackageManagerKind::Pkgin,
    PackageManagerKind::Slackpkg,
    PackageManagerKind::Qi,
    PackageManagerKind::Guix,
    PackageManagerKind::Homebrew,
    PackageManagerKind::Portage,
];

/// Evidence that an init system is running
#[derive(Debug, Clone, Copy)]
pub struct InitCandidate {
    pub kind: InitSystemKind,
    /// Command names PID 1 runs under
    pub pid1: &'static [&'static str],
    /// Directories or files only this init system creates
    pub markers: &'static [&'static str],
}

/// Probed in order; sysvinit's `/etc/init.d` also exists next to most other
/// init systems, so it comes last.
pub const INIT_CANDIDATES: &[InitCandidate] = &[
    InitCandidate {
        kind: InitSystemKind::Systemd,
        pid1: &["systemd"],
        markers: &["/run/systemd/system"],
    },
    InitCandidate {
        kind: InitSystemKind::OpenRc,
        pid1: &["openrc-init"],
        markers: &["/run/openrc", "/etc/init.d/openrc"],
    },
    InitCandidate {
        kind: InitSystemKind::Runit,
        pid1: &["runit", "runit-init"],
        markers: &["/run/runit", "/etc/runit"],
    },
    InitCandidate {
        kind: InitSystemKind::S6,
        pid1: &["s6-svscan"],
        markers: &["/run/s6", "/run/s6-rc", "/etc/s6"],
    },
    InitCandidate {
        kind: InitSystemKind::Dinit,
        pid1: &["dinit"],
        markers: &["/run/dinitctl", "/etc/dinit.d"],
    },
    InitCandidate {
        kind: InitSystemKind::Launchd,
        pid1: &["launchd"],
        markers: &["/System/Library/LaunchDaemons"],
    },
    InitCandidate {
        kind: InitSystemKind::Sysvinit,
        pid1: &[],
        markers: &["/etc/init.d"],
    },
];

/// Read-only view of the host used by detection
#[async_trait]
pub trait HostProbe: Send + Sync {
    async fn executable_exists(&self, name: &str) -> bool;
    async fn path_exists(&self, path: &Path) -> bool;
    async fn read_file(&self, path: &Path) -> Option<String>;

    /// Command name of PID 1 (`/proc/1/comm` on Linux)
    async fn pid1_comm(&self) -> Option<String> {
        self.read_file(Path::new("/proc/1/comm"))
            .await
            .map(|comm| comm.trim().to_string())
            .filter(|comm| !comm.is_empty())
    }
}

/// Probes the real host, optionally under another filesystem root
#[derive(Debug, Clone, Default)]
pub struct SystemProbe {
    root: Option<PathBuf>,
    search_path: Option<OsString>,
}

impl SystemProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve marker paths under `root` instead of `/`
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Search these directories instead of `$PATH`
    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) => root.join(path.strip_prefix("/").unwrap_or(path)),
            None => path.to_path_buf(),
        }
    }
}

#[async_trait]
impl HostProbe for SystemProbe {
    async fn executable_exists(&self, name: &str) -> bool {
        let search_path = self
            .search_path
            .clone()
            .or_else(|| std::env::var_os("PATH"));
        which::which_in(name, search_path, "/").is_ok()
    }

    async fn path_exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(self.resolve(path)).await.is_ok()
    }

    async fn read_file(&self, path: &Path) -> Option<String> {
        tokio::fs::read_to_string(self.resolve(path)).await.ok()
    }
}

/// Snapshot of what governs the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostProfile {
    pub package_manager: Option<PackageManagerKind>,
    pub init_system: Option<InitSystemKind>,
    /// os-release `ID`, when one was found
    pub distribution: Option<String>,
    pub family: Option<DistroFamily>,
}

impl HostProfile {
    pub fn new(
        package_manager: Option<PackageManagerKind>,
        init_system: Option<InitSystemKind>,
    ) -> Self {
        Self {
            package_manager,
            init_system,
            ..Self::default()
        }
    }

    pub fn require_package_manager(&self) -> Result<PackageManagerKind, ManagerError> {
        self.package_manager
            .ok_or(ManagerError::NoPackageManagerDetected)
    }

    pub fn require_init_system(&self) -> Result<InitSystemKind, ManagerError> {
        self.init_system.ok_or(ManagerError::NoInitSystemDetected)
    }
}

/// Builds a [`HostProfile`] from a [`HostProbe`]
#[derive(Clone)]
pub struct HostDetector {
    probe: Arc<dyn HostProbe>,
    package_manager: Option<PackageManagerKind>,
    init_system: Option<InitSystemKind>,
}

impl Default for HostDetector {
    fn default() -> Self {
        Self::new(Arc::new(SystemProbe::new()))
    }
}

impl HostDetector {
    pub fn new(probe: Arc<dyn HostProbe>) -> Self {
        Self {
            probe,
            package_manager: None,
            init_system: None,
        }
    }

    /// Pin the package manager; it is no longer probed
    pub fn with_package_manager(mut self, kind: Option<PackageManagerKind>) -> Self {
        self.package_manager = kind;
        self
    }

    /// Pin the init system; it is no longer probed
    pub fn with_init_system(mut self, kind: Option<InitSystemKind>) -> Self {
        self.init_system = kind;
        self
    }

    pub async fn detect(&self) -> HostProfile {
        let release = self.os_release().await;
        let distribution = release.as_ref().and_then(|r| r.id.clone());
        let family = match release.as_ref().and_then(DistroFamily::from_os_release) {
            Some(family) => Some(family),
            None => self.family_from_markers().await,
        };

        let package_manager = match self.package_manager {
            Some(kind) => Some(kind),
            None => self.detect_package_manager(family).await,
        };
        let init_system = match self.init_system {
            Some(kind) => Some(kind),
            None => self.detect_init_system().await,
        };

        let profile = HostProfile {
            package_manager,
            init_system,
            distribution,
            family,
        };

        tracing::info!(
            package_manager = ?profile.package_manager.map(|k| k.name()),
            init_system = ?profile.init_system.map(|k| k.name()),
            distribution = ?profile.distribution,
            family = ?profile.family.map(|f| f.name()),
            "Detected host profile"
        );

        profile
    }

    /// Base priority order with the family's own tools moved to the front
    pub fn package_manager_candidates(family: Option<DistroFamily>) -> Vec<PackageManagerKind> {
        let preferred = family
            .map(|f| f.preferred_package_managers())
            .unwrap_or(&[]);

        let mut candidates: Vec<PackageManagerKind> = PACKAGE_MANAGER_PRIORITY
            .iter()
            .copied()
            .filter(|kind| preferred.contains(kind))
            .collect();
        candidates.extend(
            PACKAGE_MANAGER_PRIORITY
                .iter()
                .copied()
                .filter(|kind| !preferred.contains(kind)),
        );
        candidates
    }

    async fn detect_package_manager(&self, family: Option<DistroFamily>) -> Option<PackageManagerKind> {
        for kind in Self::package_manager_candidates(family) {
            if self.probe.executable_exists(kind.program()).await {
                tracing::debug!("Found package manager executable {}", kind.program());
                return Some(kind);
            }
        }
        tracing::debug!("No package manager executable found");
        None
    }

    async fn detect_init_system(&self) -> Option<InitSystemKind> {
        let pid1 = self.probe.pid1_comm().await;

        if let Some(comm) = pid1.as_deref() {
            for candidate in INIT_CANDIDATES {
                if candidate.pid1.contains(&comm) && self.control_tool_exists(candidate).await {
                    tracing::debug!("PID 1 is {}, init system {}", comm, candidate.kind);
                    return Some(candidate.kind);
                }
            }
        }

        for candidate in INIT_CANDIDATES {
            for marker in candidate.markers {
                if self.probe.path_exists(Path::new(marker)).await
                    && self.control_tool_exists(candidate).await
                {
                    tracing::debug!("Found {} marker {}", candidate.kind, marker);
                    return Some(candidate.kind);
                }
            }
        }

        tracing::debug!("No init system marker matched");
        None
    }

    async fn control_tool_exists(&self, candidate: &InitCandidate) -> bool {
        self.probe.executable_exists(candidate.kind.program()).await
    }

    async fn os_release(&self) -> Option<OsRelease> {
        for path in OS_RELEASE_PATHS {
            if let Some(content) = self.probe.read_file(Path::new(path)).await {
                return Some(OsRelease::parse(&content));
            }
        }
        None
    }

    async fn family_from_markers(&self) -> Option<DistroFamily> {
        for (marker, family) in FAMILY_MARKERS {
            if self.probe.path_exists(Path::new(marker)).await {
                return Some(*family);
            }
        }
        None
    }
}
