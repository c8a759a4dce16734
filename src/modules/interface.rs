//! Unified operation, tool identity and outcome types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::modules::core::command::ExitState;
use crate::modules::error::ManagerError;

/// Unified package action, independent of the tool that performs it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackageOperation {
    Install,
    Remove,
    Purge,
    Update,
    Upgrade,
    Query,
    List,
}

impl PackageOperation {
    pub const ALL: [PackageOperation; 7] = [
        PackageOperation::Install,
        PackageOperation::Remove,
        PackageOperation::Purge,
        PackageOperation::Update,
        PackageOperation::Upgrade,
        PackageOperation::Query,
        PackageOperation::List,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageOperation::Install => "install",
            PackageOperation::Remove => "remove",
            PackageOperation::Purge => "purge",
            PackageOperation::Update => "update",
            PackageOperation::Upgrade => "upgrade",
            PackageOperation::Query => "query",
            PackageOperation::List => "list",
        }
    }
}

impl fmt::Display for PackageOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified service action, independent of the init system that performs it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceOperation {
    Status,
    Start,
    Stop,
    Restart,
    Reload,
    Enable,
    Disable,
    IsEnabled,
}

impl ServiceOperation {
    pub const ALL: [ServiceOperation; 8] = [
        ServiceOperation::Status,
        ServiceOperation::Start,
        ServiceOperation::Stop,
        ServiceOperation::Restart,
        ServiceOperation::Reload,
        ServiceOperation::Enable,
        ServiceOperation::Disable,
        ServiceOperation::IsEnabled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceOperation::Status => "status",
            ServiceOperation::Start => "start",
            ServiceOperation::Stop => "stop",
            ServiceOperation::Restart => "restart",
            ServiceOperation::Reload => "reload",
            ServiceOperation::Enable => "enable",
            ServiceOperation::Disable => "disable",
            ServiceOperation::IsEnabled => "is-enabled",
        }
    }
}

impl fmt::Display for ServiceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceOperation {
    type Err = ManagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceOperation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| ManagerError::UnknownOperation {
                name: s.to_string(),
            })
    }
}

/// Any unified operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operation {
    Package(PackageOperation),
    Service(ServiceOperation),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Package(op) => write!(f, "{op}"),
            Operation::Service(op) => write!(f, "{op}"),
        }
    }
}

impl From<PackageOperation> for Operation {
    fn from(op: PackageOperation) -> Self {
        Operation::Package(op)
    }
}

impl From<ServiceOperation> for Operation {
    fn from(op: ServiceOperation) -> Self {
        Operation::Service(op)
    }
}

/// Package managers known to the unified surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PackageManagerKind {
    Apt,
    AptGet,
    AptCache,
    AptCdrom,
    AptConfig,
    AptExtracttemplates,
    AptListchanges,
    AptMark,
    AptSortpkgs,
    Aptitude,
    AptitudeCreateStateBundle,
    AptitudeRunStateBundle,
    Apk,
    Dnf,
    Dpkg,
    Guix,
    Homebrew,
    Pkg,
    Pkgin,
    PkgAdd,
    PkgDelete,
    PkgCreate,
    PkgInfo,
    Pacman,
    Yay,
    Pamac,
    Trizen,
    Portage,
    Qi,
    Slackpkg,
    Xbps,
    Yum,
    Zypper,
    ZypperLog,
}

impl PackageManagerKind {
    pub const ALL: [PackageManagerKind; 34] = [
        PackageManagerKind::Apt,
        PackageManagerKind::AptGet,
        PackageManagerKind::AptCache,
        PackageManagerKind::AptCdrom,
        PackageManagerKind::AptConfig,
        PackageManagerKind::AptExtracttemplates,
        PackageManagerKind::AptListchanges,
        PackageManagerKind::AptMark,
        PackageManagerKind::AptSortpkgs,
        PackageManagerKind::Aptitude,
        PackageManagerKind::AptitudeCreateStateBundle,
        PackageManagerKind::AptitudeRunStateBundle,
        PackageManagerKind::Apk,
        PackageManagerKind::Dnf,
        PackageManagerKind::Dpkg,
        PackageManagerKind::Guix,
        PackageManagerKind::Homebrew,
        PackageManagerKind::Pkg,
        PackageManagerKind::Pkgin,
        PackageManagerKind::PkgAdd,
        PackageManagerKind::PkgDelete,
        PackageManagerKind::PkgCreate,
        PackageManagerKind::PkgInfo,
        PackageManagerKind::Pacman,
        PackageManagerKind::Yay,
        PackageManagerKind::Pamac,
        PackageManagerKind::Trizen,
        PackageManagerKind::Portage,
        PackageManagerKind::Qi,
        PackageManagerKind::Slackpkg,
        PackageManagerKind::Xbps,
        PackageManagerKind::Yum,
        PackageManagerKind::Zypper,
        PackageManagerKind::ZypperLog,
    ];

    /// Canonical name, as scripts and configuration spell it
    pub fn name(&self) -> &'static str {
        match self {
            PackageManagerKind::Apt => "apt",
            PackageManagerKind::AptGet => "apt-get",
            PackageManagerKind::AptCache => "apt-cache",
            PackageManagerKind::AptCdrom => "apt-cdrom",
            PackageManagerKind::AptConfig => "apt-config",
            PackageManagerKind::AptExtracttemplates => "apt-extracttemplates",
            PackageManagerKind::AptListchanges => "apt-listchanges",
            PackageManagerKind::AptMark => "apt-mark",
            PackageManagerKind::AptSortpkgs => "apt-sortpkgs",
            PackageManagerKind::Aptitude => "aptitude",
            PackageManagerKind::AptitudeCreateStateBundle => "aptitude-create-state-bundle",
            PackageManagerKind::AptitudeRunStateBundle => "aptitude-run-state-bundle",
            PackageManagerKind::Apk => "apk",
            PackageManagerKind::Dnf => "dnf",
            PackageManagerKind::Dpkg => "dpkg",
            PackageManagerKind::Guix => "guix",
            PackageManagerKind::Homebrew => "homebrew",
            PackageManagerKind::Pkg => "pkg",
            PackageManagerKind::Pkgin => "pkgin",
            PackageManagerKind::PkgAdd => "pkg_add",
            PackageManagerKind::PkgDelete => "pkg_delete",
            PackageManagerKind::PkgCreate => "pkg_create",
            PackageManagerKind::PkgInfo => "pkg_info",
            PackageManagerKind::Pacman => "pacman",
            PackageManagerKind::Yay => "yay",
            PackageManagerKind::Pamac => "pamac",
            PackageManagerKind::Trizen => "trizen",
            PackageManagerKind::Portage => "portage",
            PackageManagerKind::Qi => "qi",
            PackageManagerKind::Slackpkg => "slackpkg",
            PackageManagerKind::Xbps => "xbps",
            PackageManagerKind::Yum => "yum",
            PackageManagerKind::Zypper => "zypper",
            PackageManagerKind::ZypperLog => "zypper-log",
        }
    }

    /// Executables this tool is invoked through; the first is the primary one
    pub fn invocation_names(&self) -> &'static [&'static str] {
        match self {
            PackageManagerKind::Homebrew => &["brew"],
            PackageManagerKind::Portage => &["emerge"],
            PackageManagerKind::Xbps => &["xbps-install", "xbps-remove", "xbps-query"],
            PackageManagerKind::PkgAdd => &["pkg_add", "pkg_delete", "pkg_info"],
            PackageManagerKind::Apt => &["apt"],
            PackageManagerKind::AptGet => &["apt-get"],
            PackageManagerKind::AptCache => &["apt-cache"],
            PackageManagerKind::AptCdrom => &["apt-cdrom"],
            PackageManagerKind::AptConfig => &["apt-config"],
            PackageManagerKind::AptExtracttemplates => &["apt-extracttemplates"],
            PackageManagerKind::AptListchanges => &["apt-listchanges"],
            PackageManagerKind::AptMark => &["apt-mark"],
            PackageManagerKind::AptSortpkgs => &["apt-sortpkgs"],
            PackageManagerKind::Aptitude => &["aptitude"],
            PackageManagerKind::AptitudeCreateStateBundle => &["aptitude-create-state-bundle"],
            PackageManagerKind::AptitudeRunStateBundle => &["aptitude-run-state-bundle"],
            PackageManagerKind::Apk => &["apk"],
            PackageManagerKind::Dnf => &["dnf"],
            PackageManagerKind::Dpkg => &["dpkg"],
            PackageManagerKind::Guix => &["guix"],
            PackageManagerKind::Pkg => &["pkg"],
            PackageManagerKind::Pkgin => &["pkgin"],
            PackageManagerKind::PkgDelete => &["pkg_delete"],
            PackageManagerKind::PkgCreate => &["pkg_create"],
            PackageManagerKind::PkgInfo => &["pkg_info"],
            PackageManagerKind::Pacman => &["pacman"],
            PackageManagerKind::Yay => &["yay"],
            PackageManagerKind::Pamac => &["pamac"],
            PackageManagerKind::Trizen => &["trizen"],
            PackageManagerKind::Qi => &["qi"],
            PackageManagerKind::Slackpkg => &["slackpkg"],
            PackageManagerKind::Yum => &["yum"],
            PackageManagerKind::Zypper => &["zypper"],
            PackageManagerKind::ZypperLog => &["zypper-log"],
        }
    }

    pub fn program(&self) -> &'static str {
        self.invocation_names()[0]
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PackageManagerKind {
    type Err = ManagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let alias = match wanted.as_str() {
            "brew" => Some(PackageManagerKind::Homebrew),
            "emerge" => Some(PackageManagerKind::Portage),
            "xbps-install" | "xbps-remove" | "xbps-query" => Some(PackageManagerKind::Xbps),
            _ => None,
        };

        alias
            .or_else(|| {
                PackageManagerKind::ALL
                    .into_iter()
                    .find(|kind| kind.name() == wanted)
            })
            .ok_or_else(|| ManagerError::UnknownTool { name: s.to_string() })
    }
}

impl TryFrom<String> for PackageManagerKind {
    type Error = ManagerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PackageManagerKind> for String {
    fn from(kind: PackageManagerKind) -> Self {
        kind.name().to_string()
    }
}

/// Init systems known to the unified surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InitSystemKind {
    Sysvinit,
    OpenRc,
    S6,
    Runit,
    Systemd,
    Dinit,
    Launchd,
}

impl InitSystemKind {
    pub const ALL: [InitSystemKind; 7] = [
        InitSystemKind::Sysvinit,
        InitSystemKind::OpenRc,
        InitSystemKind::S6,
        InitSystemKind::Runit,
        InitSystemKind::Systemd,
        InitSystemKind::Dinit,
        InitSystemKind::Launchd,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InitSystemKind::Sysvinit => "sysvinit",
            InitSystemKind::OpenRc => "openrc",
            InitSystemKind::S6 => "s6",
            InitSystemKind::Runit => "runit",
            InitSystemKind::Systemd => "systemd",
            InitSystemKind::Dinit => "dinit",
            InitSystemKind::Launchd => "launchd",
        }
    }

    /// Control executables; the first one is probed during detection
    pub fn invocation_names(&self) -> &'static [&'static str] {
        match self {
            InitSystemKind::Sysvinit => &["service", "update-rc.d"],
            InitSystemKind::OpenRc => &["rc-service", "rc-update"],
            InitSystemKind::S6 => &["s6-rc"],
            InitSystemKind::Runit => &["sv"],
            InitSystemKind::Systemd => &["systemctl"],
            InitSystemKind::Dinit => &["dinitctl"],
            InitSystemKind::Launchd => &["launchctl"],
        }
    }

    pub fn program(&self) -> &'static str {
        self.invocation_names()[0]
    }
}

impl fmt::Display for InitSystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InitSystemKind {
    type Err = ManagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        match wanted.as_str() {
            "sysv" | "init" => return Ok(InitSystemKind::Sysvinit),
            "s6-rc" => return Ok(InitSystemKind::S6),
            "sv" => return Ok(InitSystemKind::Runit),
            _ => {}
        }

        InitSystemKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| ManagerError::UnknownTool { name: s.to_string() })
    }
}

impl TryFrom<String> for InitSystemKind {
    type Error = ManagerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InitSystemKind> for String {
    fn from(kind: InitSystemKind) -> Self {
        kind.name().to_string()
    }
}

/// One concrete package manager or init system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolIdentity {
    PackageManager(PackageManagerKind),
    InitSystem(InitSystemKind),
}

impl ToolIdentity {
    pub fn name(&self) -> &'static str {
        match self {
            ToolIdentity::PackageManager(kind) => kind.name(),
            ToolIdentity::InitSystem(kind) => kind.name(),
        }
    }

    pub fn invocation_names(&self) -> &'static [&'static str] {
        match self {
            ToolIdentity::PackageManager(kind) => kind.invocation_names(),
            ToolIdentity::InitSystem(kind) => kind.invocation_names(),
        }
    }

    pub fn program(&self) -> &'static str {
        self.invocation_names()[0]
    }

    /// Resolve an executable name such as `systemctl` or `xbps-remove` to the
    /// tool it belongs to. A tool whose primary executable matches wins over a
    /// family that merely reaches the same binary.
    pub fn from_invocation_name(program: &str) -> Option<(ToolIdentity, &'static str)> {
        let tools = || {
            PackageManagerKind::ALL
                .into_iter()
                .map(ToolIdentity::from)
                .chain(InitSystemKind::ALL.into_iter().map(ToolIdentity::from))
        };

        tools()
            .find(|tool| tool.program() == program)
            .map(|tool| (tool, tool.program()))
            .or_else(|| {
                tools().find_map(|tool| {
                    tool.invocation_names()
                        .iter()
                        .find(|name| **name == program)
                        .map(|name| (tool, *name))
                })
            })
    }
}

impl fmt::Display for ToolIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolIdentity {
    type Err = ManagerError;

    /// Package managers win on ambiguity; no name is shared today
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<PackageManagerKind>()
            .map(ToolIdentity::PackageManager)
            .or_else(|_| s.parse::<InitSystemKind>().map(ToolIdentity::InitSystem))
    }
}

impl From<PackageManagerKind> for ToolIdentity {
    fn from(kind: PackageManagerKind) -> Self {
        ToolIdentity::PackageManager(kind)
    }
}

impl From<InitSystemKind> for ToolIdentity {
    fn from(kind: InitSystemKind) -> Self {
        ToolIdentity::InitSystem(kind)
    }
}

/// Optional per-call flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    /// Add the tool's non-interactive switch (`-y`, `--noconfirm`, ...)
    #[serde(default = "default_assume_yes")]
    pub assume_yes: bool,
    /// Extra arguments, passed as discrete arguments right before the target
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_assume_yes() -> bool {
    true
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            assume_yes: true,
            extra_args: Vec::new(),
        }
    }
}

impl Flags {
    pub fn interactive() -> Self {
        Self {
            assume_yes: false,
            ..Self::default()
        }
    }

    pub fn with_extra_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }
}

/// Raw detail kept on every unsuccessful outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetail {
    pub tool: ToolIdentity,
    pub argv: Vec<String>,
    /// `None` when the process never started
    pub exit: Option<ExitState>,
    pub stdout: String,
    pub stderr: String,
    /// Pattern or runner message that decided the classification
    pub reason: Option<String>,
}

impl fmt::Display for FailureDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.exit {
            Some(exit) => write!(f, "{} ({exit})", shell_words::join(&self.argv))?,
            None => write!(f, "{} (not started)", shell_words::join(&self.argv))?,
        }
        if let Some(reason) = &self.reason {
            write!(f, ": {reason}")?;
        }
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            write!(f, "\n{stderr}")?;
        }
        Ok(())
    }
}

/// Tool-agnostic result of one unified operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum Outcome {
    Success,
    AlreadySatisfied,
    NotFound(FailureDetail),
    PermissionDenied(FailureDetail),
    ToolError(FailureDetail),
    RunnerFailure(FailureDetail),
    RunnerTimeout(FailureDetail),
}

impl Outcome {
    /// Success and AlreadySatisfied both leave the host in the requested state
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Outcome::Success | Outcome::AlreadySatisfied)
    }

    pub fn detail(&self) -> Option<&FailureDetail> {
        match self {
            Outcome::Success | Outcome::AlreadySatisfied => None,
            Outcome::NotFound(detail)
            | Outcome::PermissionDenied(detail)
            | Outcome::ToolError(detail)
            | Outcome::RunnerFailure(detail)
            | Outcome::RunnerTimeout(detail) => Some(detail),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::AlreadySatisfied => "already_satisfied",
            Outcome::NotFound(_) => "not_found",
            Outcome::PermissionDenied(_) => "permission_denied",
            Outcome::ToolError(_) => "tool_error",
            Outcome::RunnerFailure(_) => "runner_failure",
            Outcome::RunnerTimeout(_) => "runner_timeout",
        }
    }

    /// Strict mode: only satisfied outcomes stay values
    pub fn into_strict(self) -> Result<Outcome, ManagerError> {
        match self {
            Outcome::Success | Outcome::AlreadySatisfied => Ok(self),
            Outcome::NotFound(detail) => Err(ManagerError::NotFound(Box::new(detail))),
            Outcome::PermissionDenied(detail) => {
                Err(ManagerError::PermissionDenied(Box::new(detail)))
            }
            Outcome::ToolError(detail) => Err(ManagerError::ToolError(Box::new(detail))),
            Outcome::RunnerFailure(detail) => Err(ManagerError::RunnerFailure(Box::new(detail))),
            Outcome::RunnerTimeout(detail) => Err(ManagerError::RunnerTimeout(Box::new(detail))),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.detail() {
            Some(detail) => write!(f, "{}: {}", self.label(), detail),
            None => f.write_str(self.label()),
        }
    }
}
