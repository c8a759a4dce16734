//! Distribution families and os-release parsing

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::modules::interface::PackageManagerKind;

/// Lineage of a distribution; decides which package managers are probed first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistroFamily {
    Debian,
    Arch,
    Alpine,
    Gentoo,
    Void,
    Dragora,
    Slackware,
    RedHat,
    OpenSuse,
    Guix,
    FreeBsd,
    OpenBsd,
    NetBsd,
    SolarisIllumos,
    MacOs,
}

impl DistroFamily {
    pub const ALL: [DistroFamily; 15] = [
        DistroFamily::Debian,
        DistroFamily::Arch,
        DistroFamily::Alpine,
        DistroFamily::Gentoo,
        DistroFamily::Void,
        DistroFamily::Dragora,
        DistroFamily::Slackware,
        DistroFamily::RedHat,
        DistroFamily::OpenSuse,
        DistroFamily::Guix,
        DistroFamily::FreeBsd,
        DistroFamily::OpenBsd,
        DistroFamily::NetBsd,
        DistroFamily::SolarisIllumos,
        DistroFamily::MacOs,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DistroFamily::Debian => "debian",
            DistroFamily::Arch => "arch",
            DistroFamily::Alpine => "alpine",
            DistroFamily::Gentoo => "gentoo",
            DistroFamily::Void => "void",
            DistroFamily::Dragora => "dragora",
            DistroFamily::Slackware => "slackware",
            DistroFamily::RedHat => "red-hat",
            DistroFamily::OpenSuse => "open-suse",
            DistroFamily::Guix => "guix",
            DistroFamily::FreeBsd => "free-bsd",
            DistroFamily::OpenBsd => "open-bsd",
            DistroFamily::NetBsd => "net-bsd",
            DistroFamily::SolarisIllumos => "solaris-illumos",
            DistroFamily::MacOs => "mac-os",
        }
    }

    /// Distribution ids known to belong to this family
    pub fn members(&self) -> &'static [&'static str] {
        match self {
            DistroFamily::Debian => &[
                "debian", "ubuntu", "xubuntu", "kubuntu", "lubuntu", "linuxmint", "lmde",
                "trisquel", "devuan", "kali", "parrot", "parrotos", "pop", "popos",
                "elementary", "elementaryos", "mx", "antix", "pureos", "deepin", "zorin",
                "zorinos", "peppermint", "astra", "tails", "raspbian", "armbian", "mobian",
                "grml", "proxmox", "openmediavault", "vyos", "steamos", "sparky", "bodhi",
                "q4os", "siduction", "knoppix", "neon", "ubuntukylin", "ubuntustudio",
                "ubuntumate", "edubuntu", "whonix", "caine", "emmabuntus", "linuxlite",
            ],
            DistroFamily::Arch => &[
                "arch", "archlinux", "artix", "manjaro", "endeavouros", "garuda", "parabola",
                "hyperbola", "archbang", "blackarch", "archlabs", "archcraft", "arcolinux",
                "cachyos", "crystallinux", "rebornos", "chimeraos", "instantos", "kaos",
                "obarun", "steamos3", "antergos",
            ],
            DistroFamily::Alpine => &["alpine", "postmarketos", "postmarket"],
            DistroFamily::Gentoo => &[
                "gentoo", "pentoo", "funtoo", "calculate", "sabayon", "redcorelinux",
                "chromeos", "chromiumos", "flatcar", "coreos", "systemrescue",
            ],
            DistroFamily::Void => &["void", "argon", "projecttrident"],
            DistroFamily::Dragora => &["dragora"],
            DistroFamily::Slackware => &[
                "slackware", "salix", "slackel", "porteus", "slax", "zenwalk", "absolute",
                "wifislax", "plamo", "vector",
            ],
            DistroFamily::RedHat => &[
                "rhel", "redhat", "fedora", "rocky", "centos", "almalinux", "ol",
                "oraclelinux", "amzn", "circle", "clearos", "euleros", "nobara",
                "scientific", "springdale", "nethserver", "qubes", "korora", "mageia",
            ],
            DistroFamily::OpenSuse => &[
                "opensuse", "opensuse-leap", "opensuse-tumbleweed", "opensuse-microos",
                "suse", "sles", "sled", "sle", "geckolinux", "linuxkamarada",
            ],
            DistroFamily::Guix => &["guix"],
            DistroFamily::FreeBsd => &[
                "freebsd", "midnightbsd", "ghostbsd", "dragonfly", "dragonflybsd",
                "hardenedbsd", "truenas", "freenas", "nomadbsd", "opnsense", "pfsense",
                "helloSystem", "ravynos",
            ],
            DistroFamily::OpenBsd => &["openbsd", "libertybsd", "fuguita", "bitrig"],
            DistroFamily::NetBsd => &["netbsd", "edgebsd", "smolbsd"],
            DistroFamily::SolarisIllumos => &[
                "solaris", "illumos", "opensolaris", "openindiana", "omnios", "tribblix",
                "smartos", "nexenta",
            ],
            DistroFamily::MacOs => &["macos", "darwin"],
        }
    }

    /// Package managers native to this family, most preferred first
    pub fn preferred_package_managers(&self) -> &'static [PackageManagerKind] {
        match self {
            DistroFamily::Debian => &[
                PackageManagerKind::Apt,
                PackageManagerKind::AptGet,
                PackageManagerKind::Aptitude,
            ],
            DistroFamily::Arch => &[
                PackageManagerKind::Pacman,
                PackageManagerKind::Pamac,
                PackageManagerKind::Yay,
                PackageManagerKind::Trizen,
            ],
            DistroFamily::Alpine => &[PackageManagerKind::Apk],
            DistroFamily::Gentoo => &[PackageManagerKind::Portage],
            DistroFamily::Void => &[PackageManagerKind::Xbps],
            DistroFamily::Dragora => &[PackageManagerKind::Qi],
            DistroFamily::Slackware => &[PackageManagerKind::Slackpkg],
            DistroFamily::RedHat => &[PackageManagerKind::Dnf, PackageManagerKind::Yum],
            DistroFamily::OpenSuse => &[PackageManagerKind::Zypper],
            DistroFamily::Guix => &[PackageManagerKind::Guix],
            DistroFamily::FreeBsd => &[PackageManagerKind::Pkg],
            DistroFamily::OpenBsd => &[PackageManagerKind::PkgAdd],
            DistroFamily::NetBsd | DistroFamily::SolarisIllumos => &[PackageManagerKind::Pkgin],
            DistroFamily::MacOs => &[PackageManagerKind::Homebrew],
        }
    }

    /// Family of a distribution id, as found in os-release `ID`/`ID_LIKE`
    pub fn from_id(id: &str) -> Option<DistroFamily> {
        let id = normalize_id(id);
        if id.is_empty() {
            return None;
        }
        DistroFamily::ALL.into_iter().find(|family| {
            family
                .members()
                .iter()
                .any(|member| member.eq_ignore_ascii_case(&id))
        })
    }

    /// Family implied by the first id that maps to one
    pub fn from_os_release(release: &OsRelease) -> Option<DistroFamily> {
        release
            .id
            .iter()
            .chain(release.id_like.iter())
            .find_map(|id| DistroFamily::from_id(id))
    }
}

impl fmt::Display for DistroFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Files whose presence alone identifies a family, checked in order
pub const FAMILY_MARKERS: &[(&str, DistroFamily)] = &[
    ("/etc/debian_version", DistroFamily::Debian),
    ("/etc/arch-release", DistroFamily::Arch),
    ("/etc/alpine-release", DistroFamily::Alpine),
    ("/etc/gentoo-release", DistroFamily::Gentoo),
    ("/etc/redhat-release", DistroFamily::RedHat),
    ("/etc/fedora-release", DistroFamily::RedHat),
    ("/etc/SuSE-release", DistroFamily::OpenSuse),
    ("/etc/slackware-version", DistroFamily::Slackware),
    ("/etc/dragora-version", DistroFamily::Dragora),
    ("/etc/installurl", DistroFamily::OpenBsd),
    (
        "/System/Library/CoreServices/SystemVersion.plist",
        DistroFamily::MacOs,
    ),
];

pub const OS_RELEASE_PATHS: &[&str] = &["/etc/os-release", "/usr/lib/os-release"];

/// The fields of os-release(5) that detection cares about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsRelease {
    pub id: Option<String>,
    pub id_like: Vec<String>,
    pub pretty_name: Option<String>,
}

impl OsRelease {
    pub fn parse(content: &str) -> Self {
        let mut release = OsRelease::default();

        for line in content.lines() {
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                let value = value.trim().trim_matches('"').trim_matches('\'');
                match key.trim() {
                    "ID" => release.id = Some(value.to_lowercase()),
                    "ID_LIKE" => {
                        release.id_like = value
                            .split_whitespace()
                            .map(|id| id.to_lowercase())
                            .collect();
                    }
                    "PRETTY_NAME" => release.pretty_name = Some(value.to_string()),
                    _ => {}
                }
            }
        }

        release
    }
}

fn normalize_id(id: &str) -> String {
    id.trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '!' && *c != '_')
        .collect::<String>()
        .to_lowercase()
}
