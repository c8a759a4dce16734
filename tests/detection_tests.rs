mod common;

use std::sync::Arc;

use common::FakeProbe;
use tum::modules::system::detection::{HostDetector, SystemProbe};
use tum::modules::system::DistroFamily;
use tum::{InitSystemKind, PackageManagerKind};

fn detector(probe: FakeProbe) -> HostDetector {
    HostDetector::new(Arc::new(probe))
}

#[tokio::test]
async fn test_detection_is_deterministic() {
    let detector = detector(FakeProbe::debian_systemd());
    let first = detector.detect().await;
    let second = detector.detect().await;

    assert_eq!(first, second);
    assert_eq!(first.package_manager, Some(PackageManagerKind::Apt));
    assert_eq!(first.init_system, Some(InitSystemKind::Systemd));
    assert_eq!(first.distribution.as_deref(), Some("debian"));
    assert_eq!(first.family, Some(DistroFamily::Debian));
}

#[tokio::test]
async fn test_family_tools_win_over_base_priority() {
    // apt is earlier in the base order, but this is a Fedora host
    let probe = FakeProbe::new()
        .with_file("/etc/os-release", "ID=fedora\nVERSION_ID=40\n")
        .with_executable("apt")
        .with_executable("dnf");

    let profile = detector(probe).detect().await;
    assert_eq!(profile.family, Some(DistroFamily::RedHat));
    assert_eq!(profile.package_manager, Some(PackageManagerKind::Dnf));
}

#[tokio::test]
async fn test_id_like_decides_unknown_distribution() {
    let probe = FakeProbe::new()
        .with_file("/usr/lib/os-release", "ID=mydistro\nID_LIKE=\"arch\"\n")
        .with_executable("yay")
        .with_executable("pacman");

    let profile = detector(probe).detect().await;
    assert_eq!(profile.distribution.as_deref(), Some("mydistro"));
    assert_eq!(profile.family, Some(DistroFamily::Arch));
    assert_eq!(profile.package_manager, Some(PackageManagerKind::Pacman));
}

#[tokio::test]
async fn test_marker_file_identifies_family_without_os_release() {
    let probe = FakeProbe::new()
        .with_path("/etc/alpine-release")
        .with_executable("apk")
        .with_executable("rc-service")
        .with_path("/run/openrc");

    let profile = detector(probe).detect().await;
    assert_eq!(profile.distribution, None);
    assert_eq!(profile.family, Some(DistroFamily::Alpine));
    assert_eq!(profile.package_manager, Some(PackageManagerKind::Apk));
    assert_eq!(profile.init_system, Some(InitSystemKind::OpenRc));
}

#[tokio::test]
async fn test_pid1_wins_over_markers() {
    // /etc/init.d exists nearly everywhere; PID 1 is authoritative
    let probe = FakeProbe::new()
        .with_pid1("runit")
        .with_path("/etc/init.d")
        .with_executable("service")
        .with_executable("sv");

    let profile = detector(probe).detect().await;
    assert_eq!(profile.init_system, Some(InitSystemKind::Runit));
}

#[tokio::test]
async fn test_marker_without_control_tool_is_ignored() {
    let probe = FakeProbe::new()
        .with_path("/run/systemd/system")
        .with_path("/etc/init.d")
        .with_executable("service");

    let profile = detector(probe).detect().await;
    assert_eq!(profile.init_system, Some(InitSystemKind::Sysvinit));
}

#[tokio::test]
async fn test_ambiguous_pid1_falls_back_to_markers() {
    let probe = FakeProbe::new()
        .with_pid1("init")
        .with_path("/run/openrc")
        .with_executable("rc-service");

    let profile = detector(probe).detect().await;
    assert_eq!(profile.init_system, Some(InitSystemKind::OpenRc));
}

#[tokio::test]
async fn test_empty_host_detects_nothing() {
    let profile = detector(FakeProbe::new()).detect().await;
    assert_eq!(profile.package_manager, None);
    assert_eq!(profile.init_system, None);
    assert_eq!(profile.family, None);
}

#[tokio::test]
async fn test_gentoo_detects_unregistered_portage() {
    let probe = FakeProbe::new()
        .with_file("/etc/os-release", "ID=gentoo\n")
        .with_executable("emerge");

    let profile = detector(probe).detect().await;
    assert_eq!(profile.package_manager, Some(PackageManagerKind::Portage));
}

#[tokio::test]
async fn test_overrides_skip_probing() {
    let profile = detector(FakeProbe::debian_systemd())
        .with_package_manager(Some(PackageManagerKind::Homebrew))
        .with_init_system(Some(InitSystemKind::Launchd))
        .detect()
        .await;

    assert_eq!(profile.package_manager, Some(PackageManagerKind::Homebrew));
    assert_eq!(profile.init_system, Some(InitSystemKind::Launchd));
    // Distribution facts are still gathered
    assert_eq!(profile.family, Some(DistroFamily::Debian));
}

#[cfg(unix)]
#[tokio::test]
async fn test_system_probe_against_a_fake_root() {
    use std::os::unix::fs::PermissionsExt;

    let root = tempfile::tempdir().unwrap();
    let bin = root.path().join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    std::fs::create_dir_all(root.path().join("run/runit")).unwrap();
    std::fs::create_dir_all(root.path().join("etc")).unwrap();
    std::fs::write(root.path().join("etc/os-release"), "ID=void\n").unwrap();

    for name in ["xbps-install", "sv"] {
        let path = bin.join(name);
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    let probe = SystemProbe::new()
        .with_root(root.path())
        .with_search_path(bin.as_os_str());
    let profile = HostDetector::new(Arc::new(probe)).detect().await;

    assert_eq!(profile.family, Some(DistroFamily::Void));
    assert_eq!(profile.package_manager, Some(PackageManagerKind::Xbps));
    // /proc/1/comm is read under the fake root too, where it does not exist
    assert_eq!(profile.init_system, Some(InitSystemKind::Runit));
}
