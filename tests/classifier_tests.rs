use proptest::prelude::*;

use tum::modules::core::{classify, ExecutionResult};
use tum::{AdapterRegistry, InitSystemKind, Outcome, PackageManagerKind, ToolIdentity};

fn result(code: i32, stdout: &str, stderr: &str) -> ExecutionResult {
    ExecutionResult::exited(vec!["tool".to_string()], code, stdout, stderr)
}

#[test]
fn test_shared_permission_patterns_apply_to_every_tool() {
    let registry = AdapterRegistry::with_default_adapters();
    let identities = registry
        .package_manager_kinds()
        .into_iter()
        .map(ToolIdentity::from)
        .chain(registry.init_system_kinds().into_iter().map(ToolIdentity::from));

    for identity in identities {
        let outcome = registry
            .classify(identity, &result(1, "", "Error: Permission denied"))
            .unwrap();
        assert!(
            matches!(outcome, Outcome::PermissionDenied(_)),
            "{identity}: {outcome:?}"
        );
    }
}

#[test]
fn test_adapter_patterns_take_precedence_over_exit_status() {
    let registry = AdapterRegistry::with_default_adapters();
    let pacman = ToolIdentity::from(PackageManagerKind::Pacman);

    let outcome = registry
        .classify(pacman, &result(1, "", "error: target not found: nope"))
        .unwrap();
    assert!(matches!(outcome, Outcome::NotFound(_)));
}

#[test]
fn test_missing_systemd_unit() {
    let registry = AdapterRegistry::with_default_adapters();
    let outcome = registry
        .classify(
            InitSystemKind::Systemd.into(),
            &result(5, "", "Failed to start nope.service: Unit nope.service not found."),
        )
        .unwrap();
    assert!(matches!(outcome, Outcome::NotFound(_)));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expected {
    Success,
    Satisfied,
    NotFound,
    Denied,
    ToolError,
    Failure,
}

impl Expected {
    fn of(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Success => Expected::Success,
            Outcome::AlreadySatisfied => Expected::Satisfied,
            Outcome::NotFound(_) => Expected::NotFound,
            Outcome::PermissionDenied(_) => Expected::Denied,
            Outcome::ToolError(_) => Expected::ToolError,
            Outcome::RunnerFailure(_) | Outcome::RunnerTimeout(_) => Expected::Failure,
        }
    }
}

fn assert_cases(cases: &[(ToolIdentity, i32, &str, &str, Expected)]) {
    let registry = AdapterRegistry::with_default_adapters();
    for (identity, code, stdout, stderr, expected) in cases {
        let outcome = registry
            .classify(*identity, &result(*code, stdout, stderr))
            .unwrap();
        assert_eq!(
            Expected::of(&outcome),
            *expected,
            "{identity} exit {code}: stdout {stdout:?} stderr {stderr:?}"
        );
    }
}

#[test]
fn test_package_manager_messages() {
    use Expected::*;
    use PackageManagerKind as P;

    let cases: Vec<(ToolIdentity, i32, &str, &str, Expected)> = vec![
        (
            P::Dnf.into(),
            0,
            "Package vim-enhanced-2:9.1.083-1.fc40.x86_64 is already installed.\nDependencies resolved.\nNothing to do.\nComplete!\n",
            "",
            Satisfied,
        ),
        (
            P::Dnf.into(),
            1,
            "No match for argument: nosuchpkg\n",
            "Error: Unable to find a match: nosuchpkg\n",
            NotFound,
        ),
        (
            P::Dnf.into(),
            1,
            "",
            "Waiting for process with pid 4242 to finish.\n",
            ToolError,
        ),
        (
            P::Yum.into(),
            0,
            "Package 2:vim-enhanced-7.4.629-8.el7_9.x86_64 already installed and latest version\nNothing to do\n",
            "",
            Satisfied,
        ),
        (
            P::Yum.into(),
            1,
            "No package nosuchpkg available.\n",
            "Error: Nothing to do\n",
            NotFound,
        ),
        (
            P::Yum.into(),
            200,
            "",
            "Existing lock /var/run/yum.pid: another copy is running as pid 4242.\nAnother app is currently holding the yum lock; exiting as configured by exit_on_lock\n",
            ToolError,
        ),
        (
            P::Zypper.into(),
            0,
            "Loading repository data...\nReading installed packages...\n'vim' is already installed.\nResolving package dependencies...\n\nNothing to do.\n",
            "",
            Satisfied,
        ),
        (
            P::Zypper.into(),
            104,
            "Loading repository data...\nReading installed packages...\n'nosuchpkg' not found in package names. Trying capabilities.\nResolving package dependencies...\n\nNothing to do.\n",
            "No provider of 'nosuchpkg' found.\n",
            NotFound,
        ),
        (
            P::Zypper.into(),
            7,
            "",
            "System management is locked by the application with pid 4242 (zypper).\nClose this application before trying again.\n",
            ToolError,
        ),
        (
            P::Pacman.into(),
            0,
            "",
            "warning: vim-9.1.0-1 is up to date -- skipping\n there is nothing to do\n",
            Satisfied,
        ),
        (P::Pacman.into(), 1, "", "error: target not found: nosuchpkg\n", NotFound),
        (
            P::Pacman.into(),
            1,
            "",
            "error: failed to init transaction (unable to lock database)\nerror: could not lock database: File exists\n",
            ToolError,
        ),
        (
            P::Yay.into(),
            0,
            "",
            "warning: yay-12.3.5-1 is up to date -- skipping\n there is nothing to do\n",
            Satisfied,
        ),
        (P::Yay.into(), 1, "", "error: target not found: nosuchpkg\n", NotFound),
        (
            P::Trizen.into(),
            1,
            "",
            "error: failed to init transaction (unable to lock database)\n",
            ToolError,
        ),
        (P::Pamac.into(), 0, "Preparing...\nNothing to do.\n", "", Satisfied),
        (
            P::Pamac.into(),
            1,
            "Preparing...\nNothing to do.\n",
            "Error: target not found: nosuchpkg\n",
            NotFound,
        ),
        (
            P::Pamac.into(),
            1,
            "",
            "Error: Failed to init transaction: unable to lock database\n",
            ToolError,
        ),
        (P::Xbps.into(), 0, "Package `vim' already installed.\n", "", Satisfied),
        (
            P::Xbps.into(),
            2,
            "",
            "Package 'nosuchpkg' not found in repository pool.\n",
            NotFound,
        ),
        (
            P::Xbps.into(),
            16,
            "",
            "ERROR: Failed to lock the pkgdb: Device or resource busy\n",
            ToolError,
        ),
        (
            P::Pkg.into(),
            0,
            "Updating FreeBSD repository catalogue...\nFreeBSD repository is up to date.\nAll repositories are up to date.\nThe most recent versions of packages are already installed\n",
            "",
            Satisfied,
        ),
        (
            P::Pkg.into(),
            1,
            "",
            "pkg: No packages available to install matching 'nosuchpkg' have been found in the repositories\n",
            NotFound,
        ),
        (
            P::Pkg.into(),
            1,
            "",
            "pkg: Cannot get an exclusive lock on a database, it is locked by another process\n",
            ToolError,
        ),
        // pkg_add says nothing when the package is already there
        (P::PkgAdd.into(), 0, "", "", Success),
        (P::PkgAdd.into(), 1, "", "Can't find nosuchpkg\n", NotFound),
        (
            P::PkgAdd.into(),
            1,
            "",
            "Fatal error: signature check failed for vim-9.1.0-no_x11.tgz\n",
            ToolError,
        ),
        (
            P::Pkgin.into(),
            0,
            "calculating dependencies...done.\nnothing to do.\n",
            "",
            Satisfied,
        ),
        (
            P::Pkgin.into(),
            1,
            "calculating dependencies...done.\nnothing to do.\n",
            "pkgin: nosuchpkg is not available in the repository\n",
            NotFound,
        ),
        (
            P::Pkgin.into(),
            1,
            "",
            "pkgin: Couldn't read pkgdb: database is locked\n",
            ToolError,
        ),
        (
            P::Slackpkg.into(),
            20,
            "\nNo packages match the pattern for install. Try:\n\n\t/usr/sbin/slackpkg reinstall|upgrade\n\n",
            "",
            Satisfied,
        ),
        (
            P::Slackpkg.into(),
            20,
            "\nNo packages match the pattern for remove.\n\n",
            "",
            NotFound,
        ),
        (
            P::Slackpkg.into(),
            1,
            "\nAnother instance of slackpkg is running. If this is not correct, you can\nremove /var/lock/slackpkg.* files and run slackpkg again.\n\n",
            "",
            ToolError,
        ),
        (
            P::Qi.into(),
            0,
            "",
            "qi: vim_9.1.0_x86_64-1@editors is already installed\n",
            Satisfied,
        ),
        (
            P::Qi.into(),
            1,
            "",
            "qi: nosuchpkg.tlz: No such file or directory\n",
            NotFound,
        ),
        (
            P::Guix.into(),
            0,
            "",
            "guix install: warning: nothing to be done\n",
            Satisfied,
        ),
        (
            P::Guix.into(),
            1,
            "",
            "guix install: error: nosuchpkg: unknown package\n",
            NotFound,
        ),
        (
            P::Guix.into(),
            1,
            "",
            "guix install: error: failed to connect to `/var/guix/daemon-socket/socket': Connection refused\n",
            ToolError,
        ),
        (
            P::Homebrew.into(),
            0,
            "",
            "Warning: vim 9.1.0350 is already installed and up-to-date.\nTo reinstall 9.1.0350, run:\n  brew reinstall vim\n",
            Satisfied,
        ),
        (
            P::Homebrew.into(),
            1,
            "",
            "Error: No available formula with the name \"nosuchpkg\".\n",
            NotFound,
        ),
        (
            P::Homebrew.into(),
            1,
            "",
            "Error: A `brew install vim` process has already locked /opt/homebrew/var/homebrew/locks/vim.formula.lock.\n",
            ToolError,
        ),
        // apk reports a no-op install as an ordinary success
        (P::Apk.into(), 0, "OK: 215 MiB in 72 packages\n", "", Success),
        (
            P::Apk.into(),
            1,
            "",
            "ERROR: unable to select packages:\n  nosuchpkg (no such package):\n    required by: world[nosuchpkg]\n",
            NotFound,
        ),
        (
            P::Apk.into(),
            99,
            "",
            "ERROR: Unable to lock database: Resource temporarily unavailable\nERROR: Failed to open apk database: Resource temporarily unavailable\n",
            ToolError,
        ),
        (
            P::Dpkg.into(),
            0,
            "",
            "dpkg: warning: ignoring request to remove nosuchpkg which isn't installed\n",
            Satisfied,
        ),
        (
            P::Dpkg.into(),
            1,
            "",
            "dpkg-query: package 'nosuchpkg' is not installed and no information is available\n",
            NotFound,
        ),
        (
            P::Dpkg.into(),
            2,
            "",
            "dpkg: error: dpkg frontend lock was locked by another process with pid 4242\nNote: removing the lock file is always wrong, and can end up damaging the\nlocked area and the entire system.\n",
            ToolError,
        ),
        (
            P::Aptitude.into(),
            0,
            "No packages will be installed, upgraded, or removed.\n0 packages upgraded, 0 newly installed, 0 to remove and 0 not upgraded.\n",
            "",
            Satisfied,
        ),
        (
            P::Aptitude.into(),
            255,
            "No packages will be installed, upgraded, or removed.\n",
            "Couldn't find any package whose name or description matched \"nosuchpkg\"\n",
            NotFound,
        ),
        (
            P::Aptitude.into(),
            255,
            "",
            "E: Could not get lock /var/lib/dpkg/lock-frontend. It is held by process 4242 (apt)\n",
            ToolError,
        ),
    ];
    assert_cases(&cases);
}

#[test]
fn test_init_system_messages() {
    use Expected::*;
    use InitSystemKind as I;

    let cases: Vec<(ToolIdentity, i32, &str, &str, Expected)> = vec![
        // systemctl start on a running unit prints nothing
        (I::Systemd.into(), 0, "", "", Success),
        (
            I::Systemd.into(),
            4,
            "",
            "Unit nope.service could not be found.\n",
            NotFound,
        ),
        (
            I::Systemd.into(),
            1,
            "",
            "Failed to enable unit: Unit file nope.service does not exist.\n",
            NotFound,
        ),
        (
            I::Systemd.into(),
            1,
            "",
            "Failed to connect to bus: No such file or directory\n",
            ToolError,
        ),
        (
            I::OpenRc.into(),
            0,
            "",
            " * WARNING: nginx has already been started\n",
            Satisfied,
        ),
        (
            I::OpenRc.into(),
            1,
            "",
            " * rc-service: service `nope' does not exist\n",
            NotFound,
        ),
        (I::OpenRc.into(), 1, "", " * ERROR: nginx failed to start\n", Failure),
        (I::Runit.into(), 0, "ok: run: nginx: (pid 812) 3600s\n", "", Success),
        (
            I::Runit.into(),
            1,
            "fail: nope: unable to change to service directory: file does not exist\n",
            "",
            NotFound,
        ),
        (
            I::Runit.into(),
            1,
            "timeout: down: nginx: 1s, normally up, want up\n",
            "",
            ToolError,
        ),
        (I::S6.into(), 0, "", "", Success),
        (I::S6.into(), 3, "", "s6-rc: fatal: unknown service name nope\n", NotFound),
        (
            I::S6.into(),
            111,
            "",
            "s6-rc: fatal: unable to take lock on /run/s6-rc/lock: Resource busy\n",
            ToolError,
        ),
        (I::Dinit.into(), 0, "Service (already) started.\n", "", Satisfied),
        (
            I::Dinit.into(),
            1,
            "",
            "dinitctl: failed to find service description.\n",
            NotFound,
        ),
        (
            I::Dinit.into(),
            1,
            "",
            "dinitctl: unable to connect to socket (/run/dinitctl): Connection refused\n",
            ToolError,
        ),
        // launchctl enable on an enabled job prints nothing
        (I::Launchd.into(), 0, "", "", Success),
        (
            I::Launchd.into(),
            113,
            "",
            "Could not find service \"nope\" in domain for port\n",
            NotFound,
        ),
        (
            I::Launchd.into(),
            1,
            "",
            "Disable failed: 1: Operation not permitted while System Integrity Protection is engaged\n",
            Denied,
        ),
        (I::Sysvinit.into(), 0, "Starting nginx: nginx.\n", "", Success),
        (I::Sysvinit.into(), 1, "", "nope: unrecognized service\n", NotFound),
        (I::Sysvinit.into(), 1, "", "Starting nginx: failed!\n", Failure),
    ];
    assert_cases(&cases);
}

proptest! {
    #[test]
    fn test_classification_is_pure(
        code in -1i32..256,
        stdout in "[ -~]{0,64}",
        stderr in "[ -~]{0,64}",
    ) {
        let registry = AdapterRegistry::with_default_adapters();
        let apt = ToolIdentity::from(PackageManagerKind::Apt);
        let result = result(code, &stdout, &stderr);

        let first = registry.classify(apt, &result).unwrap();
        let second = registry.classify(apt, &result).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_unmatched_output_falls_back_to_exit_status(
        code in -1i32..256,
        stdout in "[0-9 ]{0,32}",
        stderr in "[0-9 ]{0,32}",
    ) {
        let tool = ToolIdentity::from(PackageManagerKind::Dnf);
        let outcome = classify(tool, &[], &result(code, &stdout, &stderr));

        if code == 0 {
            prop_assert_eq!(outcome, Outcome::Success);
        } else {
            match outcome {
                Outcome::RunnerFailure(detail) => {
                    prop_assert_eq!(detail.stdout, stdout);
                    prop_assert_eq!(detail.stderr, stderr);
                    prop_assert_eq!(detail.exit.and_then(|e| e.code()), Some(code));
                }
                other => prop_assert!(false, "unexpected outcome {:?}", other),
            }
        }
    }
}
