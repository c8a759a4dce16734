use crate::cli::options::Commands;
use crate::cli::output::{
    error_exit_code, outcome_exit_code, print_command_line, print_error, print_profile,
    print_report, EXIT_OK,
};
use crate::modules::error::ManagerError;
use crate::modules::interface::{Operation, PackageOperation, ServiceOperation};
use crate::runtime::manager::UnixManager;

/// Runs parsed subcommands against a [`UnixManager`] and turns the results
/// into process exit codes
pub struct TumCliImpl {
    manager: UnixManager,
    dry_run: bool,
    json: bool,
}

impl TumCliImpl {
    pub fn new(manager: UnixManager) -> Self {
        Self {
            manager,
            dry_run: false,
            json: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn manager(&self) -> &UnixManager {
        &self.manager
    }

    /// Exit code of the whole invocation: the first non-zero code of any
    /// target, or zero when every target ended satisfied
    pub async fn execute(&self, command: &Commands) -> i32 {
        match command {
            Commands::Install { packages } => {
                self.package_each(PackageOperation::Install, packages).await
            }
            Commands::Remove { packages } => {
                self.package_each(PackageOperation::Remove, packages).await
            }
            Commands::Purge { packages } => {
                self.package_each(PackageOperation::Purge, packages).await
            }
            Commands::Query { packages } => {
                self.package_each(PackageOperation::Query, packages).await
            }
            Commands::Update => self.package_one(PackageOperation::Update, None).await,
            Commands::Upgrade { packages } if packages.is_empty() => {
                self.package_one(PackageOperation::Upgrade, None).await
            }
            Commands::Upgrade { packages } => {
                self.package_each(PackageOperation::Upgrade, packages).await
            }
            Commands::List => self.package_one(PackageOperation::List, None).await,
            Commands::Service { action, name } => self.service(*action, name).await,
            Commands::Detect => {
                let profile = self.manager.profile().await;
                print_profile(&profile, self.json);
                EXIT_OK
            }
            Commands::Native { tool, args } => self.native(tool, args).await,
        }
    }

    async fn package_each(&self, operation: PackageOperation, targets: &[String]) -> i32 {
        let mut code = EXIT_OK;
        for target in targets {
            let result = self.package_one(operation, Some(target.as_str())).await;
            if code == EXIT_OK {
                code = result;
            }
        }
        code
    }

    async fn package_one(&self, operation: PackageOperation, target: Option<&str>) -> i32 {
        let flags = self.manager.default_flags();
        let shows_output = matches!(operation, PackageOperation::Query | PackageOperation::List);

        if self.dry_run {
            let argv = self
                .manager
                .command_line(Operation::Package(operation), target, &flags)
                .await;
            return self.report_command_line(target, argv);
        }

        match self.manager.package_report(operation, target, &flags).await {
            Ok(report) => {
                print_report(target, &report, shows_output, self.json);
                outcome_exit_code(&report.outcome)
            }
            Err(e) => self.report_error(target, &e),
        }
    }

    async fn service(&self, operation: ServiceOperation, name: &str) -> i32 {
        let flags = self.manager.default_flags();

        if self.dry_run {
            let argv = self
                .manager
                .command_line(Operation::Service(operation), Some(name), &flags)
                .await;
            return self.report_command_line(Some(name), argv);
        }

        // Status output is the answer, not noise
        let shows_output = matches!(operation, ServiceOperation::Status);
        match self.manager.service_report(operation, name, &flags).await {
            Ok(report) => {
                print_report(Some(name), &report, shows_output, self.json);
                outcome_exit_code(&report.outcome)
            }
            Err(e) => self.report_error(Some(name), &e),
        }
    }

    async fn native(&self, tool: &str, args: &[String]) -> i32 {
        if self.dry_run {
            let argv = self
                .manager
                .native_command_line(tool, args)
                .map(|(_, argv)| argv);
            return self.report_command_line(None, argv);
        }

        match self.manager.native_report(tool, args).await {
            Ok(report) => {
                print_report(None, &report, true, self.json);
                outcome_exit_code(&report.outcome)
            }
            Err(e) => self.report_error(None, &e),
        }
    }

    fn report_command_line(
        &self,
        subject: Option<&str>,
        argv: Result<Vec<String>, ManagerError>,
    ) -> i32 {
        match argv {
            Ok(argv) => {
                print_command_line(subject, &argv, self.json);
                EXIT_OK
            }
            Err(e) => self.report_error(subject, &e),
        }
    }

    fn report_error(&self, subject: Option<&str>, error: &ManagerError) -> i32 {
        print_error(subject, error, self.json);
        error_exit_code(error)
    }
}
