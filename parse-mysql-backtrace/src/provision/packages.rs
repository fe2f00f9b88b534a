//! Installing the debug packages that match the crashed server
//!
//! The plan is computed up front as plain data and only then executed, so an
//! unsupported system or MySQL variant is reported before anything is
//! installed.

use log::info;
use std::fmt;
use std::str::FromStr;

use crate::domain::{BacktraceError, SystemVariant};
use crate::symbolization::ExternalTool;

const GROONGA_RELEASE_RPM: &str =
    "https://packages.groonga.org/centos/7/groonga-release-latest.noarch.rpm";
const MYSQL_RELEASE_RPM: &str = "https://repo.mysql.com/mysql-community-release-el7.rpm";
const EL7_PACKAGE_SUFFIX: &str = "-1.el7.x86_64";

/// Versions of the software that produced the crash log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionConfig {
    /// MySQL variant with version, e.g. `mysql-5.7.32` or `mysql-8.0`
    pub mysql: String,
    pub groonga_version: Option<String>,
    pub mroonga_version: Option<String>,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self { mysql: "mysql-8.0".to_string(), groonga_version: None, mroonga_version: None }
    }
}

/// MySQL series with Mroonga packages in the Groonga repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MysqlVariant {
    Mysql57,
    /// `suffix` is whatever followed `mysql-8.0`, e.g. `.22`
    Mysql80 { suffix: String },
}

impl MysqlVariant {
    #[must_use]
    pub fn mroonga_package(&self) -> &'static str {
        match self {
            MysqlVariant::Mysql57 => "mysql57-community-mroonga",
            MysqlVariant::Mysql80 { .. } => "mysql80-community-mroonga",
        }
    }
}

impl FromStr for MysqlVariant {
    type Err = BacktraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("mysql-5.7") {
            Ok(MysqlVariant::Mysql57)
        } else if let Some(suffix) = s.strip_prefix("mysql-8.0") {
            Ok(MysqlVariant::Mysql80 { suffix: suffix.to_string() })
        } else {
            Err(BacktraceError::UnsupportedMysql(s.to_string()))
        }
    }
}

/// One external command of a provisioning plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { program: program.to_string(), args: args.into_iter().map(Into::into).collect() }
    }

    /// Run through `tool`, failing on a non-zero exit.
    ///
    /// # Errors
    /// Whatever [`ExternalTool::run`] reports.
    pub fn run<T: ExternalTool + ?Sized>(&self, tool: &T) -> Result<(), BacktraceError> {
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        tool.run(&self.program, &args)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Commands that install debug symbols for `config` on `system`.
///
/// # Errors
/// [`BacktraceError::UnsupportedSystem`] or [`BacktraceError::UnsupportedMysql`].
pub fn plan(
    system: &SystemVariant,
    config: &ProvisionConfig,
) -> Result<Vec<CommandLine>, BacktraceError> {
    match system {
        SystemVariant::CentOs7 => plan_centos_7(config),
        SystemVariant::Amazon2 => plan_amazon_2(config),
        SystemVariant::Unsupported(system) => {
            Err(BacktraceError::UnsupportedSystem(system.clone()))
        }
    }
}

fn plan_centos_7(config: &ProvisionConfig) -> Result<Vec<CommandLine>, BacktraceError> {
    let mysql: MysqlVariant = config.mysql.parse()?;

    let mut commands = vec![
        CommandLine::new("yum", ["install", "-y", GROONGA_RELEASE_RPM]),
        CommandLine::new("yum", ["install", "-y", MYSQL_RELEASE_RPM]),
        CommandLine::new("yum", ["install", "-y", "binutils", "yum-utils"]),
    ];

    let mut packages = Vec::new();
    match &mysql {
        MysqlVariant::Mysql57 => {
            commands
                .push(CommandLine::new("yum-config-manager", ["--enable", "mysql57-community"]));
            commands
                .push(CommandLine::new("yum-config-manager", ["--disable", "mysql80-community"]));
        }
        MysqlVariant::Mysql80 { suffix } if !suffix.is_empty() => {
            for component in ["client", "common", "libs", "server"] {
                packages
                    .push(format!("mysql-community-{component}-8.0{suffix}{EL7_PACKAGE_SUFFIX}"));
            }
        }
        MysqlVariant::Mysql80 { .. } => {}
    }

    let mroonga = mysql.mroonga_package();
    let mroonga_version = package_version(config.mroonga_version.as_deref());
    packages.push(format!("{mroonga}{mroonga_version}"));
    packages.push(format!("{mroonga}-debuginfo{mroonga_version}"));

    let groonga_version = package_version(config.groonga_version.as_deref());
    packages.push(format!("groonga-libs{groonga_version}"));
    packages.push(format!("groonga-debuginfo{groonga_version}"));

    let mut install = vec!["install".to_string(), "-y".to_string()];
    install.extend(packages);
    commands.push(CommandLine::new("yum", install));
    Ok(commands)
}

fn plan_amazon_2(config: &ProvisionConfig) -> Result<Vec<CommandLine>, BacktraceError> {
    let mut commands = vec![CommandLine::new("amazon-linux-extras", ["install", "epel", "-y"])];
    commands.extend(plan_centos_7(config)?);
    Ok(commands)
}

/// `-<version>-1.el7.x86_64`, or nothing for the latest package
fn package_version(version: Option<&str>) -> String {
    version.map_or_else(String::new, |version| format!("-{version}{EL7_PACKAGE_SUFFIX}"))
}

/// Install everything [`plan`] lists, stopping at the first failure.
///
/// # Errors
/// Planning errors, or the first command that fails.
pub fn prepare_system<T: ExternalTool + ?Sized>(
    tool: &T,
    system: &SystemVariant,
    config: &ProvisionConfig,
) -> Result<(), BacktraceError> {
    for command in plan(system, config)? {
        info!("{command}");
        command.run(tool)?;
    }
    Ok(())
}
