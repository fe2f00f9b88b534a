//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

use crate::domain::SystemVersion;
use crate::provision::ProvisionConfig;

#[derive(Parser, Debug)]
#[command(
    name = "parse-mysql-backtrace",
    about = "Parse MySQL's backtrace on crash in error log",
    after_help = "\
EXAMPLES:
    sudo parse-mysql-backtrace /var/log/mysqld.log
    sudo parse-mysql-backtrace --mysql=mysql-5.7.32 --mroonga-version=10.09 mysqld.log
    parse-mysql-backtrace --no-install --system=centos-7 < mysqld.log"
)]
pub struct Args {
    /// MySQL variant with version, e.g.: mysql-5.7.32
    #[arg(long, value_name = "MYSQL", default_value = "mysql-8.0")]
    pub mysql: String,

    /// Groonga version, e.g.: 10.0.9
    #[arg(long, value_name = "VERSION")]
    pub groonga_version: Option<String>,

    /// Mroonga version, e.g.: 10.09
    #[arg(long, value_name = "VERSION")]
    pub mroonga_version: Option<String>,

    /// System as <id>-<version>, e.g.: centos-7 (read from /etc/system-release-cpe if omitted)
    #[arg(long, value_name = "SYSTEM")]
    pub system: Option<SystemVersion>,

    /// Don't install packages; debug symbols are already in place
    #[arg(long)]
    pub no_install: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,

    /// Error logs to read ('-' or nothing for stdin)
    #[arg(value_name = "FILE")]
    pub inputs: Vec<PathBuf>,
}

impl Args {
    /// Versions handed to the provisioning step
    #[must_use]
    pub fn provision_config(&self) -> ProvisionConfig {
        ProvisionConfig {
            mysql: self.mysql.clone(),
            groonga_version: self.groonga_version.clone(),
            mroonga_version: self.mroonga_version.clone(),
        }
    }
}
