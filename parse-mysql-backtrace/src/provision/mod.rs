//! Environment provisioning
//!
//! Makes sure the debug binaries exist before resolution starts: identifies
//! the host and installs the Groonga/Mroonga/MySQL debuginfo packages that
//! match the crashed server. Only this module sees [`ProvisionConfig`].

pub mod packages;
pub mod system;

pub use packages::{plan, prepare_system, CommandLine, MysqlVariant, ProvisionConfig};
pub use system::{detect_system_version, detect_system_version_from, parse_cpe, SYSTEM_RELEASE_CPE};
