//! Built-in setup steps

mod firewall;
mod packages;
mod role;
mod security;

pub use firewall::FirewallStep;
pub use packages::PackagesStep;
pub use role::RoleStep;
pub use security::SecurityStep;
