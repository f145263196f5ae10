/// Domain layer - JDK compatibility, plugin aggregate and upgrade rules
///
/// Pure business logic with no I/O; infrastructure is reached through
/// the ports module.
pub mod domain;
pub mod policies;
pub mod services;
