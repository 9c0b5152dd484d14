//! Console-variable and engine information ports.

/// Console variable holding the host port.
pub const HOSTPORT_CVAR: &str = "hostport";

/// Console variable holding the server name.
pub const HOSTNAME_CVAR: &str = "hostname";

/// Port for reading console variables by name.
///
/// Every lookup may come back empty; callers define their own fallbacks.
#[cfg_attr(test, mockall::automock)]
pub trait ConsoleVars: Send + Sync {
    fn find_int(&self, name: &str) -> Option<i64>;

    fn find_string(&self, name: &str) -> Option<String>;
}

/// Port for engine-level server facts.
#[cfg_attr(test, mockall::automock)]
pub trait EngineInfo: Send + Sync {
    /// Public IP the server is reachable on.
    fn server_ip(&self) -> String;

    /// Canonical id of the current map (e.g. `de_dust2`).
    fn map_name(&self) -> String;
}
