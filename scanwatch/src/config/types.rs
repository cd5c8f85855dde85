use serde::Deserialize;

/// Detector configuration, read from a TOML file.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Network interface to attach the XDP program to (e.g. "eth0")
    /// May be left out of the file and given with `--interface` instead
    #[serde(default)]
    pub interface: String,
    #[serde(default)]
    pub xdp: XdpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// XDP attachment configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct XdpConfig {
    /// Attach mode: "default", "skb", "driver" or "hardware"
    /// Default: "default" (let the kernel pick native mode when the driver supports it)
    #[serde(default)]
    pub mode: XdpMode,
}

/// How the XDP program is attached to the interface.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum XdpMode {
    /// No mode flag, kernel decides
    #[default]
    Default,
    /// Generic XDP in the network stack, works on every driver
    Skb,
    /// Native XDP in the driver
    Driver,
    /// Offloaded to the NIC
    Hardware,
}

/// Logging configuration
/// Controls application-level structured logging (stdout/stderr)
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    /// Default: "info"
    /// Can be overridden at runtime via RUST_LOG environment variable
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Show module path (target) in log messages
    /// Default: false
    #[serde(default = "default_false")]
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), show_target: default_false() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_false() -> bool {
    false
}
