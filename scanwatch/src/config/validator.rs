use crate::config::types::Config;

/// Longest interface name the kernel accepts (IFNAMSIZ minus the NUL).
const MAX_INTERFACE_LEN: usize = 15;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

pub fn validate(config: &Config) -> Result<(), String> {
    let iface = config.interface.as_str();
    if iface.is_empty() {
        return Err("interface is required (config file or --interface)".into());
    }
    if iface.len() > MAX_INTERFACE_LEN {
        return Err(format!("interface name '{iface}' exceeds {MAX_INTERFACE_LEN} bytes"));
    }
    if iface.contains('/') || iface.chars().any(char::is_whitespace) {
        return Err(format!("interface name '{iface}' contains '/' or whitespace"));
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(format!(
            "logging.level must be one of {}, got '{}'",
            LOG_LEVELS.join(", "),
            config.logging.level
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(interface: &str) -> Config {
        Config { interface: interface.to_string(), ..Config::default() }
    }

    #[test]
    fn accepts_plain_interface() {
        assert!(validate(&config("eth0")).is_ok());
        assert!(validate(&config("enp0s31f6.100")).is_ok());
    }

    #[test]
    fn rejects_bad_interface_names() {
        assert!(validate(&config("")).is_err());
        assert!(validate(&config("a-very-long-interface")).is_err());
        assert!(validate(&config("eth0/1")).is_err());
        assert!(validate(&config("eth 0")).is_err());
    }

    #[test]
    fn level_is_case_insensitive() {
        let mut cfg = config("eth0");
        cfg.logging.level = "WARN".into();
        assert!(validate(&cfg).is_ok());
        cfg.logging.level = "loud".into();
        assert!(validate(&cfg).is_err());
    }
}
