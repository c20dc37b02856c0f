//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated. I/O
/// errors carry the path.
///
/// # Example
///
/// ```rust,ignore
/// use pio_stepper::load_config;
///
/// let config = load_config("steppers.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        let msg = format!("{}: {}", path.display(), e);
        Error::Config(ConfigError::IoError(truncated(&msg)))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content)
        .map_err(|e| Error::Config(ConfigError::ParseError(truncated(e.message()))))?;

    super::validation::validate_config(&config)?;
    debug!("{} controller bindings loaded", config.controllers.len());

    Ok(config)
}

/// Longest prefix of `msg` that fits, cut on a character boundary.
fn truncated<const N: usize>(msg: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in msg.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::irq::{IrqChannel, Slot};

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[controllers.x_axis]
pio = 0
state_machine = 2
"#;

        let config = parse_config(toml).unwrap();
        let x = config.controller("x_axis").unwrap();
        assert_eq!(x.slot(), Ok(Slot::new(0, 2).unwrap()));
        assert_eq!(x.channel(), Ok(IrqChannel::Irq0));
        assert!(x.notify);
        assert_eq!(x.step_delay, None);
    }

    #[test]
    fn test_parse_full_binding() {
        let toml = r#"
[controllers.pan]
pio = 1
state_machine = 3
irq_channel = 1
notify = false
step_delay = 4000
"#;

        let config = parse_config(toml).unwrap();
        let pan = config.controller("pan").unwrap();
        assert_eq!(pan.channel(), Ok(IrqChannel::Irq1));
        assert!(!pan.notify);
        assert_eq!(pan.step_delay, Some(4000));
    }

    #[test]
    fn test_duplicate_binding_fails_validation() {
        let toml = r#"
[controllers.a]
pio = 0
state_machine = 1

[controllers.b]
pio = 0
state_machine = 1
"#;

        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::DuplicateSlot { .. }))
        ));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            parse_config("[controllers.a\npio = 0"),
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_missing_file() {
        match load_config("/nonexistent/steppers.toml") {
            Err(Error::Config(ConfigError::IoError(msg))) => {
                assert!(msg.starts_with("/nonexistent/steppers.toml: "));
            }
            other => panic!("expected I/O error, got {:?}", other),
        }
    }

    #[test]
    fn test_long_messages_keep_their_prefix() {
        let msg = "é".repeat(100);
        let short: heapless::String<128> = truncated(&msg);

        assert_eq!(short.len(), 128);
        assert!(msg.starts_with(short.as_str()));
        assert_eq!(truncated::<8>("short").as_str(), "short");
    }

    #[test]
    fn test_unknown_controller_lookup() {
        let config = parse_config("").unwrap();
        assert!(config.controller_or_error("z_axis").is_err());
        assert_eq!(config.controller_names().count(), 0);
    }
}
