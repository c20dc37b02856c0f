//! Configuration validation.

use heapless::String;

use crate::error::{ConfigError, Error, Result, SlotError};
use crate::irq::{Slot, MAX_SLOTS};

use super::SystemConfig;

/// Validate a system configuration.
///
/// Checks:
/// - Every PIO, state machine and channel index is in range for this chip
/// - No two controllers are bound to the same state machine
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    let mut owners: [Option<&str>; MAX_SLOTS] = [None; MAX_SLOTS];

    for (name, controller) in config.controllers.iter() {
        let slot = controller
            .slot()
            .and_then(|slot| controller.channel().map(|_| slot))
            .map_err(|reason| invalid(name.as_str(), reason))?;

        claim_slot(&mut owners, slot, name.as_str())?;
    }

    Ok(())
}

fn claim_slot<'a>(
    owners: &mut [Option<&'a str>; MAX_SLOTS],
    slot: Slot,
    name: &'a str,
) -> Result<()> {
    match owners[slot.index()].replace(name) {
        Some(first) => Err(Error::Config(ConfigError::DuplicateSlot {
            first: String::try_from(first).unwrap_or_default(),
            second: String::try_from(name).unwrap_or_default(),
        })),
        None => Ok(()),
    }
}

fn invalid(name: &str, reason: SlotError) -> Error {
    Error::Config(ConfigError::InvalidController {
        name: String::try_from(name).unwrap_or_default(),
        reason,
    })
}
