//! ### RESET - Soft reset (`0xE0`, 1 byte, Write-only)
//!
//! Writing `0xB6` resets the device using the complete power-on-reset procedure. Any other value
//! is ignored by the device.
//!
//! See also: [`Bmp280::reset()`](crate::Bmp280::reset) and
//! [`Bmp280::soft_reset()`](crate::Bmp280::soft_reset)
#![doc(alias = "RESET")]
use crate::register::{Reg, Writable};

/// Marker type for RESET (0xE0) register
pub struct Reset;
impl Reg for Reset { const ADDR: u8 = 0xE0; }

/// The payload for the RESET (0xE0) register.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ResetCommand {
    /// Triggers a power-on reset.
    ///
    /// All user configuration settings are overwritten with their default state and the
    /// calibration image is copied again from NVM.
    SoftReset,
}

impl From<ResetCommand> for u8 {
    fn from(value: ResetCommand) -> Self {
        match value {
            ResetCommand::SoftReset => 0xB6,
        }
    }
}

impl Writable for Reset {
    type In = ResetCommand;
    fn encode(v: &Self::In, out: &mut [u8]) {
        out[0] = (*v).into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_encode() {
        let mut buffer = [0u8; 1];
        Reset::encode(&ResetCommand::SoftReset, &mut buffer);
        assert_eq!([0xB6], buffer);
    }
}
