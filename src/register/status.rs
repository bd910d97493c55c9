//! ### STATUS - Device status (`0xF3`, 1 byte, R)
//!
//! | Bit | Field     |
//! |-----|-----------|
//! | 3   | measuring |
//! | 0   | im_update |
//!
//! The two flags are independent of each other and may be set at the same time.
#![doc(alias = "STATUS")]
use crate::register::{Readable, Reg};

/// Marker struct for the STATUS (0xF3) register
///
/// - **Length:** 1 byte
/// - **Access:** Read-only
///
/// Used with [`Bmp280::read::<Status>()`](crate::Bmp280::read) or the convenience method
/// [`Bmp280::status`](crate::Bmp280::status).
pub struct Status;

impl Reg for Status { const ADDR: u8 = 0xF3; }

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceStatus {
    measuring: bool,
    im_update: bool,
}

impl DeviceStatus {
    pub fn new(measuring: bool, im_update: bool) -> Self {
        Self { measuring, im_update }
    }

    /// Is a conversion running?
    ///
    /// Goes back to [`false`] once the results have been transferred to the data registers.
    pub fn measuring(&self) -> bool { self.measuring }

    /// Is the NVM being copied to the image registers?
    ///
    /// This happens at power-on and after a reset. Calibration data is not valid until it clears.
    pub fn im_update(&self) -> bool { self.im_update }

    /// Neither a conversion nor an NVM copy is in progress.
    pub fn is_idle(&self) -> bool { !self.measuring && !self.im_update }
}

impl Readable for Status {
    type Out = DeviceStatus;
    fn decode(b: &[u8]) -> Self::Out {
        DeviceStatus {
            measuring: (b[0] & 0b1000) != 0,
            im_update: (b[0] & 0b0001) != 0,
        }
    }
}
