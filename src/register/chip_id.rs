//! ### ID - Chip identification number (`0xD0`, 1 byte, R)
//!
//! Contains the chip identification code, which is 0x58 for a mass-production BMP280.
//! Engineering samples report 0x56 or 0x57.
//!
//! ### Examples
//! ```rust,no_run
//! # use bmp280_rs::{Bmp280, Bmp280Result, Configured};
//! # use bmp280_rs::bus::Bus;
//! # fn demo<B: Bus>(mut device: Bmp280<B, Configured>) -> Bmp280Result<(), B::Error> {
//! use bmp280_rs::register::chip_id::ChipId;
//!
//! let id = device.read::<ChipId>()?;
//! println!("{:#x}", id);
//! # Ok(()) }
//! ```
#![doc(alias = "ID")]
use crate::register::{Readable, Reg};

/// Marker struct for the ID (0xD0) register
///
/// - **Length:** 1 byte
/// - **Access:** Read-only
pub struct ChipId;
impl Reg for ChipId { const ADDR: u8 = 0xD0; }

impl Readable for ChipId {
    type Out = u8;
    fn decode(b: &[u8]) -> Self::Out {
        b[0]
    }
}
