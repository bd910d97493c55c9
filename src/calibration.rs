use crate::bus::Bus;
use crate::error::Bmp280Result;
use crate::register;

/// Factory trimming parameters, read once from NVM after a reset.
///
/// The driver only hands these out by reference from a state that has loaded them, so they stay
/// fixed for the lifetime of a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationParameters {
    pub dig_t1: u16,
    pub dig_t2: i16,
    pub dig_t3: i16,
    pub dig_p1: u16,
    pub dig_p2: i16,
    pub dig_p3: i16,
    pub dig_p4: i16,
    pub dig_p5: i16,
    pub dig_p6: i16,
    pub dig_p7: i16,
    pub dig_p8: i16,
    pub dig_p9: i16,
}

impl CalibrationParameters {
    /// Reads the 24 byte calibration block (0x88 - 0x9F) in a single burst.
    pub fn load<B: Bus>(bus: &mut B) -> Bmp280Result<Self, B::Error> {
        let calibration = bus.read::<register::calibration::Calibration>()?;
        log::debug!("loaded calibration {:?}", calibration);

        Ok(calibration)
    }
}
