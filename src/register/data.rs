use crate::register::{Readable, Reg};

/// Marker struct for the PRESS_MSB..TEMP_XLSB (0xF7 - 0xFC) registers.
///
/// The BMP280 auto-increments on multi-byte reads, so reading 6 bytes from 0xF7 fetches pressure
/// and temperature in one burst. The datasheet (section 3.9) recommends this to make sure both
/// values come from the same measurement.
/// Note that this returns the raw uncompensated ADC values. For most use cases
/// [`Bmp280::read_sample()`](crate::Bmp280::read_sample) is what you want.
///
/// - **Length:** 6 bytes
/// - **Access:** Read-only
pub struct Data;
impl Reg for Data { const ADDR: u8 = 0xF7; }

/// Raw 20-bit ADC readings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    pressure: u32,
    temperature: u32,
}

impl RawSample {
    pub const fn new(pressure: u32, temperature: u32) -> Self {
        Self { pressure, temperature }
    }

    /// Returns the raw uncompensated pressure (`adc_P`)
    pub fn pressure(&self) -> u32 { self.pressure }

    /// Returns the raw uncompensated temperature (`adc_T`)
    pub fn temperature(&self) -> u32 { self.temperature }
}

/// Assembles a 20-bit value from MSB, LSB and the top nibble of XLSB.
fn adc_20bit(msb: u8, lsb: u8, xlsb: u8) -> u32 {
    ((msb as u32) << 12) | ((lsb as u32) << 4) | ((xlsb as u32) >> 4)
}

impl Readable for Data {
    type Out = RawSample;

    const N: usize = 6;

    fn decode(b: &[u8]) -> Self::Out {
        RawSample {
            pressure: adc_20bit(b[0], b[1], b[2]),
            temperature: adc_20bit(b[3], b[4], b[5]),
        }
    }
}
