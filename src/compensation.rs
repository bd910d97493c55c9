//! Conversion of raw ADC counts into temperature and pressure.
//!
//! Bosch publishes three variants of the compensation formulas (datasheet section 3.11.3 and
//! 8.1/8.2). They share the same two-stage structure: temperature compensation produces an
//! intermediate `t_fine`, and pressure compensation consumes it. Here `t_fine` is the [`TFine`]
//! value returned by [`Compensator::compensate_temperature`]. There is no way to construct one
//! by hand, so pressure can never be compensated without a matching temperature.
//!
//! The fixed-point variants use wrapping arithmetic. With a corrupted calibration block they
//! produce garbage like the reference C code does, instead of panicking on overflow.
//!
//! # Examples
//!
//! ```
//! use bmp280_rs::{CalibrationParameters, Compensator, RawSample};
//!
//! let calibration = CalibrationParameters {
//!     dig_t1: 27504, dig_t2: 26435, dig_t3: -1000,
//!     dig_p1: 36477, dig_p2: -10685, dig_p3: 3024, dig_p4: 2855, dig_p5: 140,
//!     dig_p6: -7, dig_p7: 15500, dig_p8: -14600, dig_p9: 6000,
//! };
//!
//! let (temperature, t_fine) = Compensator::FixedPoint64.compensate_temperature(519888, &calibration);
//! let pressure = Compensator::FixedPoint64.compensate_pressure(415148, &calibration, t_fine);
//! assert_eq!(128422, t_fine.value());
//!
//! let sample = Compensator::FloatingPoint.compensate(RawSample::new(415148, 519888), &calibration);
//! assert!(sample.temperature > 25.0 && sample.temperature < 25.1);
//! # let _ = (temperature, pressure);
//! ```

use crate::calibration::CalibrationParameters;
use crate::register::data::RawSample;

/// Selects which of the manufacturer's compensation formulas is used.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Compensator {
    /// 32-bit integer temperature, 64-bit integer pressure. Resolution 0.01 °C / 1/256 Pa.
    FixedPoint64,
    /// Double precision floating point.
    #[default]
    FloatingPoint,
    /// 32-bit integer temperature and pressure. Resolution 0.01 °C / 1 Pa.
    ///
    /// The coarser pressure path typically reads a few pascal above the other two variants.
    FixedPoint32,
}

/// Fine temperature carried from temperature compensation into pressure compensation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TFine(i32);

impl TFine {
    /// The raw `t_fine` value, in the fixed-point scale of the datasheet.
    pub fn value(self) -> i32 {
        self.0
    }
}

/// Holds compensated pressure and temperature samples.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CompensatedSample {
    /// Temperature in degrees Celsius
    pub temperature: f32,
    /// Pressure in pascal
    pub pressure: f32,
}

#[cfg(feature = "uom")]
impl CompensatedSample {
    pub fn pressure_uom(&self) -> uom::si::f32::Pressure {
        uom::si::f32::Pressure::new::<uom::si::pressure::pascal>(self.pressure)
    }

    pub fn temperature_uom(&self) -> uom::si::f32::ThermodynamicTemperature {
        uom::si::f32::ThermodynamicTemperature::new::<uom::si::thermodynamic_temperature::degree_celsius>(self.temperature)
    }
}

impl Compensator {
    /// Compensates a raw temperature reading.
    ///
    /// Returns the temperature in °C together with the [`TFine`] needed for pressure compensation.
    pub fn compensate_temperature(&self, adc_t: u32, calibration: &CalibrationParameters) -> (f32, TFine) {
        match self {
            Compensator::FixedPoint64 | Compensator::FixedPoint32 => {
                let t_fine = t_fine_fixed(adc_t, calibration);
                (temperature_fixed(t_fine), TFine(t_fine))
            }
            Compensator::FloatingPoint => temperature_float(adc_t, calibration),
        }
    }

    /// Compensates a raw pressure reading, returning pascal.
    ///
    /// `t_fine` must come from the temperature of the same measurement. Returns exactly `0.0` if
    /// the calibration makes the formula's denominator zero.
    pub fn compensate_pressure(&self, adc_p: u32, calibration: &CalibrationParameters, t_fine: TFine) -> f32 {
        let pressure = match self {
            Compensator::FixedPoint64 => pressure_fixed64(adc_p, calibration, t_fine),
            Compensator::FloatingPoint => pressure_float(adc_p, calibration, t_fine),
            Compensator::FixedPoint32 => pressure_fixed32(adc_p, calibration, t_fine),
        };

        pressure.unwrap_or_else(|| {
            log::warn!("{:?}: pressure denominator is zero, reporting 0 Pa", self);
            0.0
        })
    }

    /// Compensates both channels of a raw sample, temperature first.
    pub fn compensate(&self, raw: RawSample, calibration: &CalibrationParameters) -> CompensatedSample {
        let (temperature, t_fine) = self.compensate_temperature(raw.temperature(), calibration);
        let pressure = self.compensate_pressure(raw.pressure(), calibration, t_fine);

        CompensatedSample { temperature, pressure }
    }
}

fn t_fine_fixed(adc_t: u32, c: &CalibrationParameters) -> i32 {
    let adc_t = adc_t as i32;
    let t1 = c.dig_t1 as i32;

    let var1 = ((adc_t >> 3) - (t1 << 1)).wrapping_mul(c.dig_t2 as i32) >> 11;
    let delta = (adc_t >> 4) - t1;
    let var2 = (delta.wrapping_mul(delta) >> 12).wrapping_mul(c.dig_t3 as i32) >> 14;

    var1.wrapping_add(var2)
}

fn temperature_fixed(t_fine: i32) -> f32 {
    // Hundredths of a degree
    let t = t_fine.wrapping_mul(5).wrapping_add(128) >> 8;
    t as f32 / 100.0
}

fn temperature_float(adc_t: u32, c: &CalibrationParameters) -> (f32, TFine) {
    let adc_t = adc_t as f64;
    let t1 = c.dig_t1 as f64;

    let var1 = (adc_t / 16384.0 - t1 / 1024.0) * c.dig_t2 as f64;
    let delta = adc_t / 131072.0 - t1 / 8192.0;
    let var2 = delta * delta * c.dig_t3 as f64;

    let t_fine = var1 + var2;
    ((t_fine / 5120.0) as f32, TFine(t_fine as i32))
}

fn pressure_fixed64(adc_p: u32, c: &CalibrationParameters, t_fine: TFine) -> Option<f32> {
    let p1 = c.dig_p1 as i64;
    let p2 = c.dig_p2 as i64;
    let p3 = c.dig_p3 as i64;
    let p4 = c.dig_p4 as i64;
    let p5 = c.dig_p5 as i64;
    let p6 = c.dig_p6 as i64;
    let p7 = c.dig_p7 as i64;
    let p8 = c.dig_p8 as i64;
    let p9 = c.dig_p9 as i64;

    let mut var1 = t_fine.0 as i64 - 128000;
    let mut var2 = var1.wrapping_mul(var1).wrapping_mul(p6);
    var2 = var2.wrapping_add(var1.wrapping_mul(p5) << 17);
    var2 = var2.wrapping_add(p4 << 35);
    var1 = (var1.wrapping_mul(var1).wrapping_mul(p3) >> 8).wrapping_add(var1.wrapping_mul(p2) << 12);
    var1 = (1i64 << 47).wrapping_add(var1).wrapping_mul(p1) >> 33;

    if var1 == 0 {
        return None;
    }

    let mut p = 1048576 - adc_p as i64;
    p = (p << 31).wrapping_sub(var2).wrapping_mul(3125).wrapping_div(var1);
    var1 = p9.wrapping_mul(p >> 13).wrapping_mul(p >> 13) >> 25;
    var2 = p8.wrapping_mul(p) >> 19;
    p = (p.wrapping_add(var1).wrapping_add(var2) >> 8).wrapping_add(p7 << 4);

    // Q24.8
    Some((p as f64 / 256.0) as f32)
}

fn pressure_float(adc_p: u32, c: &CalibrationParameters, t_fine: TFine) -> Option<f32> {
    let p1 = c.dig_p1 as f64;
    let p2 = c.dig_p2 as f64;
    let p3 = c.dig_p3 as f64;
    let p4 = c.dig_p4 as f64;
    let p5 = c.dig_p5 as f64;
    let p6 = c.dig_p6 as f64;
    let p7 = c.dig_p7 as f64;
    let p8 = c.dig_p8 as f64;
    let p9 = c.dig_p9 as f64;

    let mut var1 = t_fine.0 as f64 / 2.0 - 64000.0;
    let mut var2 = var1 * var1 * p6 / 32768.0;
    var2 += var1 * p5 * 2.0;
    var2 = var2 / 4.0 + p4 * 65536.0;
    var1 = (p3 * var1 * var1 / 524288.0 + p2 * var1) / 524288.0;
    var1 = (1.0 + var1 / 32768.0) * p1;

    if var1 == 0.0 {
        return None;
    }

    let mut p = 1048576.0 - adc_p as f64;
    p = (p - var2 / 4096.0) * 6250.0 / var1;
    var1 = p9 * p * p / 2147483648.0;
    var2 = p * p8 / 32768.0;
    p += (var1 + var2 + p7) / 16.0;

    Some(p as f32)
}

fn pressure_fixed32(adc_p: u32, c: &CalibrationParameters, t_fine: TFine) -> Option<f32> {
    let p1 = c.dig_p1 as i32;
    let p2 = c.dig_p2 as i32;
    let p3 = c.dig_p3 as i32;
    let p4 = c.dig_p4 as i32;
    let p5 = c.dig_p5 as i32;
    let p6 = c.dig_p6 as i32;
    let p7 = c.dig_p7 as i32;
    let p8 = c.dig_p8 as i32;
    let p9 = c.dig_p9 as i32;

    let mut var1 = (t_fine.0 >> 1) - 64000;
    let mut var2 = ((var1 >> 2).wrapping_mul(var1 >> 2) >> 11).wrapping_mul(p6);
    var2 = var2.wrapping_add(var1.wrapping_mul(p5) << 1);
    var2 = (var2 >> 2).wrapping_add(p4 << 16);
    var1 = ((p3.wrapping_mul((var1 >> 2).wrapping_mul(var1 >> 2) >> 13) >> 3)
        .wrapping_add(p2.wrapping_mul(var1) >> 1))
        >> 18;
    var1 = 32768i32.wrapping_add(var1).wrapping_mul(p1) >> 15;

    if var1 == 0 {
        return None;
    }

    let mut p = (1048576i32.wrapping_sub(adc_p as i32) as u32)
        .wrapping_sub((var2 >> 12) as u32)
        .wrapping_mul(3125);
    // Doubling first would overflow the unsigned numerator
    p = if p < 0x8000_0000 {
        (p << 1) / var1 as u32
    } else {
        (p / var1 as u32).wrapping_mul(2)
    };

    let var1 = p9.wrapping_mul(((p >> 3).wrapping_mul(p >> 3) >> 13) as i32) >> 12;
    let var2 = ((p >> 2) as i32).wrapping_mul(p8) >> 13;
    let p = (p as i32).wrapping_add((var1 + var2 + p7) >> 4) as u32;

    Some(p as f32)
}
