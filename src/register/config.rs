//! ### CONFIG - Rate, filter and interface options (`0xF5`, 1 byte, R/W)
//!
//! | Bits  | Field    |
//! |-------|----------|
//! | 7..5  | t_sb     |
//! | 4..2  | filter   |
//! | 0     | spi3w_en |
//!
//! Writes to this register may be ignored by the device in normal mode, which is why the driver
//! always writes it before [`CtrlMeas`](crate::register::ctrl_meas::CtrlMeas).
//!
//! ### Default values
//! 0x00 (0.5 ms standby, filter off, 4-wire SPI)
#![doc(alias = "CONFIG")]
use crate::register::{Readable, Reg, Writable};

/// Marker type for CONFIG (0xF5) register
pub struct Config;
impl Reg for Config { const ADDR: u8 = 0xF5; }

/// The payload for the CONFIG (0xF5) register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigFields {
    /// Inactive duration between measurements in normal mode.
    pub t_sb: StandbyTime,
    /// The IIR filter coefficient.
    ///
    /// Read more about the IIR filter in the datasheet section 3.3.3
    pub filter: IIRFilterCoefficient,
    /// Enables the 3-wire SPI interface.
    pub spi3w_en: bool,
}

impl Readable for Config {
    type Out = ConfigFields;

    fn decode(b: &[u8]) -> Self::Out {
        ConfigFields {
            t_sb: StandbyTime::from((b[0] >> 5) & 0b111),
            filter: IIRFilterCoefficient::from((b[0] >> 2) & 0b111),
            spi3w_en: (b[0] & 0b1) != 0,
        }
    }
}

impl Writable for Config {
    type In = ConfigFields;

    fn encode(v: &Self::In, out: &mut [u8]) {
        let t_sb: u8 = v.t_sb.into();
        let filter: u8 = v.filter.into();
        out[0] = (t_sb << 5) | (filter << 2) | v.spi3w_en as u8;
    }
}

/// Standby time between two measurements in normal mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StandbyTime {
    /// 0.5 ms
    Ms0p5,
    /// 62.5 ms
    Ms62p5,
    /// 125 ms
    Ms125,
    /// 250 ms
    Ms250,
    /// 500 ms
    Ms500,
    /// 1000 ms
    Ms1000,
    /// 2000 ms
    Ms2000,
    /// 4000 ms
    Ms4000,
}

impl StandbyTime {
    /// Standby duration in microseconds.
    pub fn duration_us(self) -> u32 {
        match self {
            StandbyTime::Ms0p5 => 500,
            StandbyTime::Ms62p5 => 62_500,
            StandbyTime::Ms125 => 125_000,
            StandbyTime::Ms250 => 250_000,
            StandbyTime::Ms500 => 500_000,
            StandbyTime::Ms1000 => 1_000_000,
            StandbyTime::Ms2000 => 2_000_000,
            StandbyTime::Ms4000 => 4_000_000,
        }
    }
}

impl From<u8> for StandbyTime {
    fn from(field: u8) -> Self {
        match field {
            0b000 => StandbyTime::Ms0p5,
            0b001 => StandbyTime::Ms62p5,
            0b010 => StandbyTime::Ms125,
            0b011 => StandbyTime::Ms250,
            0b100 => StandbyTime::Ms500,
            0b101 => StandbyTime::Ms1000,
            0b110 => StandbyTime::Ms2000,
            _ => StandbyTime::Ms4000,
        }
    }
}

impl From<StandbyTime> for u8 {
    fn from(value: StandbyTime) -> Self {
        match value {
            StandbyTime::Ms0p5 => 0b000,
            StandbyTime::Ms62p5 => 0b001,
            StandbyTime::Ms125 => 0b010,
            StandbyTime::Ms250 => 0b011,
            StandbyTime::Ms500 => 0b100,
            StandbyTime::Ms1000 => 0b101,
            StandbyTime::Ms2000 => 0b110,
            StandbyTime::Ms4000 => 0b111,
        }
    }
}

/// This enum holds all configurable IIR filter coefficients.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IIRFilterCoefficient {
    /// Filter off
    Off,
    /// Filter coefficient is 2
    X2,
    /// Filter coefficient is 4
    X4,
    /// Filter coefficient is 8
    X8,
    /// Filter coefficient is 16
    X16,
}

impl From<IIRFilterCoefficient> for u8 {
    fn from(value: IIRFilterCoefficient) -> Self {
        match value {
            IIRFilterCoefficient::Off => 0b000,
            IIRFilterCoefficient::X2 => 0b001,
            IIRFilterCoefficient::X4 => 0b010,
            IIRFilterCoefficient::X8 => 0b011,
            IIRFilterCoefficient::X16 => 0b100,
        }
    }
}

impl From<u8> for IIRFilterCoefficient {
    fn from(field: u8) -> Self {
        match field {
            0b000 => IIRFilterCoefficient::Off,
            0b001 => IIRFilterCoefficient::X2,
            0b010 => IIRFilterCoefficient::X4,
            0b011 => IIRFilterCoefficient::X8,
            _ => IIRFilterCoefficient::X16,
        }
    }
}
