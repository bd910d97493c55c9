//! ### CTRL_MEAS - Data acquisition options (`0xF4`, 1 byte, R/W)
//!
//! Holds the temperature and pressure oversampling and the power mode of the device.
//!
//! | Bits  | Field    |
//! |-------|----------|
//! | 7..5  | osrs_t   |
//! | 4..2  | osrs_p   |
//! | 1..0  | mode     |
//!
//! Writing this register is what latches a power mode change, so it must always be written
//! *after* [`Config`](crate::register::config::Config).
//!
//! ### Default values
//! 0x00 (both measurements skipped, sleep mode)
#![doc(alias = "CTRL_MEAS")]
use crate::register::{Readable, Reg, Writable};

/// Marker type for CTRL_MEAS (0xF4) register
pub struct CtrlMeas;
impl Reg for CtrlMeas { const ADDR: u8 = 0xF4; }

/// The payload for the CTRL_MEAS (0xF4) register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CtrlMeasFields {
    pub osrs_t: Oversampling,
    pub osrs_p: Oversampling,
    pub mode: PowerMode,
}

impl Readable for CtrlMeas {
    type Out = CtrlMeasFields;

    fn decode(b: &[u8]) -> Self::Out {
        CtrlMeasFields {
            osrs_t: Oversampling::from((b[0] >> 5) & 0b111),
            osrs_p: Oversampling::from((b[0] >> 2) & 0b111),
            mode: PowerMode::from(b[0] & 0b11),
        }
    }
}

impl Writable for CtrlMeas {
    type In = CtrlMeasFields;

    fn encode(v: &Self::In, out: &mut [u8]) {
        let osrs_t: u8 = v.osrs_t.into();
        let osrs_p: u8 = v.osrs_p.into();
        let mode: u8 = v.mode.into();
        out[0] = (osrs_t << 5) | (osrs_p << 2) | mode;
    }
}

/// Oversampling setting for the temperature or pressure measurement.
///
/// Higher oversampling lowers noise at the cost of a longer conversion. [`Oversampling::Skip`]
/// disables the measurement entirely; the data registers then hold `0x80000`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oversampling {
    /// Measurement skipped
    Skip,
    /// 16 bit resolution
    X1,
    /// 17 bit resolution
    X2,
    /// 18 bit resolution
    X4,
    /// 19 bit resolution
    X8,
    /// 20 bit resolution
    X16,
}

impl Oversampling {
    /// Number of ADC samples taken per measurement.
    pub fn samples(self) -> u32 {
        match self {
            Oversampling::Skip => 0,
            Oversampling::X1 => 1,
            Oversampling::X2 => 2,
            Oversampling::X4 => 4,
            Oversampling::X8 => 8,
            Oversampling::X16 => 16,
        }
    }
}

impl From<u8> for Oversampling {
    fn from(field: u8) -> Self {
        match field {
            0b000 => Oversampling::Skip,
            0b001 => Oversampling::X1,
            0b010 => Oversampling::X2,
            0b011 => Oversampling::X4,
            0b100 => Oversampling::X8,
            // 0b110 and 0b111 behave like 0b101
            _ => Oversampling::X16,
        }
    }
}

impl From<Oversampling> for u8 {
    fn from(value: Oversampling) -> Self {
        match value {
            Oversampling::Skip => 0b000,
            Oversampling::X1 => 0b001,
            Oversampling::X2 => 0b010,
            Oversampling::X4 => 0b011,
            Oversampling::X8 => 0b100,
            Oversampling::X16 => 0b101,
        }
    }
}

/// Describes the different power modes that can be set in the CTRL_MEAS register.
///
/// For more information, see section 3.6 in the datasheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// Sleep mode. This is the default mode after power on reset.
    Sleep,
    /// Forced mode. A single measurement is performed, after which the device returns to Sleep mode.
    Forced,
    /// Normal mode. Measurements are performed continuously, separated by the standby time.
    Normal,
}

impl From<u8> for PowerMode {
    fn from(field: u8) -> Self {
        match field {
            0b00 => PowerMode::Sleep,
            0b01 | 0b10 => PowerMode::Forced,
            _ => PowerMode::Normal,
        }
    }
}

impl From<PowerMode> for u8 {
    fn from(value: PowerMode) -> Self {
        match value {
            PowerMode::Sleep => 0b00,
            PowerMode::Forced => 0b01,
            PowerMode::Normal => 0b11,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_meas_decode() {
        let reg = CtrlMeas::decode(&[0b0000_0000]);
        assert_eq!(Oversampling::Skip, reg.osrs_t);
        assert_eq!(Oversampling::Skip, reg.osrs_p);
        assert_eq!(PowerMode::Sleep, reg.mode);

        let reg = CtrlMeas::decode(&[0b0010_0101]);
        assert_eq!(Oversampling::X1, reg.osrs_t);
        assert_eq!(Oversampling::X1, reg.osrs_p);
        assert_eq!(PowerMode::Forced, reg.mode);

        let reg = CtrlMeas::decode(&[0b1011_0111]);
        assert_eq!(Oversampling::X16, reg.osrs_t);
        assert_eq!(Oversampling::X16, reg.osrs_p);
        assert_eq!(PowerMode::Normal, reg.mode);
    }

    #[test]
    fn ctrl_meas_decode_aliases() {
        // 0b10 is a second encoding of forced mode
        let reg = CtrlMeas::decode(&[0b0000_0010]);
        assert_eq!(PowerMode::Forced, reg.mode);

        // 0b110 and 0b111 oversampling read back as x16
        let reg = CtrlMeas::decode(&[0b1101_1100]);
        assert_eq!(Oversampling::X16, reg.osrs_t);
        assert_eq!(Oversampling::X16, reg.osrs_p);
    }

    #[test]
    fn ctrl_meas_encode() {
        let mut buffer = [0u8; 1];
        CtrlMeas::encode(&CtrlMeasFields {
            osrs_t: Oversampling::Skip,
            osrs_p: Oversampling::Skip,
            mode: PowerMode::Sleep,
        }, &mut buffer);
        assert_eq!([0b0000_0000], buffer);

        CtrlMeas::encode(&CtrlMeasFields {
            osrs_t: Oversampling::X2,
            osrs_p: Oversampling::X16,
            mode: PowerMode::Forced,
        }, &mut buffer);
        assert_eq!([0b0101_0101], buffer);

        CtrlMeas::encode(&CtrlMeasFields {
            osrs_t: Oversampling::X1,
            osrs_p: Oversampling::X4,
            mode: PowerMode::Normal,
        }, &mut buffer);
        assert_eq!([0b0010_1111], buffer);
    }
}
