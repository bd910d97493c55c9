use crate::calibration::CalibrationParameters;
use crate::register::{Readable, Reg};

/// Marker struct for the calibration block (0x88 - 0x9F).
///
/// Twelve little-endian words trimmed into NVM at the factory. `dig_t1` and `dig_p1` are
/// unsigned, the rest are signed.
///
/// - **Length:** 24 bytes
/// - **Access:** Read-only
pub struct Calibration;
impl Reg for Calibration { const ADDR: u8 = 0x88; }

impl Readable for Calibration {
    type Out = CalibrationParameters;

    const N: usize = 24;
    fn decode(b: &[u8]) -> Self::Out {
        CalibrationParameters {
            dig_t1: u16::from_le_bytes([b[0], b[1]]),
            dig_t2: i16::from_le_bytes([b[2], b[3]]),
            dig_t3: i16::from_le_bytes([b[4], b[5]]),
            dig_p1: u16::from_le_bytes([b[6], b[7]]),
            dig_p2: i16::from_le_bytes([b[8], b[9]]),
            dig_p3: i16::from_le_bytes([b[10], b[11]]),
            dig_p4: i16::from_le_bytes([b[12], b[13]]),
            dig_p5: i16::from_le_bytes([b[14], b[15]]),
            dig_p6: i16::from_le_bytes([b[16], b[17]]),
            dig_p7: i16::from_le_bytes([b[18], b[19]]),
            dig_p8: i16::from_le_bytes([b[20], b[21]]),
            dig_p9: i16::from_le_bytes([b[22], b[23]]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::REFERENCE_CALIBRATION_BYTES;

    #[test]
    fn calibration_decode() {
        let calib = Calibration::decode(&REFERENCE_CALIBRATION_BYTES);

        assert_eq!(27504, calib.dig_t1);
        assert_eq!(26435, calib.dig_t2);
        assert_eq!(-1000, calib.dig_t3);
        assert_eq!(36477, calib.dig_p1);
        assert_eq!(-10685, calib.dig_p2);
        assert_eq!(3024, calib.dig_p3);
        assert_eq!(2855, calib.dig_p4);
        assert_eq!(140, calib.dig_p5);
        assert_eq!(-7, calib.dig_p6);
        assert_eq!(15500, calib.dig_p7);
        assert_eq!(-14600, calib.dig_p8);
        assert_eq!(6000, calib.dig_p9);
    }

    #[test]
    fn calibration_decode_signedness() {
        // All ones: the unsigned words are 65535, every signed word is -1
        let calib = Calibration::decode(&[0xFF; 24]);

        assert_eq!(u16::MAX, calib.dig_t1);
        assert_eq!(u16::MAX, calib.dig_p1);
        assert_eq!(-1, calib.dig_t2);
        assert_eq!(-1, calib.dig_t3);
        assert_eq!(-1, calib.dig_p2);
        assert_eq!(-1, calib.dig_p9);
    }
}
