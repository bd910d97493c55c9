//! Typed register markers for the BMP280.
//!
//! Each register (or fixed-size register block) is a zero-sized marker type that knows its
//! address, its transfer length and how to encode/decode its payload. The markers are used with
//! [`Bmp280::read`](crate::Bmp280::read) and [`Bmp280::write`](crate::Bmp280::write), or through
//! the [`Bus`](crate::bus::Bus) trait directly.
//!
//! | Register    | Address       | Length | Access |
//! |-------------|---------------|--------|--------|
//! | calibration | `0x88..=0x9F` | 24     | R      |
//! | chip id     | `0xD0`        | 1      | R      |
//! | reset       | `0xE0`        | 1      | W      |
//! | status      | `0xF3`        | 1      | R      |
//! | ctrl_meas   | `0xF4`        | 1      | R/W    |
//! | config      | `0xF5`        | 1      | R/W    |
//! | data        | `0xF7..=0xFC` | 6      | R      |

pub mod calibration;
pub mod chip_id;
pub mod config;
pub mod ctrl_meas;
pub mod data;
pub mod reset;
pub mod status;

use crate::config::Configuration;

pub trait Reg { const ADDR: u8; }

pub trait Readable: Reg {
    type Out;
    const N: usize = 1;
    fn decode(b: &[u8]) -> Self::Out;
}

pub trait Writable: Reg {
    type In;
    const N: usize = 1;
    fn encode(v: &Self::In, out: &mut [u8]);
}

/// Packs a [`Configuration`] into its `(config, ctrl_meas)` register bytes.
///
/// The bytes are returned in the order they must be written to the device: `config` first, then
/// `ctrl_meas`, since writing `ctrl_meas` is what latches a power mode transition.
pub fn encode_config(configuration: &Configuration) -> (u8, u8) {
    let mut config_byte = [0u8; 1];
    let mut ctrl_meas_byte = [0u8; 1];

    config::Config::encode(&configuration.config_fields(), &mut config_byte);
    ctrl_meas::CtrlMeas::encode(&configuration.ctrl_meas_fields(), &mut ctrl_meas_byte);

    (config_byte[0], ctrl_meas_byte[0])
}

/// Inverse of [`encode_config`].
pub fn decode_config(config_byte: u8, ctrl_meas_byte: u8) -> Configuration {
    Configuration::from_fields(
        config::Config::decode(&[config_byte]),
        ctrl_meas::CtrlMeas::decode(&[ctrl_meas_byte]),
    )
}

/// Decodes a raw STATUS byte. Every bit pattern is valid; the two flags are independent.
pub fn decode_status(byte: u8) -> status::DeviceStatus {
    status::Status::decode(&[byte])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::config::{IIRFilterCoefficient, StandbyTime};
    use crate::register::ctrl_meas::{Oversampling, PowerMode};

    const OVERSAMPLING: [Oversampling; 6] = [
        Oversampling::Skip,
        Oversampling::X1,
        Oversampling::X2,
        Oversampling::X4,
        Oversampling::X8,
        Oversampling::X16,
    ];

    const POWER_MODES: [PowerMode; 3] = [PowerMode::Sleep, PowerMode::Forced, PowerMode::Normal];

    const STANDBY: [StandbyTime; 8] = [
        StandbyTime::Ms0p5,
        StandbyTime::Ms62p5,
        StandbyTime::Ms125,
        StandbyTime::Ms250,
        StandbyTime::Ms500,
        StandbyTime::Ms1000,
        StandbyTime::Ms2000,
        StandbyTime::Ms4000,
    ];

    const FILTERS: [IIRFilterCoefficient; 5] = [
        IIRFilterCoefficient::Off,
        IIRFilterCoefficient::X2,
        IIRFilterCoefficient::X4,
        IIRFilterCoefficient::X8,
        IIRFilterCoefficient::X16,
    ];

    #[test]
    fn encode_default_configuration() {
        let (config_byte, ctrl_meas_byte) = encode_config(&Configuration::default());

        // 62.5 ms standby, filter 16, 3-wire SPI off
        assert_eq!(0b001_100_0_0, config_byte);
        // x16 / x16 / normal
        assert_eq!(0b101_101_11, ctrl_meas_byte);
    }

    #[test]
    fn configuration_round_trip() {
        for os_t in OVERSAMPLING {
            for os_p in OVERSAMPLING {
                for mode in POWER_MODES {
                    for standby in STANDBY {
                        for filter in FILTERS {
                            for spi3w in [false, true] {
                                let cfg = Configuration::default()
                                    .temperature_oversampling(os_t)
                                    .pressure_oversampling(os_p)
                                    .power_mode(mode)
                                    .standby_time(standby)
                                    .iir_filter_coefficient(filter)
                                    .spi3w_enable(spi3w);

                                let (config_byte, ctrl_meas_byte) = encode_config(&cfg);
                                assert_eq!(cfg, decode_config(config_byte, ctrl_meas_byte));
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn status_flags_are_independent() {
        let status = decode_status(0b0000_0000);
        assert_eq!([false, false], [status.measuring(), status.im_update()]);

        let status = decode_status(0b0000_1000);
        assert_eq!([true, false], [status.measuring(), status.im_update()]);

        let status = decode_status(0b0000_0001);
        assert_eq!([false, true], [status.measuring(), status.im_update()]);

        let status = decode_status(0b0000_1001);
        assert_eq!([true, true], [status.measuring(), status.im_update()]);

        // Reserved bits are ignored
        let status = decode_status(0b1111_0110);
        assert_eq!([false, false], [status.measuring(), status.im_update()]);
    }
}
