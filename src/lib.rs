//! Driver for the Bosch BMP280 barometric pressure and temperature sensor.
//!
//! Built on the blocking `embedded-hal` 1.0 traits. The device can be attached over SPI
//! ([`Bmp280::new_spi`]) or I2C ([`Bmp280::new_i2c`]).
//!
//! ```rust,no_run
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::spi::SpiDevice;
//! use bmp280_rs::{Bmp280, Bmp280Result, Compensator, ResetPolicy};
//! use bmp280_rs::config::{Configuration, Preset};
//! # fn demo<S: SpiDevice, D: DelayNs>(spi: S, mut delay: D) -> Bmp280Result<(), S::Error> {
//!
//! let mut device = Bmp280::new_spi(spi).init(
//!     Configuration::from_preset(Preset::WeatherMonitoring),
//!     ResetPolicy::Soft,
//!     &mut delay,
//! )?;
//! device.set_compensator(Compensator::FixedPoint64);
//!
//! let sample = device.measure_forced(&mut delay)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `defmt`: derives `defmt::Format` for the public data types
//! - `uom`: unit-typed accessors on [`CompensatedSample`]
#![cfg_attr(not(test), no_std)]

pub mod bus;
pub mod compensation;
pub mod config;
pub mod error;
pub mod register;

mod bmp280;
mod calibration;

#[cfg(test)]
mod testing;

pub use bmp280::{
    Bmp280, CalibrationLoaded, Configured, ResetPolicy, SdoPinState, Uninitialized, BMP280_CHIP_IDS,
};
pub use calibration::CalibrationParameters;
pub use compensation::{CompensatedSample, Compensator, TFine};
pub use error::{Bmp280Error, Bmp280Result};
pub use register::data::RawSample;
pub use register::status::DeviceStatus;
