//! Errors that can occur when using the BMP280 device.
//!
//! This module provides an error type that encapsulates all possible errors that can occur during communication with BMP280.
//! It is generic over the underlying bus (spi/i2c) error type.
//!
//! A compensation denominator of zero is not an error: the affected value is reported as `0`.

/// This represents all possible errors that can occur when using the BMP280 device.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bmp280Error<BusError> {
    /// An error has occurred in the SPI / I2C driver
    Bus(BusError),

    /// Unable to communicate with BMP280
    ///
    /// The chip id register never returned a known BMP280 id.
    /// Could possibly indicate an error with pin configuration and/or wiring.
    NotConnected,

    /// The device stayed busy (`measuring` or `im_update` set) for longer than the allowed number of polls.
    Timeout,
}

/// Type alias used to simplify return types throughout the driver
pub type Bmp280Result<T, BusError> = Result<T, Bmp280Error<BusError>>;
