use crate::bus::{Bus, I2c, Spi};
use crate::calibration::CalibrationParameters;
use crate::compensation::{CompensatedSample, Compensator};
use crate::config::Configuration;
use crate::error::{Bmp280Error, Bmp280Result};
use crate::register;
use crate::register::ctrl_meas::PowerMode;
use crate::register::data::RawSample;
use crate::register::status::DeviceStatus;
use crate::register::{chip_id, data, reset, status, Readable, Reg, Writable};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::SevenBitAddress;

/// Chip ids reported by the BMP280. 0x58 is mass production, 0x56 and 0x57 are engineering samples.
pub const BMP280_CHIP_IDS: [u8; 3] = [0x56, 0x57, 0x58];

/// Start-up time after power-on or a soft reset, datasheet table 2
const STARTUP_TIME_MS: u32 = 2;

const PROBE_ATTEMPTS: u32 = 5;
const RESET_POLLS: u32 = 32;
const FORCED_POLLS: u32 = 10;
const POLL_INTERVAL_US: u32 = 500;

/// Driver state: bus attached, nothing known about the device yet.
pub struct Uninitialized;

/// Driver state: calibration has been read, the operating mode has not been set.
pub struct CalibrationLoaded {
    calibration: CalibrationParameters,
}

/// Driver state: ready to produce samples.
pub struct Configured {
    calibration: CalibrationParameters,
    configuration: Configuration,
}

/// BMP280 driver.
///
/// The driver moves through three states. Compensation is only available once calibration has
/// been loaded, so it is not possible to compensate with missing calibration data.
///
/// ```text
///  new_spi / new_i2c                 load_calibration                 configure
/// ------------------> Uninitialized -----------------> CalibrationLoaded ---------> Configured
///                          ^                                                           |
///                          +------------------------ soft_reset -----------------------+
/// ```
///
/// [`Bmp280::init`] walks the whole path in one call.
pub struct Bmp280<B, S = Configured> {
    bus: B,
    compensator: Compensator,
    state: S,
}

impl<T> Bmp280<Spi<T>, Uninitialized>
where
    T: embedded_hal::spi::SpiDevice,
{
    /// Attaches the driver to a BMP280 on an SPI bus. No I/O is performed.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use embedded_hal::delay::DelayNs;
    /// # use embedded_hal::spi::SpiDevice;
    /// # use bmp280_rs::Bmp280Result;
    /// use bmp280_rs::{Bmp280, ResetPolicy};
    /// use bmp280_rs::config::Configuration;
    /// # fn demo<S: SpiDevice, D: DelayNs>(spi: S, mut delay: D) -> Bmp280Result<(), S::Error> {
    ///
    /// let mut device = Bmp280::new_spi(spi)
    ///     .init(Configuration::default(), ResetPolicy::Soft, &mut delay)?;
    ///
    /// let sample = device.read_sample()?;
    /// println!("{} °C, {} Pa", sample.temperature, sample.pressure);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new_spi(spi: T) -> Self {
        Self::new(Spi::new(spi))
    }
}

impl<T> Bmp280<I2c<T>, Uninitialized>
where
    T: embedded_hal::i2c::I2c,
{
    /// Attaches the driver to a BMP280 on an I2C bus. No I/O is performed.
    ///
    /// The I2C address is selected by the SDO pin, so the driver needs to know how it is wired.
    pub fn new_i2c(i2c: T, sdo_pin_state: SdoPinState) -> Self {
        Self::new(I2c::new(i2c, sdo_pin_state.into()))
    }
}

impl<T, S> Bmp280<Spi<T>, S>
where
    T: embedded_hal::spi::SpiDevice,
{
    /// Destroys the driver and gives back the SPI device.
    pub fn release(self) -> T {
        self.bus.release()
    }
}

impl<T, S> Bmp280<I2c<T>, S>
where
    T: embedded_hal::i2c::I2c,
{
    /// Destroys the driver and gives back the I2C bus.
    pub fn release(self) -> T {
        self.bus.release()
    }
}

impl<B> Bmp280<B, Uninitialized>
where
    B: Bus,
{
    pub(crate) fn new(bus: B) -> Self {
        Bmp280 {
            bus,
            compensator: Compensator::default(),
            state: Uninitialized,
        }
    }

    /// Probes if the device is ready by attempting to read ChipId `attempts` times with a 1 ms delay.
    ///
    /// Returns [`Bmp280Error::NotConnected`] if no BMP280 answers.
    fn probe_ready<D: DelayNs>(
        bus: &mut B,
        delay: &mut D,
        attempts: u32,
    ) -> Bmp280Result<(), B::Error> {
        for _ in 0..attempts {
            if let Ok(id) = bus.read::<chip_id::ChipId>() {
                if BMP280_CHIP_IDS.contains(&id) {
                    return Ok(());
                }

                log::warn!("unexpected chip id {:#04x}", id);
            }

            delay.delay_ms(1);
        }

        Err(Bmp280Error::NotConnected)
    }

    /// Probes the device, optionally resets it, loads calibration and applies `config`.
    ///
    /// The datasheet (table 2) specifies a 2 ms start-up time, so the probe retries for a few
    /// milliseconds before giving up with [`Bmp280Error::NotConnected`].
    pub fn init<D: DelayNs>(
        mut self,
        config: Configuration,
        reset: ResetPolicy,
        delay: &mut D,
    ) -> Bmp280Result<Bmp280<B, Configured>, B::Error> {
        Self::probe_ready(&mut self.bus, delay, PROBE_ATTEMPTS)?;

        if reset == ResetPolicy::Soft {
            self.reset(delay)?;
        }

        self.load_calibration()?.configure(config)
    }

    /// Issues a soft reset and waits until the NVM has been copied into the image registers.
    ///
    /// Returns [`Bmp280Error::Timeout`] if `im_update` does not clear.
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Bmp280Result<(), B::Error> {
        self.bus.write::<reset::Reset>(&reset::ResetCommand::SoftReset)?;
        delay.delay_ms(STARTUP_TIME_MS);

        poll_status(&mut self.bus, delay, RESET_POLLS, 1000, |s| s.im_update())?;
        log::debug!("soft reset complete");

        Ok(())
    }

    /// Reads the calibration block. Must happen before any sample can be compensated.
    pub fn load_calibration(mut self) -> Bmp280Result<Bmp280<B, CalibrationLoaded>, B::Error> {
        let calibration = CalibrationParameters::load(&mut self.bus)?;

        Ok(Bmp280 {
            bus: self.bus,
            compensator: self.compensator,
            state: CalibrationLoaded { calibration },
        })
    }
}

impl<B> Bmp280<B, CalibrationLoaded>
where
    B: Bus,
{
    /// Writes `config` to the device.
    pub fn configure(mut self, config: Configuration) -> Bmp280Result<Bmp280<B, Configured>, B::Error> {
        write_configuration(&mut self.bus, &config)?;

        Ok(Bmp280 {
            bus: self.bus,
            compensator: self.compensator,
            state: Configured {
                calibration: self.state.calibration,
                configuration: config,
            },
        })
    }

    pub fn calibration(&self) -> &CalibrationParameters {
        &self.state.calibration
    }
}

impl<B, S> Bmp280<B, S>
where
    B: Bus,
{
    /// Reads the chip id register.
    pub fn chip_id(&mut self) -> Bmp280Result<u8, B::Error> {
        self.bus.read::<chip_id::ChipId>()
    }

    /// Determines if a BMP280 is connected by reading the [`ChipId`](chip_id::ChipId) (0xD0) register.
    pub fn is_connected(&mut self) -> Bmp280Result<bool, B::Error> {
        let id = self.chip_id()?;

        Ok(BMP280_CHIP_IDS.contains(&id))
    }

    /// Returns the status from the STATUS (0xF3) register.
    pub fn status(&mut self) -> Bmp280Result<DeviceStatus, B::Error> {
        self.bus.read::<status::Status>()
    }

    /// Selects the compensation formulas used by [`Bmp280::read_sample`].
    pub fn set_compensator(&mut self, compensator: Compensator) {
        self.compensator = compensator;
    }

    pub fn compensator(&self) -> Compensator {
        self.compensator
    }
}

impl<B> Bmp280<B, Configured>
where
    B: Bus,
{
    /// Writes a new configuration to the device, `config` (0xF5) first and `ctrl_meas` (0xF4) second.
    ///
    /// Writing CTRL_MEAS is what starts a power mode transition, so the filter and standby settings
    /// are in place before the device starts measuring with them.
    pub fn apply_configuration(&mut self, config: &Configuration) -> Bmp280Result<(), B::Error> {
        write_configuration(&mut self.bus, config)?;
        self.state.configuration = *config;

        Ok(())
    }

    /// Changes only the power mode. Both configuration registers are still written.
    ///
    /// From sleep mode, [`PowerMode::Forced`] performs a single measurement after which the device
    /// returns to sleep. See [`Bmp280::measure_forced`].
    pub fn set_power_mode(&mut self, mode: PowerMode) -> Bmp280Result<(), B::Error> {
        let config = self.state.configuration.power_mode(mode);
        self.apply_configuration(&config)
    }

    /// The configuration most recently written to the device.
    pub fn configuration(&self) -> &Configuration {
        &self.state.configuration
    }

    pub fn calibration(&self) -> &CalibrationParameters {
        &self.state.calibration
    }

    /// Reads the raw ADC values of the latest measurement in one burst.
    pub fn read_raw(&mut self) -> Bmp280Result<RawSample, B::Error> {
        let raw = self.bus.read::<data::Data>()?;
        log::trace!("raw sample {:?}", raw);

        Ok(raw)
    }

    /// Reads the latest measurement and compensates it with the selected [`Compensator`].
    ///
    /// The data registers are read as they are; this does not wait for a measurement to finish.
    /// In normal mode the device refreshes them every
    /// [`Configuration::normal_mode_period_us`] microseconds.
    ///
    /// # Examples
    ///
    /// ```rust, no_run
    /// # use bmp280_rs::{Bmp280, Bmp280Result};
    /// # use bmp280_rs::bus::Bus;
    /// # fn demo<B: Bus>(mut device: Bmp280<B>) -> Bmp280Result<(), B::Error> {
    /// let sample = device.read_sample()?;
    /// println!("The current pressure and temperature is {} and {}", sample.pressure, sample.temperature);
    /// # Ok(()) }
    /// ```
    pub fn read_sample(&mut self) -> Bmp280Result<CompensatedSample, B::Error> {
        let raw = self.read_raw()?;

        Ok(self.compensator.compensate(raw, &self.state.calibration))
    }

    /// Polls STATUS until neither `measuring` nor `im_update` is set.
    ///
    /// Waits 0.5 ms between polls and returns [`Bmp280Error::Timeout`] after `max_polls` busy reads.
    pub fn wait_until_ready<D: DelayNs>(&mut self, delay: &mut D, max_polls: u32) -> Bmp280Result<(), B::Error> {
        poll_status(&mut self.bus, delay, max_polls, POLL_INTERVAL_US, |s| !s.is_idle())
    }

    /// Triggers a single measurement in forced mode and returns it once it is done.
    ///
    /// The stored configuration is re-applied with [`PowerMode::Forced`]. Afterwards the device is
    /// back in sleep mode and [`configuration`](Self::configuration) reports [`PowerMode::Sleep`].
    pub fn measure_forced<D: DelayNs>(&mut self, delay: &mut D) -> Bmp280Result<CompensatedSample, B::Error> {
        self.set_power_mode(PowerMode::Forced)?;

        delay.delay_us(self.max_measurement_time_us());
        self.wait_until_ready(delay, FORCED_POLLS)?;

        // The device drops back to sleep once the conversion is done
        self.state.configuration = self.state.configuration.power_mode(PowerMode::Sleep);

        self.read_sample()
    }

    /// Returns the maximum measurement time in microseconds for the current configuration.
    ///
    /// See [`Configuration::max_measurement_time_us`].
    pub fn max_measurement_time_us(&self) -> u32 {
        self.state.configuration.max_measurement_time_us()
    }

    /// Issues a soft reset. The device returns to its power-on defaults, so the calibration and
    /// configuration held by the driver are discarded.
    pub fn soft_reset<D: DelayNs>(self, delay: &mut D) -> Bmp280Result<Bmp280<B, Uninitialized>, B::Error> {
        let mut device = Bmp280 {
            bus: self.bus,
            compensator: self.compensator,
            state: Uninitialized,
        };
        device.reset(delay)?;

        Ok(device)
    }

    /// Read a register (or fixed-size register block) using a **typed marker**.
    ///
    /// You pass a marker type from [`crate::register`] and get back its decoded value (`R::Out`).
    /// The convenience methods are easier to discover; this is here when you want full control.
    ///
    /// # Examples
    /// ```rust,no_run
    /// # use bmp280_rs::{register, Bmp280, Bmp280Result};
    /// # use bmp280_rs::bus::Bus;
    /// # fn demo<B: Bus>(mut device: Bmp280<B>) -> Bmp280Result<(), B::Error> {
    /// use bmp280_rs::register::ctrl_meas::CtrlMeas;
    /// let ctrl_meas = device.read::<CtrlMeas>()?;
    /// # Ok(()) }
    /// ```
    pub fn read<R: Readable>(&mut self) -> Bmp280Result<R::Out, B::Error> {
        self.bus.read::<R>()
    }

    /// Write a register using a **typed marker**.
    ///
    /// This bypasses the driver's bookkeeping: a CTRL_MEAS or CONFIG written this way is not
    /// reflected in [`configuration`](Self::configuration).
    pub fn write<W: Writable>(&mut self, v: &W::In) -> Bmp280Result<(), B::Error> {
        self.bus.write::<W>(v)
    }
}

fn write_configuration<B: Bus>(bus: &mut B, config: &Configuration) -> Bmp280Result<(), B::Error> {
    let (config_byte, ctrl_meas_byte) = register::encode_config(config);

    bus.write_register(register::config::Config::ADDR, config_byte)
        .map_err(Bmp280Error::Bus)?;
    bus.write_register(register::ctrl_meas::CtrlMeas::ADDR, ctrl_meas_byte)
        .map_err(Bmp280Error::Bus)?;

    log::debug!("config={:#04x} ctrl_meas={:#04x} ({:?})", config_byte, ctrl_meas_byte, config);
    Ok(())
}

/// Reads STATUS until `busy` returns false, at most `max_polls` times.
fn poll_status<B: Bus, D: DelayNs>(
    bus: &mut B,
    delay: &mut D,
    max_polls: u32,
    interval_us: u32,
    busy: impl Fn(DeviceStatus) -> bool,
) -> Bmp280Result<(), B::Error> {
    for _ in 0..max_polls {
        let status = bus.read::<status::Status>()?;
        if !busy(status) {
            return Ok(());
        }

        delay.delay_us(interval_us);
    }

    log::warn!("device still busy after {} polls", max_polls);
    Err(Bmp280Error::Timeout)
}

/// This enum should reflect the physical state of the SDO pin. This is used to determine the I2C address
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SdoPinState {
    /// SDO is pulled high by connection to VDDIO
    High,
    /// SDO is pulled low by connection to GND
    Low,
}

impl From<SdoPinState> for SevenBitAddress {
    fn from(value: SdoPinState) -> Self {
        match value {
            SdoPinState::High => 0x77,
            SdoPinState::Low => 0x76,
        }
    }
}

/// What to do at startup before loading calibration and applying [`Configuration`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetPolicy {
    /// Write 0xB6 to RESET and wait for the NVM copy to finish (recommended default).
    Soft,
    /// Don't reset; leave the chip as-is.
    None,
}
