use crate::register::config::{ConfigFields, IIRFilterCoefficient, StandbyTime};
use crate::register::ctrl_meas::{CtrlMeasFields, Oversampling, PowerMode};

/// Operating mode of the sensor, built with chained setters.
///
/// The default is the highest resolution setting: x16 oversampling on both channels, IIR filter 16,
/// 62.5 ms standby and normal mode.
///
/// # Example
/// ```
/// use bmp280_rs::config::Configuration;
/// use bmp280_rs::register::ctrl_meas::{Oversampling, PowerMode};
///
/// let config = Configuration::default()
///     .pressure_oversampling(Oversampling::X4)
///     .power_mode(PowerMode::Forced);
///
/// assert_eq!(Oversampling::X4, config.pressure_oversampling_value());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    temperature_oversampling: Oversampling,
    pressure_oversampling: Oversampling,
    mode: PowerMode,
    standby_time: StandbyTime,
    iir_filter_coefficient: IIRFilterCoefficient,
    spi3w_enable: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            temperature_oversampling: Oversampling::X16,
            pressure_oversampling: Oversampling::X16,
            mode: PowerMode::Normal,
            standby_time: StandbyTime::Ms62p5,
            iir_filter_coefficient: IIRFilterCoefficient::X16,
            spi3w_enable: false,
        }
    }
}

impl Configuration {
    pub fn temperature_oversampling(mut self, temperature_oversampling: Oversampling) -> Self {
        self.temperature_oversampling = temperature_oversampling;

        self
    }

    /// Sets pressure oversampling. [`Oversampling::Skip`] disables the pressure channel; the
    /// pressure registers then hold 0x80000.
    pub fn pressure_oversampling(mut self, pressure_oversampling: Oversampling) -> Self {
        self.pressure_oversampling = pressure_oversampling;

        self
    }

    pub fn power_mode(mut self, power_mode: PowerMode) -> Self {
        self.mode = power_mode;

        self
    }

    /// Inactive time between measurements in [`PowerMode::Normal`].
    pub fn standby_time(mut self, standby_time: StandbyTime) -> Self {
        self.standby_time = standby_time;

        self
    }

    pub fn iir_filter_coefficient(mut self, filter_coefficient: IIRFilterCoefficient) -> Self {
        self.iir_filter_coefficient = filter_coefficient;

        self
    }

    /// Enables the 3-wire SPI interface.
    pub fn spi3w_enable(mut self, enable: bool) -> Self {
        self.spi3w_enable = enable;

        self
    }

    pub fn temperature_oversampling_value(&self) -> Oversampling {
        self.temperature_oversampling
    }

    pub fn pressure_oversampling_value(&self) -> Oversampling {
        self.pressure_oversampling
    }

    pub fn power_mode_value(&self) -> PowerMode {
        self.mode
    }

    pub fn standby_time_value(&self) -> StandbyTime {
        self.standby_time
    }

    pub fn iir_filter_coefficient_value(&self) -> IIRFilterCoefficient {
        self.iir_filter_coefficient
    }

    pub fn spi3w_enabled(&self) -> bool {
        self.spi3w_enable
    }

    /// Worst-case duration of one measurement cycle in microseconds (datasheet, section 9.1).
    pub fn max_measurement_time_us(&self) -> u32 {
        let mut t = 1250 + 2300 * self.temperature_oversampling.samples();

        if self.pressure_oversampling != Oversampling::Skip {
            t += 2300 * self.pressure_oversampling.samples() + 575;
        }

        t
    }

    /// Time between two data register updates in [`PowerMode::Normal`]: one measurement plus
    /// the standby time.
    pub fn normal_mode_period_us(&self) -> u32 {
        self.max_measurement_time_us() + self.standby_time.duration_us()
    }

    pub(crate) fn config_fields(&self) -> ConfigFields {
        ConfigFields {
            t_sb: self.standby_time,
            filter: self.iir_filter_coefficient,
            spi3w_en: self.spi3w_enable,
        }
    }

    pub(crate) fn ctrl_meas_fields(&self) -> CtrlMeasFields {
        CtrlMeasFields {
            osrs_t: self.temperature_oversampling,
            osrs_p: self.pressure_oversampling,
            mode: self.mode,
        }
    }

    pub(crate) fn from_fields(config: ConfigFields, ctrl_meas: CtrlMeasFields) -> Self {
        Self {
            temperature_oversampling: ctrl_meas.osrs_t,
            pressure_oversampling: ctrl_meas.osrs_p,
            mode: ctrl_meas.mode,
            standby_time: config.t_sb,
            iir_filter_coefficient: config.filter,
            spi3w_enable: config.spi3w_en,
        }
    }

    /// Recommended settings for common use cases (datasheet, section 3.8.2).
    pub fn from_preset(p: Preset) -> Self {
        match p {
            Preset::HandheldLowPower => Configuration::default()
                .pressure_oversampling(Oversampling::X16)
                .temperature_oversampling(Oversampling::X2)
                .iir_filter_coefficient(IIRFilterCoefficient::X4)
                .standby_time(StandbyTime::Ms62p5),
            Preset::HandheldDynamic => Configuration::default()
                .pressure_oversampling(Oversampling::X4)
                .temperature_oversampling(Oversampling::X1)
                .iir_filter_coefficient(IIRFilterCoefficient::X16)
                .standby_time(StandbyTime::Ms0p5),
            Preset::WeatherMonitoring => Configuration::default()
                .power_mode(PowerMode::Forced)
                .pressure_oversampling(Oversampling::X1)
                .temperature_oversampling(Oversampling::X1)
                .iir_filter_coefficient(IIRFilterCoefficient::Off),
            Preset::ElevatorFloorChange => Configuration::default()
                .pressure_oversampling(Oversampling::X4)
                .temperature_oversampling(Oversampling::X1)
                .iir_filter_coefficient(IIRFilterCoefficient::X4)
                .standby_time(StandbyTime::Ms125),
            Preset::DropDetection => Configuration::default()
                .pressure_oversampling(Oversampling::X2)
                .temperature_oversampling(Oversampling::X1)
                .iir_filter_coefficient(IIRFilterCoefficient::Off)
                .standby_time(StandbyTime::Ms0p5),
            Preset::IndoorNavigation => Configuration::default()
                .pressure_oversampling(Oversampling::X16)
                .temperature_oversampling(Oversampling::X2)
                .iir_filter_coefficient(IIRFilterCoefficient::X16)
                .standby_time(StandbyTime::Ms0p5),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Preset {
    HandheldLowPower,
    HandheldDynamic,
    WeatherMonitoring,
    ElevatorFloorChange,
    DropDetection,
    IndoorNavigation,
}
