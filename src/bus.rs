//! Transport abstraction over SPI and I2C.
//!
//! The driver never talks to `embedded-hal` directly; it goes through the [`Bus`] trait. Each call
//! is one complete transaction: for SPI, chip-select framing is owned by the
//! [`SpiDevice`](embedded_hal::spi::SpiDevice) implementation and held for the whole register access.

use crate::error::Bmp280Error;
use crate::register::{Readable, Writable};

/// Largest register block the driver transfers in one transaction (the calibration block).
pub const MAX_REG_BYTES: usize = 24;

pub trait Bus {
    type Error;

    /// Writes a single byte to the register at `addr`.
    fn write_register(&mut self, addr: u8, value: u8) -> Result<(), Self::Error>;

    /// Reads `data.len()` consecutive bytes starting at register `addr`.
    fn read_register(&mut self, addr: u8, data: &mut [u8]) -> Result<(), Self::Error>;

    /// Reads and decodes a typed register.
    fn read<R: Readable>(&mut self) -> Result<R::Out, Bmp280Error<Self::Error>> {
        let mut buf = [0u8; MAX_REG_BYTES];
        let data = &mut buf[..R::N];
        self.read_register(R::ADDR, data).map_err(Bmp280Error::Bus)?;

        Ok(R::decode(data))
    }

    /// Encodes and writes a typed register.
    fn write<W: Writable>(&mut self, v: &W::In) -> Result<(), Bmp280Error<Self::Error>> {
        let mut buf = [0u8; MAX_REG_BYTES];
        W::encode(v, &mut buf[..W::N]);

        for (offset, value) in buf[..W::N].iter().enumerate() {
            self.write_register(W::ADDR + offset as u8, *value)
                .map_err(Bmp280Error::Bus)?;
        }

        Ok(())
    }
}

pub struct I2c<I2cType> {
    i2c: I2cType,
    address: u8,
}

impl<I2cType> I2c<I2cType>
where
    I2cType: embedded_hal::i2c::I2c,
{
    pub(crate) fn new(i2c: I2cType, address: u8) -> Self {
        Self { i2c, address }
    }

    pub(crate) fn release(self) -> I2cType {
        self.i2c
    }
}

impl<I2cType> Bus for I2c<I2cType>
where
    I2cType: embedded_hal::i2c::I2c,
{
    type Error = <I2cType as embedded_hal::i2c::ErrorType>::Error;

    fn write_register(&mut self, addr: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[addr, value])
    }

    fn read_register(&mut self, addr: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.write_read(self.address, &[addr], data)
    }
}

/// SPI transport. Bit 7 of the control byte selects the direction: set for reads, clear for writes.
pub struct Spi<SpiType> {
    spi: SpiType,
}

const SPI_READ: u8 = 0x80;
const SPI_WRITE_MASK: u8 = 0x7F;

impl<SpiType> Spi<SpiType>
where
    SpiType: embedded_hal::spi::SpiDevice,
{
    pub(crate) fn new(spi: SpiType) -> Self {
        Self { spi }
    }

    pub(crate) fn release(self) -> SpiType {
        self.spi
    }
}

impl<SpiType> Bus for Spi<SpiType>
where
    SpiType: embedded_hal::spi::SpiDevice,
{
    type Error = <SpiType as embedded_hal::spi::ErrorType>::Error;

    fn write_register(&mut self, addr: u8, value: u8) -> Result<(), Self::Error> {
        self.spi.write(&[addr & SPI_WRITE_MASK, value])
    }

    fn read_register(&mut self, addr: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        use embedded_hal::spi::Operation;
        self.spi.transaction(&mut [
            Operation::Write(&[addr | SPI_READ]),
            Operation::Read(data),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::config::{Config, ConfigFields, IIRFilterCoefficient, StandbyTime};
    use crate::register::data::Data;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    #[test]
    fn spi_read_sets_read_bit() {
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0xD0]),
            SpiTransaction::read_vec(vec![0x58]),
            SpiTransaction::transaction_end(),
        ];
        let mut spi = Spi::new(SpiMock::new(&expectations));

        let mut buf = [0u8; 1];
        spi.read_register(0x50, &mut buf).unwrap();
        assert_eq!([0x58], buf);

        spi.release().done();
    }

    #[test]
    fn spi_write_clears_read_bit() {
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x75, 0x30]),
            SpiTransaction::transaction_end(),
        ];
        let mut spi = Spi::new(SpiMock::new(&expectations));

        spi.write::<Config>(&ConfigFields {
            t_sb: StandbyTime::Ms62p5,
            filter: IIRFilterCoefficient::X16,
            spi3w_en: false,
        })
        .unwrap();

        spi.release().done();
    }

    #[test]
    fn spi_burst_read_uses_single_transaction() {
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0xF7]),
            SpiTransaction::read_vec(vec![0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00]),
            SpiTransaction::transaction_end(),
        ];
        let mut spi = Spi::new(SpiMock::new(&expectations));

        let raw = spi.read::<Data>().unwrap();
        assert_eq!(415148, raw.pressure());
        assert_eq!(519888, raw.temperature());

        spi.release().done();
    }

    #[test]
    fn i2c_framing() {
        let expectations = [
            I2cTransaction::write_read(0x76, vec![0xF7], vec![0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00]),
            I2cTransaction::write(0x76, vec![0xF5, 0x30]),
        ];
        let mut i2c = I2c::new(I2cMock::new(&expectations), 0x76);

        let raw = i2c.read::<Data>().unwrap();
        assert_eq!(415148, raw.pressure());

        i2c.write::<Config>(&ConfigFields {
            t_sb: StandbyTime::Ms62p5,
            filter: IIRFilterCoefficient::X16,
            spi3w_en: false,
        })
        .unwrap();

        i2c.release().done();
    }
}
