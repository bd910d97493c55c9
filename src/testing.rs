use crate::bus::Bus;
use crate::calibration::CalibrationParameters;
use embedded_hal::delay::DelayNs;
use heapless::{Deque, Vec};

/// Calibration used in the datasheet's worked example, section 3.12
pub const REFERENCE_CALIBRATION: CalibrationParameters = CalibrationParameters {
    dig_t1: 27504,
    dig_t2: 26435,
    dig_t3: -1000,
    dig_p1: 36477,
    dig_p2: -10685,
    dig_p3: 3024,
    dig_p4: 2855,
    dig_p5: 140,
    dig_p6: -7,
    dig_p7: 15500,
    dig_p8: -14600,
    dig_p9: 6000,
};

/// [`REFERENCE_CALIBRATION`] as it appears in registers 0x88 - 0x9F
pub const REFERENCE_CALIBRATION_BYTES: [u8; 24] = [
    0x70, 0x6B, 0x43, 0x67, 0x18, 0xFC, 0x7D, 0x8E, 0x43, 0xD6, 0xD0, 0x0B,
    0x27, 0x0B, 0x8C, 0x00, 0xF9, 0xFF, 0x8C, 0x3C, 0xF8, 0xC6, 0x70, 0x17,
];

/// adc_P = 415148, adc_T = 519888
pub const REFERENCE_DATA_BYTES: [u8; 6] = [0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00];

const STATUS_ADDR: u8 = 0xF3;

/// In-memory register file.
///
/// Reads copy from the register image, except for the status register which first drains the
/// queue filled by [`FakeBus::queue_status`]. Writes land in the image so they can be read back.
pub struct FakeBus {
    image: [u8; 256],
    status: Deque<u8, 32>,
    reads: Vec<(u8, usize), 256>,
    writes: Vec<(u8, u8), 64>,
    fail_reads: bool,
    fail_writes: bool,
}

impl FakeBus {
    pub fn new() -> Self {
        FakeBus {
            image: [0u8; 256],
            status: Deque::new(),
            reads: Vec::new(),
            writes: Vec::new(),
            fail_reads: false,
            fail_writes: false,
        }
    }

    /// A bus with a BMP280 behind it: chip id, reference calibration and reference sample.
    pub fn bmp280() -> Self {
        let mut bus = Self::new();
        bus.set_registers(0xD0, &[0x58]);
        bus.set_registers(0x88, &REFERENCE_CALIBRATION_BYTES);
        bus.set_registers(0xF7, &REFERENCE_DATA_BYTES);
        bus
    }

    pub fn set_registers(&mut self, addr: u8, data: &[u8]) {
        let start = addr as usize;
        self.image[start..start + data.len()].copy_from_slice(data);
    }

    /// Values returned by the next reads of the status register, in order.
    pub fn queue_status(&mut self, values: &[u8]) {
        for value in values {
            self.status.push_back(*value).unwrap();
        }
    }

    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// `(address, length)` of every read so far
    pub fn reads(&self) -> &[(u8, usize)] {
        &self.reads
    }

    /// `(address, value)` of every write so far
    pub fn writes(&self) -> &[(u8, u8)] {
        &self.writes
    }

    pub fn clear_log(&mut self) {
        self.reads.clear();
        self.writes.clear();
    }
}

impl Bus for FakeBus {
    type Error = ();

    fn write_register(&mut self, addr: u8, value: u8) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(());
        }

        self.writes.push((addr, value)).unwrap();
        self.image[addr as usize] = value;
        Ok(())
    }

    fn read_register(&mut self, addr: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        if self.fail_reads {
            return Err(());
        }

        // Polling loops may read more often than the log holds
        let _ = self.reads.push((addr, data.len()));

        if addr == STATUS_ADDR && data.len() == 1 {
            if let Some(status) = self.status.pop_front() {
                data[0] = status;
                return Ok(());
            }
        }

        let start = addr as usize;
        data.copy_from_slice(&self.image[start..start + data.len()]);
        Ok(())
    }
}

/// Delay that returns immediately and keeps track of how long it was asked to wait.
#[derive(Default)]
pub struct FakeDelay {
    pub elapsed_ns: u64,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += ns as u64;
    }
}
