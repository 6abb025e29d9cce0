//! Simulated TM1638 for host-side tests
//!
//! [`SimChip`] implements [`BusHandle`] and models the chip at pin level:
//! it latches DIO on rising clock edges while the host drives the line,
//! decodes one instruction per strobe frame and shifts key data out on
//! falling edges while the host reads. Nothing is inferred from method
//! calls, so a framing or bit-order bug in the driver shows up as a wrong
//! register value, exactly as it would on hardware.
//!
//! Display registers power up as `0xFF` to mimic uninitialised memory.

use heapless::{Deque, Vec};

use ledkey_core::config::Brightness;
use ledkey_core::keys::{KEYS_PER_LINE, KEY_LINES, SCAN_BYTES};
use ledkey_hal::BusHandle;

use crate::tm1638::instruction::{
    DataCommand, Instruction, DIGIT_COUNT, LED_COUNT, REGISTER_COUNT,
};

/// Longest frame the simulator records
pub const MAX_FRAME_LEN: usize = 8;

/// Number of completed frames kept in the log
pub const LOG_CAPACITY: usize = 64;

/// Bytes the host wrote during one strobe-framed transaction
pub type Frame = Vec<u8, MAX_FRAME_LEN>;

/// Pin-level TM1638 model
#[derive(Debug)]
pub struct SimChip {
    registers: [u8; REGISTER_COUNT],
    control: Option<u8>,
    keys: [u8; SCAN_BYTES],
    mode: DataCommand,
    address: u8,

    clk: bool,
    stb: bool,
    host_dio: bool,
    dio_output: bool,
    chip_dio: bool,

    shift: u8,
    bit_count: u8,
    read_pos: usize,
    frame: Frame,
    frames: Deque<Frame, LOG_CAPACITY>,

    delay_us: u64,
    initialized: bool,
    protocol_errors: u32,
}

impl Default for SimChip {
    fn default() -> Self {
        Self::new()
    }
}

impl SimChip {
    /// Create a powered-up chip with garbage in the display registers
    pub fn new() -> Self {
        Self {
            registers: [0xFF; REGISTER_COUNT],
            control: None,
            keys: [0; SCAN_BYTES],
            mode: DataCommand::WRITE,
            address: 0,
            clk: true,
            stb: true,
            host_dio: true,
            dio_output: false,
            chip_dio: true,
            shift: 0,
            bit_count: 0,
            read_pos: 0,
            frame: Vec::new(),
            frames: Deque::new(),
            delay_us: 0,
            initialized: false,
            protocol_errors: 0,
        }
    }

    /// Raw display register file
    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.registers
    }

    /// Segment pattern of digit `position`
    pub fn digit(&self, position: usize) -> u8 {
        self.registers[position * 2]
    }

    /// Segment patterns of all digits
    pub fn digits(&self) -> [u8; DIGIT_COUNT] {
        let mut digits = [0; DIGIT_COUNT];
        for (position, digit) in digits.iter_mut().enumerate() {
            *digit = self.digit(position);
        }
        digits
    }

    /// LED states as a mask (bit 0 = LED 0)
    ///
    /// An LED is lit when bit 0 of its register is set.
    pub fn leds(&self) -> u8 {
        (0..LED_COUNT).fold(0, |mask, index| {
            mask | ((self.registers[index * 2 + 1] & 0x01) << index)
        })
    }

    /// Last display control byte, `None` before the first one
    pub fn control(&self) -> Option<u8> {
        self.control
    }

    /// Decoded display state as (brightness, on)
    pub fn display(&self) -> Option<(Brightness, bool)> {
        match Instruction::decode(self.control?) {
            Some(Instruction::DisplayControl { brightness, on }) => Some((brightness, on)),
            _ => None,
        }
    }

    /// Set the raw key scan bytes the chip will shift out
    pub fn set_key_registers(&mut self, raw: [u8; SCAN_BYTES]) {
        self.keys = raw;
    }

    /// Press the key at `line` (0 = K1) and `column` (0 = SEG1)
    pub fn press_key(&mut self, line: usize, column: usize) {
        if line >= KEY_LINES || column >= KEYS_PER_LINE {
            return;
        }
        // K1 is nibble bit 2, K3 nibble bit 0; odd columns use the high nibble
        let bit = (KEY_LINES - 1 - line) + 4 * (column % 2);
        self.keys[column / 2] |= 1 << bit;
    }

    /// Release every key
    pub fn release_all(&mut self) {
        self.keys = [0; SCAN_BYTES];
    }

    /// Completed frames, oldest first
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    /// Number of frames in the log
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Drop the frame log
    pub fn clear_frames(&mut self) {
        self.frames.clear();
    }

    /// Total delay requested by the host
    pub fn elapsed_us(&self) -> u64 {
        self.delay_us
    }

    /// Whether `platform_init` has run without a matching deinit
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Count of malformed traffic (unknown instructions, writes in read
    /// mode, over-long frames)
    pub fn protocol_errors(&self) -> u32 {
        self.protocol_errors
    }

    /// Whether a transaction is open
    pub fn in_transaction(&self) -> bool {
        !self.stb
    }

    fn begin_frame(&mut self) {
        self.frame.clear();
        self.shift = 0;
        self.bit_count = 0;
        self.read_pos = 0;
    }

    fn end_frame(&mut self) {
        if self.bit_count != 0 {
            self.protocol_errors += 1;
        }
        if self.frame.is_empty() {
            return;
        }
        if self.frames.is_full() {
            self.frames.pop_front();
        }
        // Capacity checked above
        let _ = self.frames.push_back(self.frame.clone());
    }

    fn receive_byte(&mut self, byte: u8) {
        if self.frame.push(byte).is_err() {
            self.protocol_errors += 1;
        }

        if self.frame.len() == 1 {
            match Instruction::decode(byte) {
                Some(Instruction::Data(mode)) => self.mode = mode,
                Some(Instruction::DisplayControl { .. }) => self.control = Some(byte),
                Some(Instruction::Address(addr)) => self.address = addr,
                None => self.protocol_errors += 1,
            }
            return;
        }

        if self.mode.read_keys {
            self.protocol_errors += 1;
            return;
        }

        self.registers[self.address as usize] = byte;
        if !self.mode.fixed_address {
            self.address = (self.address + 1) % REGISTER_COUNT as u8;
        }
    }

    fn present_key_bit(&mut self) {
        let total_bits = SCAN_BYTES * 8;
        self.chip_dio = if self.mode.read_keys && self.read_pos < total_bits {
            self.keys[self.read_pos / 8] & (1 << (self.read_pos % 8)) != 0
        } else {
            // Released line floats high
            true
        };
        self.read_pos += 1;
    }
}

impl BusHandle for SimChip {
    fn clock_write(&mut self, high: bool) {
        let rising = !self.clk && high;
        let falling = self.clk && !high;
        self.clk = high;

        // Chip ignores the clock while deselected
        if self.stb {
            return;
        }

        if rising && self.dio_output {
            self.shift |= u8::from(self.host_dio) << self.bit_count;
            self.bit_count += 1;
            if self.bit_count == 8 {
                let byte = self.shift;
                self.shift = 0;
                self.bit_count = 0;
                self.receive_byte(byte);
            }
        } else if falling && !self.dio_output {
            self.present_key_bit();
        }
    }

    fn data_write(&mut self, high: bool) {
        self.host_dio = high;
    }

    fn data_read(&mut self) -> bool {
        if self.dio_output {
            self.host_dio
        } else {
            self.chip_dio
        }
    }

    fn data_configure_output(&mut self) {
        self.dio_output = true;
    }

    fn data_configure_input(&mut self) {
        self.dio_output = false;
        self.chip_dio = true;
    }

    fn strobe_write(&mut self, high: bool) {
        if self.stb && !high {
            self.begin_frame();
        } else if !self.stb && high {
            self.end_frame();
        }
        self.stb = high;
    }

    fn delay_us(&mut self, us: u32) {
        self.delay_us += u64::from(us);
    }

    fn platform_init(&mut self) {
        self.initialized = true;
        self.stb = true;
        self.clk = true;
    }

    fn platform_deinit(&mut self) {
        self.initialized = false;
        self.dio_output = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tm1638::transport::Transport;
    use ledkey_core::config::BusTiming;

    fn send(chip: &mut SimChip, bytes: &[u8]) {
        let mut transport = Transport::new(chip, BusTiming::default());
        transport.transaction(|t| t.write_bytes(bytes));
    }

    #[test]
    fn test_address_then_data() {
        let mut chip = SimChip::new();
        chip.platform_init();

        send(&mut chip, &[0x40]);
        send(&mut chip, &[0xC4, 0x5B, 0x4F]);

        // Auto-increment: 0x5B at 4, 0x4F at 5
        assert_eq!(chip.registers()[4], 0x5B);
        assert_eq!(chip.registers()[5], 0x4F);
        assert_eq!(chip.registers()[6], 0xFF);
        assert_eq!(chip.frame_count(), 2);
        assert_eq!(chip.protocol_errors(), 0);
    }

    #[test]
    fn test_fixed_address_mode() {
        let mut chip = SimChip::new();
        chip.platform_init();

        send(&mut chip, &[0x44]);
        send(&mut chip, &[0xC2, 0x01, 0x02]);

        assert_eq!(chip.registers()[2], 0x02);
        assert_eq!(chip.registers()[3], 0xFF);
    }

    #[test]
    fn test_display_control() {
        let mut chip = SimChip::new();
        chip.platform_init();
        assert_eq!(chip.display(), None);

        send(&mut chip, &[0x8B]);

        assert_eq!(chip.control(), Some(0x8B));
        assert_eq!(chip.display(), Some((Brightness::saturating(3), true)));
    }

    #[test]
    fn test_unknown_instruction_flagged() {
        let mut chip = SimChip::new();
        chip.platform_init();

        send(&mut chip, &[0x12]);

        assert_eq!(chip.protocol_errors(), 1);
    }

    #[test]
    fn test_clock_ignored_outside_frame() {
        let mut chip = SimChip::new();
        chip.platform_init();

        let mut transport = Transport::new(&mut chip, BusTiming::default());
        transport.write_bytes(&[0xC0, 0x00]);

        assert_eq!(chip.frame_count(), 0);
        assert_eq!(chip.registers()[0], 0xFF);
    }

    #[test]
    fn test_press_key_layout() {
        let mut chip = SimChip::new();
        chip.press_key(0, 0);
        chip.press_key(1, 5);
        chip.press_key(2, 7);
        chip.press_key(3, 0);

        assert_eq!(chip.keys, [0x04, 0x00, 0x20, 0x10]);

        chip.release_all();
        assert_eq!(chip.keys, [0; SCAN_BYTES]);
    }

    #[test]
    fn test_frame_log_is_bounded() {
        let mut chip = SimChip::new();
        chip.platform_init();

        for _ in 0..LOG_CAPACITY + 5 {
            send(&mut chip, &[0x40]);
        }

        assert_eq!(chip.frame_count(), LOG_CAPACITY);
    }
}
