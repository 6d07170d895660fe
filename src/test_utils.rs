//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing the W5500 driver
//! on the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use std::collections::{HashMap, HashSet, VecDeque};
use std::vec;
use std::vec::Vec;

use crate::hal::bus::Block;
use crate::hal::spi::SpiTransport;
use crate::internal::register::common::{
    MR, MR_RST, PHYCFGR, PHYCFGR_DPX, PHYCFGR_LNK, PHYCFGR_SPD, VERSIONR, W5500_VERSION,
};
use crate::internal::register::socket::{
    SN_CR, SN_CR_CLOSE, SN_CR_OPEN, SN_CR_RECV, SN_CR_SEND, SN_IR, SN_IR_SENDOK, SN_RX_RD,
    SN_RX_RSR, SN_RX_WR, SN_SR, SN_TX_FSR, SN_TX_RD, SN_TX_WR, SOCK_CLOSED, SOCK_MACRAW,
};
use crate::internal::register::HEADER_LEN;

const BLOCK_SIZE: usize = 0x1_0000;

/// PHYCFGR bits owned by the PHY, not writable over SPI
const PHY_STATUS_BITS: u8 = PHYCFGR_LNK | PHYCFGR_SPD | PHYCFGR_DPX;

// =============================================================================
// Mock W5500
// =============================================================================

/// One decoded SPI transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub block: Block,
    pub addr: u16,
    pub write: bool,
    /// Bytes written, or bytes returned for a read
    pub data: Vec<u8>,
}

/// Byte-level W5500 simulator
///
/// Decodes the SPI frame format from raw exchanges, keeps a 64 KiB memory per
/// block and applies the register side effects the driver depends on:
///
/// - MR reset bit self-clears (unless [`set_reset_stuck`](Self::set_reset_stuck))
/// - Sn_CR self-clears once a command is processed
/// - OPEN sets Sn_SR, CLOSE closes the socket
/// - SEND moves the pending TX bytes into [`sent_frames`](Self::sent_frames)
///   and raises the configured Sn_IR flags
/// - RECV recomputes Sn_RX_RSR from the RX pointers
/// - Sn_IR is write-1-to-clear
///
/// # Example
///
/// ```ignore
/// let mut chip = MockW5500::new();
/// chip.inject_frame(&[0xAA; 60]);
///
/// let mut w5500 = W5500::new(&mut chip, W5500Config::default());
/// w5500.init(None).unwrap();
/// ```
#[derive(Debug)]
pub struct MockW5500 {
    memory: Vec<Vec<u8>>,
    selected: bool,
    header: Vec<u8>,
    current: Option<Transaction>,
    cursor: u16,
    transactions: Vec<Transaction>,
    selects: usize,
    deselects: usize,
    commands: Vec<u8>,
    sent_frames: Vec<Vec<u8>>,
    queued: HashMap<(u8, u16), VecDeque<Vec<u8>>>,
    unstable: HashSet<(u8, u16)>,
    reset_stuck: bool,
    stuck_command: Option<u8>,
    open_status: u8,
    send_flags: u8,
}

impl Default for MockW5500 {
    fn default() -> Self {
        Self::new()
    }
}

impl MockW5500 {
    /// Chip with power-on values: version 0x04, socket closed, 16 KiB TX free
    pub fn new() -> Self {
        let mut chip = Self {
            memory: vec![vec![0u8; BLOCK_SIZE]; 4],
            selected: false,
            header: Vec::new(),
            current: None,
            cursor: 0,
            transactions: Vec::new(),
            selects: 0,
            deselects: 0,
            commands: Vec::new(),
            sent_frames: Vec::new(),
            queued: HashMap::new(),
            unstable: HashSet::new(),
            reset_stuck: false,
            stuck_command: None,
            open_status: SOCK_MACRAW,
            send_flags: SN_IR_SENDOK,
        };
        chip.set_byte(Block::Common, VERSIONR, W5500_VERSION);
        chip.set_byte(Block::Socket0, SN_SR, SOCK_CLOSED);
        chip.set_word(Block::Socket0, SN_TX_FSR, 0x4000);
        chip
    }

    // =========================================================================
    // Memory
    // =========================================================================

    pub fn byte(&self, block: Block, addr: u16) -> u8 {
        self.memory[block.bsb() as usize][addr as usize]
    }

    pub fn set_byte(&mut self, block: Block, addr: u16, value: u8) {
        self.memory[block.bsb() as usize][addr as usize] = value;
    }

    pub fn word(&self, block: Block, addr: u16) -> u16 {
        u16::from_be_bytes([self.byte(block, addr), self.byte(block, addr.wrapping_add(1))])
    }

    pub fn set_word(&mut self, block: Block, addr: u16, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.set_byte(block, addr, hi);
        self.set_byte(block, addr.wrapping_add(1), lo);
    }

    /// Copy `len` bytes starting at `addr`, wrapping at 16 bits
    pub fn bytes(&self, block: Block, addr: u16, len: usize) -> Vec<u8> {
        (0..len)
            .map(|i| self.byte(block, addr.wrapping_add(i as u16)))
            .collect()
    }

    fn store(&mut self, block: Block, addr: u16, data: &[u8]) {
        for (i, &byte) in data.iter().enumerate() {
            self.set_byte(block, addr.wrapping_add(i as u16), byte);
        }
    }

    // =========================================================================
    // Scripting
    // =========================================================================

    /// Return `value` from the next read of the byte at `addr`
    pub fn queue_byte(&mut self, block: Block, addr: u16, value: u8) {
        self.queued
            .entry((block.bsb(), addr))
            .or_default()
            .push_back(vec![value]);
    }

    /// Return `value` from the next read of the word at `addr`
    pub fn queue_word(&mut self, block: Block, addr: u16, value: u16) {
        self.queued
            .entry((block.bsb(), addr))
            .or_default()
            .push_back(value.to_be_bytes().to_vec());
    }

    /// Make every read of the word at `addr` return a different value
    pub fn set_unstable(&mut self, block: Block, addr: u16) {
        self.unstable.insert((block.bsb(), addr));
    }

    /// Keep the MR reset bit set forever
    pub fn set_reset_stuck(&mut self, stuck: bool) {
        self.reset_stuck = stuck;
    }

    /// Never clear Sn_CR after this command
    pub fn set_stuck_command(&mut self, command: Option<u8>) {
        self.stuck_command = command;
    }

    /// Sn_SR value after OPEN
    pub fn set_open_status(&mut self, status: u8) {
        self.open_status = status;
    }

    /// Sn_IR flags raised by SEND
    pub fn set_send_flags(&mut self, flags: u8) {
        self.send_flags = flags;
    }

    /// Set the PHY-owned PHYCFGR status bits (LNK, SPD, DPX)
    pub fn set_phy_status(&mut self, link: bool, speed_100: bool, full_duplex: bool) {
        let mut bits = 0;
        if link {
            bits |= PHYCFGR_LNK;
        }
        if speed_100 {
            bits |= PHYCFGR_SPD;
        }
        if full_duplex {
            bits |= PHYCFGR_DPX;
        }
        let value = (self.byte(Block::Common, PHYCFGR) & !PHY_STATUS_BITS) | bits;
        self.set_byte(Block::Common, PHYCFGR, value);
    }

    pub fn set_link(&mut self, up: bool) {
        self.set_phy_status(up, true, true);
    }

    /// Place a frame in the RX ring the way the chip does
    ///
    /// The frame is prefixed with its length plus two, written at Sn_RX_WR,
    /// and Sn_RX_WR / Sn_RX_RSR are advanced.
    pub fn inject_frame(&mut self, frame: &[u8]) {
        let total = frame.len() as u16 + 2;
        self.inject_raw(total, frame);
    }

    /// Place a frame with an arbitrary length prefix in the RX ring
    pub fn inject_raw(&mut self, prefix: u16, payload: &[u8]) {
        let wr = self.word(Block::Socket0, SN_RX_WR);
        self.store(Block::Socket0Rx, wr, &prefix.to_be_bytes());
        self.store(Block::Socket0Rx, wr.wrapping_add(2), payload);

        let written = (payload.len() as u16).wrapping_add(2);
        self.set_word(Block::Socket0, SN_RX_WR, wr.wrapping_add(written));
        let rsr = self.word(Block::Socket0, SN_RX_RSR);
        self.set_word(Block::Socket0, SN_RX_RSR, rsr.wrapping_add(written));
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
    }

    pub fn selects(&self) -> usize {
        self.selects
    }

    pub fn deselects(&self) -> usize {
        self.deselects
    }

    /// Socket commands in the order they were written
    pub fn commands(&self) -> &[u8] {
        &self.commands
    }

    /// Frames moved out of the TX ring by SEND
    pub fn sent_frames(&self) -> &[Vec<u8>] {
        &self.sent_frames
    }

    /// Whether any transaction addressed `block`
    pub fn touched(&self, block: Block) -> bool {
        self.transactions.iter().any(|t| t.block == block)
    }

    /// Writes to one register, in order
    pub fn writes_to(&self, block: Block, addr: u16) -> Vec<Vec<u8>> {
        self.transactions
            .iter()
            .filter(|t| t.write && t.block == block && t.addr == addr)
            .map(|t| t.data.clone())
            .collect()
    }

    // =========================================================================
    // Transaction Handling
    // =========================================================================

    fn start(&mut self) {
        let [hi, lo, control] = [self.header[0], self.header[1], self.header[2]];
        let addr = u16::from_be_bytes([hi, lo]);
        let bsb = control >> 3;
        let block = Block::from_bsb(bsb)
            .unwrap_or_else(|| panic!("unsupported block select {bsb:#04x}"));
        let write = control & 0x04 != 0;

        if !write {
            let key = (bsb, addr);
            if let Some(value) = self.queued.get_mut(&key).and_then(VecDeque::pop_front) {
                self.store(block, addr, &value);
            } else if self.unstable.contains(&key) {
                let next = self.word(block, addr).wrapping_add(1);
                self.set_word(block, addr, next);
            }
        }

        self.cursor = addr;
        self.current = Some(Transaction {
            block,
            addr,
            write,
            data: Vec::new(),
        });
    }

    fn finish(&mut self, transaction: Transaction) {
        if transaction.write && !transaction.data.is_empty() {
            match (transaction.block, transaction.addr) {
                (Block::Common, MR) if !self.reset_stuck => {
                    let mr = self.byte(Block::Common, MR) & !MR_RST;
                    self.set_byte(Block::Common, MR, mr);
                }
                (Block::Socket0, SN_CR) => self.execute(transaction.data[0]),
                _ => {}
            }
        }
        self.transactions.push(transaction);
    }

    fn execute(&mut self, command: u8) {
        self.commands.push(command);

        match command {
            SN_CR_OPEN => self.set_byte(Block::Socket0, SN_SR, self.open_status),
            SN_CR_CLOSE => self.set_byte(Block::Socket0, SN_SR, SOCK_CLOSED),
            SN_CR_SEND => {
                let rd = self.word(Block::Socket0, SN_TX_RD);
                let wr = self.word(Block::Socket0, SN_TX_WR);
                let len = wr.wrapping_sub(rd) as usize;
                let frame = self.bytes(Block::Socket0Tx, rd, len);
                self.sent_frames.push(frame);
                self.set_word(Block::Socket0, SN_TX_RD, wr);
                let ir = self.byte(Block::Socket0, SN_IR) | self.send_flags;
                self.set_byte(Block::Socket0, SN_IR, ir);
            }
            SN_CR_RECV => {
                let rd = self.word(Block::Socket0, SN_RX_RD);
                let wr = self.word(Block::Socket0, SN_RX_WR);
                self.set_word(Block::Socket0, SN_RX_RSR, wr.wrapping_sub(rd));
            }
            _ => {}
        }

        if self.stuck_command != Some(command) {
            self.set_byte(Block::Socket0, SN_CR, 0);
        }
    }

    fn write_data(&mut self, block: Block, addr: u16, byte: u8) {
        match (block, addr) {
            (Block::Socket0, SN_IR) => {
                let ir = self.byte(block, addr) & !byte;
                self.set_byte(block, addr, ir);
            }
            (Block::Common, PHYCFGR) => {
                let status = self.byte(block, addr) & PHY_STATUS_BITS;
                self.set_byte(block, addr, (byte & !PHY_STATUS_BITS) | status);
            }
            _ => self.set_byte(block, addr, byte),
        }
    }
}

impl SpiTransport for MockW5500 {
    fn select(&mut self) {
        assert!(!self.selected, "chip-select asserted twice");
        self.selected = true;
        self.selects += 1;
        self.header.clear();
        self.current = None;
    }

    fn deselect(&mut self) {
        self.deselects += 1;
        if !self.selected {
            return;
        }
        self.selected = false;
        if let Some(transaction) = self.current.take() {
            self.finish(transaction);
        }
    }

    fn exchange(&mut self, byte: u8) -> u8 {
        assert!(self.selected, "byte exchanged without chip-select");

        if self.header.len() < HEADER_LEN {
            self.header.push(byte);
            if self.header.len() == HEADER_LEN {
                self.start();
            }
            return 0;
        }

        let addr = self.cursor;
        self.cursor = self.cursor.wrapping_add(1);

        let Some((block, write)) = self.current.as_ref().map(|t| (t.block, t.write)) else {
            return 0;
        };
        let response = if write {
            self.write_data(block, addr, byte);
            byte
        } else {
            self.byte(block, addr)
        };
        if let Some(transaction) = self.current.as_mut() {
            transaction.data.push(response);
        }

        if write { 0 } else { response }
    }
}

// =============================================================================
// Mock embedded-hal Peripherals
// =============================================================================

/// Error returned by failing mock peripherals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError;

impl embedded_hal::spi::Error for MockBusError {
    fn kind(&self) -> embedded_hal::spi::ErrorKind {
        embedded_hal::spi::ErrorKind::Other
    }
}

impl embedded_hal::digital::Error for MockBusError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

/// SPI bus that answers every byte with its complement
#[derive(Debug, Default)]
pub struct MockSpiBus {
    sent: Vec<u8>,
    flushes: usize,
    fail: bool,
}

impl MockSpiBus {
    pub fn echo_inverted() -> Self {
        Self::default()
    }

    /// Make every transfer fail
    pub fn fail_transfers(&mut self, fail: bool) {
        self.fail = fail;
    }

    pub fn sent(&self) -> Vec<u8> {
        self.sent.clone()
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }

    fn check(&self) -> Result<(), MockBusError> {
        if self.fail { Err(MockBusError) } else { Ok(()) }
    }
}

impl embedded_hal::spi::ErrorType for MockSpiBus {
    type Error = MockBusError;
}

impl embedded_hal::spi::SpiBus<u8> for MockSpiBus {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.check()?;
        words.fill(0xFF);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.check()?;
        self.sent.extend_from_slice(words);
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.check()?;
        self.sent.extend_from_slice(write);
        for (i, slot) in read.iter_mut().enumerate() {
            *slot = !write.get(i).copied().unwrap_or(0);
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.check()?;
        for word in words.iter_mut() {
            self.sent.push(*word);
            *word = !*word;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}

/// Level change recorded by [`MockPin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinEvent {
    Low,
    High,
}

/// Output pin that records level changes
#[derive(Debug, Default)]
pub struct MockPin {
    events: Vec<PinEvent>,
    fail: bool,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every level change fail
    pub fn fail(&mut self, fail: bool) {
        self.fail = fail;
    }

    pub fn events(&self) -> Vec<PinEvent> {
        self.events.clone()
    }

    fn drive(&mut self, event: PinEvent) -> Result<(), MockBusError> {
        if self.fail {
            return Err(MockBusError);
        }
        self.events.push(event);
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = MockBusError;
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(PinEvent::Low)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(PinEvent::High)
    }
}

// =============================================================================
// Self Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::bus::RegisterBus;

    #[test]
    fn reset_bit_self_clears() {
        let mut bus = RegisterBus::new(MockW5500::new());
        bus.write_byte(Block::Common, MR, MR_RST);
        assert_eq!(bus.read_byte(Block::Common, MR), 0);
    }

    #[test]
    fn interrupt_register_is_write_one_to_clear() {
        let mut chip = MockW5500::new();
        chip.set_byte(Block::Socket0, SN_IR, 0x1F);

        let mut bus = RegisterBus::new(&mut chip);
        bus.write_byte(Block::Socket0, SN_IR, 0x10);
        assert_eq!(bus.read_byte(Block::Socket0, SN_IR), 0x0F);
    }

    #[test]
    fn queued_reads_take_precedence_then_memory() {
        let mut chip = MockW5500::new();
        chip.queue_word(Block::Socket0, SN_RX_RSR, 7);

        let mut bus = RegisterBus::new(&mut chip);
        assert_eq!(bus.read_word(Block::Socket0, SN_RX_RSR), 7);
        assert_eq!(bus.read_word(Block::Socket0, SN_RX_RSR), 7);
    }

    #[test]
    fn injected_frame_is_visible_through_rx_registers() {
        let mut chip = MockW5500::new();
        chip.inject_frame(&[1, 2, 3]);

        assert_eq!(chip.word(Block::Socket0, SN_RX_RSR), 5);
        assert_eq!(chip.word(Block::Socket0, SN_RX_WR), 5);
        assert_eq!(chip.bytes(Block::Socket0Rx, 0, 5), [0, 5, 1, 2, 3]);
    }

    #[test]
    fn phy_status_bits_survive_writes() {
        let mut chip = MockW5500::new();
        chip.set_link(true);

        let mut bus = RegisterBus::new(&mut chip);
        bus.write_byte(Block::Common, PHYCFGR, 0);
        assert_eq!(bus.read_byte(Block::Common, PHYCFGR) & PHYCFGR_LNK, PHYCFGR_LNK);
    }
}
