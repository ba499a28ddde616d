//! # Interrupt Control Sequencing
//!
//! Drives the fault line through mask -> log -> clear -> unmask so a
//! storming fault source can never outrun the handler. Masking happens
//! before any decode work; clearing happens before the line is
//! re-enabled. The sequence always completes, even when decode resolves
//! to the unknown sentinel.

use core::sync::atomic::{AtomicU8, Ordering};

use ember_core::IrqLine;
use ember_hal::ChipOps;

// =============================================================================
// SERVICE PHASE
// =============================================================================

/// Where the fault line currently is in its service cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ServicePhase {
    /// Line armed, awaiting the next hardware fault
    Idle = 0,
    /// Fault raised and line masked; decode pending
    Masked = 1,
    /// Deferred decode/report work in progress
    Logged = 2,
    /// Status cleared; line about to be re-enabled
    Cleared = 3,
}

impl ServicePhase {
    const fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::Masked,
            2 => Self::Logged,
            3 => Self::Cleared,
            _ => Self::Idle,
        }
    }
}

// =============================================================================
// IRQ SEQUENCER
// =============================================================================

/// Mask/log/clear/unmask orchestration for one fault line
pub struct IrqSequencer<'a> {
    chip: &'a dyn ChipOps,
    phase: AtomicU8,
}

impl<'a> IrqSequencer<'a> {
    /// Create a sequencer over a generation backend
    pub fn new(chip: &'a dyn ChipOps) -> Self {
        Self {
            chip,
            phase: AtomicU8::new(ServicePhase::Idle as u8),
        }
    }

    /// Current service phase
    pub fn phase(&self) -> ServicePhase {
        ServicePhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    /// Hard-interrupt entry: mask the line
    ///
    /// The only work legal in hard interrupt context. Once masked, the
    /// source cannot re-fire and corrupt the latched status registers
    /// while the deferred half decodes them.
    pub fn mask(&self, irq: IrqLine) {
        self.chip.disable_interrupt(irq);
        self.phase
            .store(ServicePhase::Masked as u8, Ordering::Release);
    }

    /// Deferred service: log, decode, clear, re-enable
    ///
    /// `decode` runs between the log hook and the clear; it must not
    /// panic and may not skip the remainder of the sequence, whatever it
    /// finds in the status word.
    pub fn service<F: FnOnce()>(&self, irq: IrqLine, decode: F) {
        debug_assert_eq!(self.phase(), ServicePhase::Masked);

        self.phase
            .store(ServicePhase::Logged as u8, Ordering::Release);
        self.chip.log_fault(irq);
        decode();

        self.phase
            .store(ServicePhase::Cleared as u8, Ordering::Release);
        self.chip.clear_interrupt(irq);
        self.chip.enable_interrupt(irq);
        self.phase.store(ServicePhase::Idle as u8, Ordering::Release);

        log::trace!("mc fault line {} serviced and re-armed", irq);
    }
}

impl core::fmt::Debug for IrqSequencer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IrqSequencer")
            .field("phase", &self.phase())
            .finish()
    }
}
