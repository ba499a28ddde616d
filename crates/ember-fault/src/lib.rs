//! # EMBER Fault Engine
//!
//! The chip-agnostic half of the memory-controller fault subsystem:
//! decode and reporting, print throttling, interrupt control sequencing,
//! arbitration interval tracking and diagnostics aggregation.
//!
//! ## Execution Contexts
//!
//! Three contexts with different obligations share this state:
//!
//! 1. **Hard fault context** - sub-microsecond, lock-free; only masks
//!    the line ([`FaultMonitor::fault_raised`])
//! 2. **Deferred logging context** - bounded non-blocking work: register
//!    reads, lookups, throttled rendering ([`FaultMonitor::service`])
//! 3. **Diagnostics read context** - may block, reads aggregated state
//!    only ([`FaultMonitor::render_diagnostics`])
//!
//! A runaway fault source is bounded by the mask-before-log discipline,
//! not by time; there is no timeout anywhere in this crate.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

extern crate alloc;

use core::fmt;

use spin::Once;

use ember_core::{ClientTable, IrqLine, Result, SourceChannel};
use ember_hal::{ChipOps, DiagnosticsView, McRegisters};

// =============================================================================
// MODULE EXPORTS
// =============================================================================

pub mod arb;
pub mod engine;
pub mod sequencer;
pub mod stats;
pub mod throttle;

#[cfg(test)]
mod testutil;

// Re-exports for convenience
pub use arb::{ArbSample, ArbTracker, HISTORY_SAMPLES};
pub use engine::DecodeEngine;
pub use sequencer::{IrqSequencer, ServicePhase};
pub use stats::ClientStats;
pub use throttle::ThrottleState;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Default cap on reports rendered per fault signature
pub const MAX_PRINTS: u32 = 5;

/// Process-wide fault monitor configuration
#[derive(Debug, Clone, Copy)]
pub struct MonitorConfig {
    /// Reports rendered per fault signature before the throttle closes
    pub max_prints: u32,
    /// Signature whose arrivals feed the arbitration interval tracker
    /// (0 disables tracking)
    pub arb_sig: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            max_prints: MAX_PRINTS,
            arb_sig: 0,
        }
    }
}

// =============================================================================
// FAULT MONITOR
// =============================================================================

/// Long-lived context object tying the fault subsystem together
///
/// Owns all mutable fault-handling state; the generation backend,
/// register space and client table are installed at construction and
/// never swapped.
pub struct FaultMonitor<'a> {
    chip: &'a dyn ChipOps,
    seq: IrqSequencer<'a>,
    engine: DecodeEngine<'a>,
}

impl<'a> FaultMonitor<'a> {
    /// Build a monitor over a generation backend
    pub fn new(
        chip: &'a dyn ChipOps,
        mc_regs: &'a dyn McRegisters,
        clients: &'a ClientTable,
        config: MonitorConfig,
    ) -> Self {
        Self {
            chip,
            seq: IrqSequencer::new(chip),
            engine: DecodeEngine::new(chip, mc_regs, clients, config),
        }
    }

    /// Hard-interrupt entry: mask the fault line
    ///
    /// The only call legal in hard interrupt context. Deferred service
    /// must follow via [`service`](Self::service).
    pub fn fault_raised(&self, irq: IrqLine) {
        self.seq.mask(irq);
    }

    /// Deferred-context service of a masked fault
    ///
    /// Logs, decodes and reports the fault, then clears the status and
    /// re-enables the line. Completes the full sequence even when the
    /// status word resolves to nothing.
    pub fn service(&self, irq: IrqLine, channel: SourceChannel, raw_status: u32, now_ns: u64) {
        self.seq.service(irq, || {
            let masked = raw_status & self.chip.interrupt_mask();
            // Bits outside the fault mask still surface through the
            // unknown path rather than vanishing.
            let word = if masked != 0 { masked } else { raw_status };
            self.engine.decode(channel, word, now_ns);
        });
    }

    /// Full service cycle for hosts without a split interrupt scheme
    pub fn handle(&self, irq: IrqLine, channel: SourceChannel, raw_status: u32, now_ns: u64) {
        self.fault_raised(irq);
        self.service(irq, channel, raw_status, now_ns);
    }

    /// Render the diagnostics view into a sink
    ///
    /// Blockable context only; snapshots the counters lazily and hands
    /// layout to the generation's renderer.
    pub fn render_diagnostics(&self, sink: &mut dyn fmt::Write) -> Result<()> {
        let client_counts = self.engine.stats().snapshot();
        let throttle_counts = self.engine.throttle().snapshot();
        let view = DiagnosticsView {
            clients: self.engine.clients(),
            client_counts: &client_counts,
            faults: self.chip.faults(),
            throttle_counts: &throttle_counts,
            arb_average_ns: self.engine.arb().average(),
        };
        self.chip.render_diagnostics(&view, sink)?;
        Ok(())
    }

    /// Suppress or re-enable all textual output
    pub fn set_silenced(&self, silenced: bool) {
        self.engine.throttle().set_silenced(silenced);
    }

    /// Whether textual output is currently suppressed
    pub fn silenced(&self) -> bool {
        self.engine.throttle().silenced()
    }

    /// Explicitly clear the per-signature throttle counters
    pub fn reset_throttle(&self) {
        self.engine.throttle().reset();
    }

    /// Current interrupt service phase
    pub fn phase(&self) -> ServicePhase {
        self.seq.phase()
    }

    /// Per-client cumulative fault counters
    pub fn stats(&self) -> &ClientStats {
        self.engine.stats()
    }

    /// Arbitration interval tracker
    pub fn arb(&self) -> &ArbTracker {
        self.engine.arb()
    }
}

impl fmt::Debug for FaultMonitor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaultMonitor")
            .field("phase", &self.phase())
            .field("engine", &self.engine)
            .finish()
    }
}

static_assertions::assert_impl_all!(FaultMonitor<'static>: Send, Sync);

// =============================================================================
// REGISTRATION
// =============================================================================

static MONITOR: Once<FaultMonitor<'static>> = Once::new();

/// Install the generation backend and bring up the fault monitor
///
/// Called once during platform initialization with the chip capability
/// set, the register space and the client table for the detected
/// generation. Validates the supplied tables, then installs the monitor
/// for the lifetime of the process; later calls return the already
/// installed monitor unchanged (init-once, no teardown).
pub fn register(
    chip: &'static dyn ChipOps,
    mc_regs: &'static dyn McRegisters,
    clients: &'static ClientTable,
    config: MonitorConfig,
) -> Result<&'static FaultMonitor<'static>> {
    chip.faults().validate()?;
    clients.validate()?;
    Ok(MONITOR.call_once(|| FaultMonitor::new(chip, mc_regs, clients, config)))
}

/// The installed fault monitor, if registration has run
pub fn monitor() -> Option<&'static FaultMonitor<'static>> {
    MONITOR.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::*;

    fn monitor_over<'a>(chip: &'a TestChip, mc_regs: &'a TestRegisters) -> FaultMonitor<'a> {
        FaultMonitor::new(
            chip,
            mc_regs,
            &CLIENT_TABLE,
            MonitorConfig {
                arb_sig: INT_ARB,
                ..MonitorConfig::default()
            },
        )
    }

    #[test]
    fn test_handle_drives_full_sequence() {
        let chip = TestChip::new();
        let mc_regs = TestRegisters::new();
        mc_regs.seed(STAT_REG, 3);
        mc_regs.seed(ADDR_REG, 0x1000);

        let m = monitor_over(&chip, &mc_regs);
        m.handle(IrqLine::new(32), SourceChannel::new(0), INT_DECERR, 100);

        assert_eq!(
            chip.calls(),
            [
                BackendCall::Disable(32),
                BackendCall::Log(32),
                BackendCall::Clear(32),
                BackendCall::Enable(32),
            ]
        );
        assert_eq!(chip.reports().len(), 1);
        assert_eq!(m.phase(), ServicePhase::Idle);
    }

    #[test]
    fn test_unknown_word_still_completes_sequence() {
        let chip = TestChip::new();
        let mc_regs = TestRegisters::new();

        let m = monitor_over(&chip, &mc_regs);
        m.handle(IrqLine::new(32), SourceChannel::new(0), 1 << 30, 0);

        assert_eq!(
            chip.calls(),
            [
                BackendCall::Disable(32),
                BackendCall::Log(32),
                BackendCall::Clear(32),
                BackendCall::Enable(32),
            ]
        );
        // Bit 30 is outside the fault mask; the raw word surfaces in the
        // unknown report.
        assert_eq!(chip.unknowns(), [1 << 30]);
    }

    #[test]
    fn test_diagnostics_rendering() {
        let chip = TestChip::new();
        let mc_regs = TestRegisters::new();
        mc_regs.seed(STAT_REG, 3);
        mc_regs.seed(ADDR_REG, 0);

        let m = monitor_over(&chip, &mc_regs);
        m.handle(IrqLine::new(32), SourceChannel::new(0), INT_DECERR, 1_000);
        m.handle(IrqLine::new(32), SourceChannel::new(0), INT_ARB, 2_000);
        m.handle(IrqLine::new(32), SourceChannel::new(0), INT_ARB, 3_000);

        let mut out = alloc::string::String::new();
        m.render_diagnostics(&mut out).unwrap();

        assert!(out.contains("gpu 1"));
        assert!(out.contains("unknown 2"));
        assert!(out.contains("arb-avg 1000"));
    }

    #[test]
    fn test_register_is_init_once() {
        static CHIP: TestChip = TestChip::new();
        static REGS: TestRegisters = TestRegisters::new();

        let config = MonitorConfig::default();
        let first = register(&CHIP, &REGS, &CLIENT_TABLE, config).unwrap();
        let second = register(&CHIP, &REGS, &CLIENT_TABLE, config).unwrap();
        assert!(core::ptr::eq(first, second));
        assert!(monitor().is_some());
    }
}
