//! # EMBER T124 Generation Support
//!
//! Everything the chip-agnostic fault engine needs to run on a T124
//! memory controller: the fault descriptor and client tables, interrupt
//! line control over the MC register block, and the generation's report
//! and diagnostics wording.
//!
//! Bring-up is one call:
//!
//! ```ignore
//! let monitor = ember_gen_t124::register(mc_register_space)?;
//! ```

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

#[cfg(test)]
extern crate alloc;

use core::fmt;

use spin::Once;

use ember_core::{FaultTable, IrqLine, Result, SourceChannel};
use ember_fault::{FaultMonitor, MonitorConfig};
use ember_hal::{ChipOps, DiagnosticsView, FaultReport, IntrDescriptions, McRegisters};

// =============================================================================
// MODULE EXPORTS
// =============================================================================

pub mod report;
pub mod tables;

// =============================================================================
// T124 CHIP BACKEND
// =============================================================================

/// T124 implementation of the chip capability set
pub struct T124Chip {
    mc_regs: &'static dyn McRegisters,
}

impl T124Chip {
    /// Create the backend over the MC register space
    pub const fn new(mc_regs: &'static dyn McRegisters) -> Self {
        Self { mc_regs }
    }
}

impl ChipOps for T124Chip {
    fn faults(&self) -> &FaultTable {
        &tables::FAULTS
    }

    fn interrupt_mask(&self) -> u32 {
        tables::INT_MASK
    }

    fn interrupt_descriptions(&self) -> &IntrDescriptions {
        &tables::DESCRIPTIONS
    }

    fn render_report(&self, fault_report: &FaultReport<'_>) {
        report::render(fault_report);
    }

    fn render_diagnostics(
        &self,
        view: &DiagnosticsView<'_>,
        sink: &mut dyn fmt::Write,
    ) -> fmt::Result {
        report::render_diagnostics(view, sink)
    }

    fn disable_interrupt(&self, _irq: IrqLine) {
        self.mc_regs.write(tables::mc::INT_MASK, 0);
    }

    fn enable_interrupt(&self, _irq: IrqLine) {
        self.mc_regs.write(tables::mc::INT_MASK, tables::INT_MASK);
    }

    fn clear_interrupt(&self, _irq: IrqLine) {
        // Write-one-to-clear; once cleared the MC latches the next fault.
        self.mc_regs.write(tables::mc::INT_STATUS, tables::INT_MASK);
    }

    fn log_fault(&self, irq: IrqLine) {
        let status = self.mc_regs.read(tables::mc::INT_STATUS);
        log::trace!("mc int status {:#010x} latched on line {}", status, irq);
    }
}

impl fmt::Debug for T124Chip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("T124Chip").finish()
    }
}

// =============================================================================
// REGISTRATION
// =============================================================================

static CHIP: Once<T124Chip> = Once::new();

/// Install the T124 backend and bring up the fault monitor
///
/// Reads the arbitration signature and all tables from this crate's
/// generation data; everything else follows the engine's defaults.
pub fn register(mc_regs: &'static dyn McRegisters) -> Result<&'static FaultMonitor<'static>> {
    let chip = CHIP.call_once(|| T124Chip::new(mc_regs));
    ember_fault::register(
        chip,
        mc_regs,
        &tables::CLIENTS,
        MonitorConfig {
            arb_sig: tables::intr::ARBITRATION_EMEM,
            ..MonitorConfig::default()
        },
    )
}

/// Service one T124 fault interrupt end to end
///
/// Convenience wrapper for hosts whose interrupt scheme is not split:
/// reads the latched status, then drives the full mask/log/clear/unmask
/// cycle. T124 has a single MC channel.
pub fn handle_interrupt(
    monitor: &FaultMonitor<'_>,
    mc_regs: &dyn McRegisters,
    irq: IrqLine,
    now_ns: u64,
) {
    let raw_status = mc_regs.read(tables::mc::INT_STATUS);
    monitor.handle(irq, SourceChannel::new(0), raw_status, now_ns);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use ember_core::RegOffset;
    use spin::Mutex;

    struct FakeRegs {
        reads: Mutex<Vec<(u32, u32)>>,
        writes: Mutex<Vec<(u32, u32)>>,
    }

    impl FakeRegs {
        const fn new() -> Self {
            Self {
                reads: Mutex::new(Vec::new()),
                writes: Mutex::new(Vec::new()),
            }
        }

        fn seed(&self, offset: RegOffset, value: u32) {
            self.reads.lock().push((offset.raw(), value));
        }

        fn writes(&self) -> Vec<(u32, u32)> {
            self.writes.lock().clone()
        }
    }

    impl McRegisters for FakeRegs {
        fn read(&self, offset: RegOffset) -> u32 {
            self.reads
                .lock()
                .iter()
                .rev()
                .find(|(o, _)| *o == offset.raw())
                .map(|(_, v)| *v)
                .unwrap_or(ember_hal::READ_FAILED)
        }

        fn write(&self, offset: RegOffset, value: u32) {
            self.writes.lock().push((offset.raw(), value));
        }
    }

    #[test]
    fn test_interrupt_control_register_writes() {
        static REGS: FakeRegs = FakeRegs::new();
        let chip = T124Chip::new(&REGS);
        let irq = IrqLine::new(32);

        chip.disable_interrupt(irq);
        chip.clear_interrupt(irq);
        chip.enable_interrupt(irq);

        assert_eq!(
            REGS.writes(),
            [
                (tables::mc::INT_MASK.raw(), 0),
                (tables::mc::INT_STATUS.raw(), tables::INT_MASK),
                (tables::mc::INT_MASK.raw(), tables::INT_MASK),
            ]
        );
    }

    #[test]
    fn test_full_service_over_fake_hardware() {
        static REGS: FakeRegs = FakeRegs::new();
        // SMMU page fault from gpusrd (id 40), non-secure read.
        REGS.seed(tables::mc::INT_STATUS, tables::intr::INVALID_SMMU_PAGE);
        REGS.seed(tables::mc::ERR_STATUS, (0b011 << 25) | 40);
        REGS.seed(tables::mc::ERR_ADR, 0x0040_2000);

        let chip = T124Chip::new(&REGS);
        let monitor = FaultMonitor::new(
            &chip,
            &REGS,
            &tables::CLIENTS,
            MonitorConfig {
                arb_sig: tables::intr::ARBITRATION_EMEM,
                ..MonitorConfig::default()
            },
        );

        handle_interrupt(&monitor, &REGS, IrqLine::new(32), 0);

        // gpusrd picked up the fault; the line was masked and re-armed.
        assert_eq!(monitor.stats().count(40), 1);
        let writes = REGS.writes();
        assert_eq!(writes.first(), Some(&(tables::mc::INT_MASK.raw(), 0)));
        assert_eq!(
            writes.last(),
            Some(&(tables::mc::INT_MASK.raw(), tables::INT_MASK))
        );
    }
}
