//! # Chip Capability Set
//!
//! Each memory-controller generation supplies one [`ChipOps`] instance at
//! registration. It is installed once, never swapped, and drives every
//! generation-specific decision: descriptor lookup, report wording,
//! diagnostics layout and interrupt line control.

use core::fmt;

use ember_core::{
    ClientDescriptor, ClientTable, FaultAddr, FaultDescriptor, FaultMatch, FaultTable, IrqLine,
    SourceChannel,
};

// =============================================================================
// INTERRUPT DESCRIPTIONS
// =============================================================================

/// Number of interrupt description slots, one per status bit
pub const INTR_SLOTS: usize = 32;

/// Maximum length of one interrupt description
pub const MAX_DESCRIPTION_LEN: usize = 12;

/// Per-bit annotation table for raw status words
///
/// Exactly 32 slots, one per status bit, each at most 12 characters.
/// Slots for bits that are not valid interrupts stay empty. Report
/// rendering uses these to annotate status bits that resolve to no
/// structured descriptor.
#[derive(Debug, Clone, Copy)]
pub struct IntrDescriptions([&'static str; INTR_SLOTS]);

impl IntrDescriptions {
    /// Build a description table, checking slot lengths at compile time
    pub const fn new(names: [&'static str; INTR_SLOTS]) -> Self {
        let mut i = 0;
        while i < INTR_SLOTS {
            assert!(
                names[i].len() <= MAX_DESCRIPTION_LEN,
                "interrupt description exceeds its slot"
            );
            i += 1;
        }
        Self(names)
    }

    /// Description for one status bit (empty if the bit is unused)
    #[inline]
    pub const fn bit(&self, bit: u32) -> &'static str {
        self.0[(bit % 32) as usize]
    }
}

// =============================================================================
// FAULT REPORT
// =============================================================================

/// Everything the decode engine could determine about one fault
///
/// `smmu_context` is `None` when the fault did not involve the SMMU;
/// renderers must treat that as "no additional info", not as an error.
#[derive(Debug, Clone, Copy)]
pub struct FaultReport<'a> {
    /// Matched fault descriptor
    pub desc: &'a FaultDescriptor,
    /// Resolved client (the sentinel when the source id was bad)
    pub client: &'a ClientDescriptor,
    /// Channel the fault arrived on
    pub channel: SourceChannel,
    /// Primary status word; absent for faults without status registers
    pub status: Option<u32>,
    /// Second status word for two-status faults
    pub second_status: Option<u32>,
    /// Reconstructed faulting address, when the fault carries one
    pub addr: Option<FaultAddr>,
    /// Secure transaction bit
    pub secure: bool,
    /// Write access bit
    pub write: bool,
    /// Offending SMMU context, when the fault involved the SMMU
    pub smmu_context: Option<u8>,
}

// =============================================================================
// DIAGNOSTICS VIEW
// =============================================================================

/// Read-only snapshot handed to the diagnostics renderer
///
/// Count slices carry one extra trailing slot aggregating events that
/// resolved to no table entry (unknown client / unknown fault).
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticsView<'a> {
    /// Client table of the active generation
    pub clients: &'a ClientTable,
    /// Cumulative fault count per client slot
    pub client_counts: &'a [u64],
    /// Fault table of the active generation
    pub faults: &'a FaultTable,
    /// Decode attempts per fault-signature slot
    pub throttle_counts: &'a [u32],
    /// Current arbitration inter-arrival average in nanoseconds
    pub arb_average_ns: u64,
}

impl DiagnosticsView<'_> {
    /// Clients paired with their cumulative fault counts
    pub fn clients_with_counts(
        &self,
    ) -> impl Iterator<Item = (&'static ClientDescriptor, u64)> + '_ {
        self.clients
            .entries()
            .iter()
            .zip(self.client_counts.iter().copied())
    }

    /// Faults attributed to unresolvable source ids
    pub fn unknown_client_count(&self) -> u64 {
        self.client_counts
            .get(self.clients.unknown_slot())
            .copied()
            .unwrap_or(0)
    }

    /// Fault descriptors paired with their decode-attempt counts
    pub fn faults_with_counts(
        &self,
    ) -> impl Iterator<Item = (&'static FaultDescriptor, u32)> + '_ {
        self.faults
            .entries()
            .iter()
            .zip(self.throttle_counts.iter().copied())
    }

    /// Decode attempts that matched no descriptor
    pub fn unknown_fault_count(&self) -> u32 {
        self.throttle_counts
            .get(self.faults.unknown_slot())
            .copied()
            .unwrap_or(0)
    }
}

// =============================================================================
// CHIP OPS TRAIT
// =============================================================================

/// Per-generation capability set
///
/// One instance is active process-wide for the lifetime of the driver.
/// All methods except `render_diagnostics` may be called from deferred
/// interrupt context and must not block; `disable_interrupt` is
/// additionally called from hard interrupt context and must stay
/// sub-microsecond.
pub trait ChipOps: Send + Sync {
    /// Fault descriptor table for this generation
    fn faults(&self) -> &FaultTable;

    /// Status bits that are fault interrupts on this generation
    fn interrupt_mask(&self) -> u32;

    /// Per-bit annotations for raw status words
    fn interrupt_descriptions(&self) -> &IntrDescriptions;

    /// Resolve a raw interrupt status word to a descriptor
    ///
    /// Returns `None` for words no descriptor matches; the engine then
    /// takes the unknown-fault path.
    fn lookup_fault(&self, int_status: u32) -> Option<FaultMatch<'_>> {
        self.faults().lookup(int_status)
    }

    /// Render one decoded fault
    ///
    /// Only called when the report passed the throttle and the silenced
    /// gate; implementations emit unconditionally.
    fn render_report(&self, report: &FaultReport<'_>);

    /// Render a status word that matched no descriptor
    ///
    /// The default annotates every set bit that has a description.
    fn render_unknown(&self, channel: SourceChannel, int_status: u32) {
        log::error!(
            "unknown mc fault, channel {}, int_status = {:#010x}",
            channel,
            int_status
        );
        let descs = self.interrupt_descriptions();
        for bit in 0..32 {
            if int_status & (1 << bit) != 0 && !descs.bit(bit).is_empty() {
                log::error!("  bit {}: {}", bit, descs.bit(bit));
            }
        }
    }

    /// Render the cumulative diagnostics view into a sink
    ///
    /// Called from a blockable context, never from the interrupt path.
    fn render_diagnostics(
        &self,
        view: &DiagnosticsView<'_>,
        sink: &mut dyn fmt::Write,
    ) -> fmt::Result;

    /// Mask the fault interrupt line
    ///
    /// Called from hard interrupt context, before any decode work, so
    /// the source cannot re-fire under the decoder.
    fn disable_interrupt(&self, irq: IrqLine);

    /// Re-enable the fault interrupt line
    ///
    /// Called from deferred context after the fault is logged and the
    /// status bit cleared.
    fn enable_interrupt(&self, irq: IrqLine);

    /// Clear the latched interrupt status
    ///
    /// Once cleared, the controller is ready to latch the next fault.
    fn clear_interrupt(&self, irq: IrqLine);

    /// Note the fault in the generation's own log, if it keeps one
    fn log_fault(&self, irq: IrqLine) {
        log::trace!("mc fault latched on line {}", irq);
    }
}
