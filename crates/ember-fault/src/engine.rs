//! # Fault Decode & Report Engine
//!
//! Turns a raw interrupt status word into a structured fault report:
//! descriptor lookup through the generation backend, register extraction
//! as the descriptor's capability flags allow, client resolution with
//! sentinel fallback, then throttled rendering.
//!
//! Statistics update on every decode; rendering is gated first by the
//! per-signature throttle and then by the silenced flag. That ordering
//! is part of the contract, not an optimization.

use ember_core::{ClientTable, FaultAddr, FaultDescriptor, FaultFlags, SourceChannel};
use ember_hal::{regs, ChipOps, FaultReport, McRegisters, READ_FAILED};

use crate::arb::ArbTracker;
use crate::stats::ClientStats;
use crate::throttle::ThrottleState;
use crate::MonitorConfig;

// =============================================================================
// DECODE ENGINE
// =============================================================================

/// Chip-agnostic decode pipeline and the state it maintains
pub struct DecodeEngine<'a> {
    chip: &'a dyn ChipOps,
    mc_regs: &'a dyn McRegisters,
    clients: &'a ClientTable,
    config: MonitorConfig,
    throttle: ThrottleState,
    stats: ClientStats,
    arb: ArbTracker,
}

impl<'a> DecodeEngine<'a> {
    /// Create an engine over a generation backend
    ///
    /// Throttle and statistics slots are sized from the backend's tables,
    /// each with one extra slot for the unknown sentinel.
    pub fn new(
        chip: &'a dyn ChipOps,
        mc_regs: &'a dyn McRegisters,
        clients: &'a ClientTable,
        config: MonitorConfig,
    ) -> Self {
        Self {
            chip,
            mc_regs,
            clients,
            throttle: ThrottleState::new(chip.faults().len() + 1, config.max_prints),
            stats: ClientStats::new(clients.len() + 1),
            arb: ArbTracker::new(),
            config,
        }
    }

    /// The active generation backend
    pub fn chip(&self) -> &'a dyn ChipOps {
        self.chip
    }

    /// The client table installed at registration
    pub fn clients(&self) -> &'a ClientTable {
        self.clients
    }

    /// Throttle and silenced state
    pub fn throttle(&self) -> &ThrottleState {
        &self.throttle
    }

    /// Per-client cumulative fault counters
    pub fn stats(&self) -> &ClientStats {
        &self.stats
    }

    /// Arbitration interval tracker
    pub fn arb(&self) -> &ArbTracker {
        &self.arb
    }

    /// Decode one interrupt status word
    ///
    /// Runs in deferred interrupt context: bounded work, no blocking
    /// beyond the arbitration tracker's short lock.
    pub fn decode(&self, channel: SourceChannel, int_status: u32, now_ns: u64) {
        match self.chip.lookup_fault(int_status) {
            Some(m) => self.decode_known(channel, m.slot, m.desc, now_ns),
            None => self.decode_unknown(channel, int_status),
        }
    }

    fn decode_known(
        &self,
        channel: SourceChannel,
        slot: usize,
        desc: &FaultDescriptor,
        now_ns: u64,
    ) {
        if self.config.arb_sig != 0 && desc.sig & self.config.arb_sig == self.config.arb_sig {
            self.arb.record(now_ns);
        }

        let (report, client_slot) = self.extract(channel, desc);

        // Statistics first, unconditionally; then the throttle counter,
        // which also advances unconditionally; render only if the
        // pre-increment count was under the cap and output is not
        // silenced.
        self.stats.record(client_slot);
        let may_render = self.throttle.note(slot);
        if may_render && !self.throttle.silenced() {
            self.chip.render_report(&report);
        }
    }

    fn decode_unknown(&self, channel: SourceChannel, int_status: u32) {
        self.stats.record(self.clients.unknown_slot());
        let may_render = self.throttle.note(self.chip.faults().unknown_slot());
        if may_render && !self.throttle.silenced() {
            self.chip.render_unknown(channel, int_status);
        }
    }

    /// Read and decode the fault registers a descriptor points at
    fn extract<'d>(
        &self,
        channel: SourceChannel,
        desc: &'d FaultDescriptor,
    ) -> (FaultReport<'d>, usize) {
        if desc.flags.contains(FaultFlags::NO_STATUS) {
            return (
                FaultReport {
                    desc,
                    client: ClientTable::unknown(),
                    channel,
                    status: None,
                    second_status: None,
                    addr: None,
                    secure: false,
                    write: false,
                    smmu_context: None,
                },
                self.clients.unknown_slot(),
            );
        }

        let status = self.mc_regs.read(desc.stat_reg);
        if status == READ_FAILED {
            // Nothing in the word is trustworthy; report the failed read
            // itself rather than fields decoded from all-ones.
            return (
                FaultReport {
                    desc,
                    client: ClientTable::unknown(),
                    channel,
                    status: Some(status),
                    second_status: None,
                    addr: None,
                    secure: false,
                    write: false,
                    smmu_context: None,
                },
                self.clients.unknown_slot(),
            );
        }

        let (second_status, addr) = if desc.flags.contains(FaultFlags::TWO_STATUS) {
            (Some(self.mc_regs.read(desc.addr_reg)), None)
        } else {
            let lo = self.mc_regs.read(desc.addr_reg) as u64;
            (
                None,
                Some(FaultAddr::new(lo | regs::address_extension(status))),
            )
        };

        let smmu_context = if desc.flags.contains(FaultFlags::SMMU_INFO) {
            Some(regs::smmu_context(status))
        } else {
            None
        };

        let resolved = self.clients.resolve(regs::client_id(status));
        (
            FaultReport {
                desc,
                client: resolved.desc,
                channel,
                status: Some(status),
                second_status,
                addr,
                secure: regs::is_secure(status),
                write: regs::is_write(status),
                smmu_context,
            },
            resolved.slot,
        )
    }
}

impl core::fmt::Debug for DecodeEngine<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DecodeEngine")
            .field("throttle", &self.throttle)
            .field("stats", &self.stats)
            .field("arb", &self.arb)
            .finish()
    }
}
