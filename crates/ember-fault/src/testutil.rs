//! Test doubles shared by the engine, sequencer and monitor tests:
//! a recording generation backend and a seedable register space.

use core::fmt;

use alloc::vec::Vec;
use spin::Mutex;

use ember_core::{
    ClientDescriptor, ClientTable, FaultDescriptor, FaultFlags, FaultTable, IrqLine, RegOffset,
    SourceChannel,
};
use ember_hal::{ChipOps, DiagnosticsView, FaultReport, IntrDescriptions, McRegisters, READ_FAILED};

// =============================================================================
// TEST GENERATION DATA
// =============================================================================

pub const INT_DECERR: u32 = 1 << 6;
pub const INT_ARB: u32 = 1 << 9;
pub const INT_SMMU_PAGE: u32 = 1 << 10;
pub const INT_MTS: u32 = 1 << 16;

pub const STAT_REG: RegOffset = RegOffset::new(0x08);
pub const ADDR_REG: RegOffset = RegOffset::new(0x10);
pub const MTS_STAT0: RegOffset = RegOffset::new(0x9b0);
pub const MTS_STAT1: RegOffset = RegOffset::new(0x9b4);

static FAULTS: [FaultDescriptor; 4] = [
    FaultDescriptor::new(
        INT_DECERR,
        "address decode error",
        FaultFlags::empty(),
        STAT_REG,
        ADDR_REG,
    ),
    FaultDescriptor::new(
        INT_SMMU_PAGE,
        "invalid smmu page",
        FaultFlags::SMMU_INFO,
        STAT_REG,
        ADDR_REG,
    ),
    FaultDescriptor::new(
        INT_ARB,
        "arbitration error",
        FaultFlags::NO_STATUS,
        RegOffset::none(),
        RegOffset::none(),
    ),
    FaultDescriptor::new(
        INT_MTS,
        "mts carveout violation",
        FaultFlags::TWO_STATUS,
        MTS_STAT0,
        MTS_STAT1,
    ),
];

static CLIENTS: [ClientDescriptor; 4] = [
    ClientDescriptor::new("ptcr", "ptc", 0),
    ClientDescriptor::new("display0a", "dc", 1),
    ClientDescriptor::new("avpcarm7r", "avpc", 2),
    ClientDescriptor::new("gpu", "gpu", 3),
];

pub static FAULT_TABLE: FaultTable = FaultTable::new(&FAULTS);
pub static CLIENT_TABLE: ClientTable = ClientTable::new(&CLIENTS);

static DESCRIPTIONS: IntrDescriptions = IntrDescriptions::new([
    "", "", "", "", "", "", "decerr-emem", "", "", "arb-emem", "smmu-page", "", "", "", "", "",
    "decerr-mts", "", "", "", "", "", "", "", "", "", "", "", "", "", "", "",
]);

// =============================================================================
// RECORDING CHIP BACKEND
// =============================================================================

/// One observed call on the interrupt-control backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCall {
    Disable(u32),
    Log(u32),
    Clear(u32),
    Enable(u32),
}

/// Simplified copy of a rendered report, for assertions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    pub msg: &'static str,
    pub client: &'static str,
    pub channel: u32,
    pub status: Option<u32>,
    pub second_status: Option<u32>,
    pub addr: Option<u64>,
    pub secure: bool,
    pub write: bool,
    pub smmu: Option<u8>,
}

/// Generation backend that records everything the engine does to it
pub struct TestChip {
    calls: Mutex<Vec<BackendCall>>,
    reports: Mutex<Vec<ReportRecord>>,
    unknowns: Mutex<Vec<u32>>,
}

impl TestChip {
    pub const fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reports: Mutex::new(Vec::new()),
            unknowns: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().clone()
    }

    pub fn reports(&self) -> Vec<ReportRecord> {
        self.reports.lock().clone()
    }

    pub fn unknowns(&self) -> Vec<u32> {
        self.unknowns.lock().clone()
    }
}

impl ChipOps for TestChip {
    fn faults(&self) -> &FaultTable {
        &FAULT_TABLE
    }

    fn interrupt_mask(&self) -> u32 {
        INT_DECERR | INT_ARB | INT_SMMU_PAGE | INT_MTS
    }

    fn interrupt_descriptions(&self) -> &IntrDescriptions {
        &DESCRIPTIONS
    }

    fn render_report(&self, report: &FaultReport<'_>) {
        self.reports.lock().push(ReportRecord {
            msg: report.desc.msg,
            client: report.client.name,
            channel: report.channel.raw(),
            status: report.status,
            second_status: report.second_status,
            addr: report.addr.map(|a| a.raw()),
            secure: report.secure,
            write: report.write,
            smmu: report.smmu_context,
        });
    }

    fn render_unknown(&self, _channel: SourceChannel, int_status: u32) {
        self.unknowns.lock().push(int_status);
    }

    fn render_diagnostics(
        &self,
        view: &DiagnosticsView<'_>,
        sink: &mut dyn fmt::Write,
    ) -> fmt::Result {
        for (client, count) in view.clients_with_counts() {
            if count > 0 {
                writeln!(sink, "{} {}", client.name, count)?;
            }
        }
        writeln!(sink, "unknown {}", view.unknown_client_count())?;
        writeln!(sink, "arb-avg {}", view.arb_average_ns)
    }

    fn disable_interrupt(&self, irq: IrqLine) {
        self.calls.lock().push(BackendCall::Disable(irq.raw()));
    }

    fn enable_interrupt(&self, irq: IrqLine) {
        self.calls.lock().push(BackendCall::Enable(irq.raw()));
    }

    fn clear_interrupt(&self, irq: IrqLine) {
        self.calls.lock().push(BackendCall::Clear(irq.raw()));
    }

    fn log_fault(&self, irq: IrqLine) {
        self.calls.lock().push(BackendCall::Log(irq.raw()));
    }
}

// =============================================================================
// SEEDABLE REGISTER SPACE
// =============================================================================

/// Register space backed by a small offset/value map
pub struct TestRegisters {
    cells: Mutex<Vec<(u32, u32)>>,
}

impl TestRegisters {
    pub const fn new() -> Self {
        Self {
            cells: Mutex::new(Vec::new()),
        }
    }

    pub fn seed(&self, offset: RegOffset, value: u32) {
        self.cells.lock().push((offset.raw(), value));
    }
}

impl McRegisters for TestRegisters {
    fn read(&self, offset: RegOffset) -> u32 {
        self.cells
            .lock()
            .iter()
            .rev()
            .find(|(o, _)| *o == offset.raw())
            .map(|(_, v)| *v)
            .unwrap_or(READ_FAILED)
    }

    fn write(&self, offset: RegOffset, value: u32) {
        self.cells.lock().push((offset.raw(), value));
    }
}
