//! # T124 Generation Data
//!
//! Interrupt signatures, register offsets, the fault descriptor table
//! and the client table for the T124 memory controller. Pure data; all
//! behavior lives in the chip-agnostic engine.

use ember_core::{ClientDescriptor, ClientTable, FaultDescriptor, FaultFlags, FaultTable, RegOffset};
use ember_hal::IntrDescriptions;

// =============================================================================
// INTERRUPT SIGNATURES
// =============================================================================

/// T124 fault interrupt status bits
pub mod intr {
    /// EMEM address decode error
    pub const DECERR_EMEM: u32 = 1 << 6;
    /// Security violation
    pub const SECURITY_VIOLATION: u32 = 1 << 8;
    /// EMEM arbitration error
    pub const ARBITRATION_EMEM: u32 = 1 << 9;
    /// SMMU translation fault
    pub const INVALID_SMMU_PAGE: u32 = 1 << 10;
    /// ASID update outside the secure path
    pub const INVALID_APB_ASID_UPDATE: u32 = 1 << 11;
    /// VPR carveout decode error
    pub const DECERR_VPR: u32 = 1 << 12;
    /// SEC carveout violation
    pub const SECERR_SEC: u32 = 1 << 13;
    /// MTS carveout decode error
    pub const DECERR_MTS: u32 = 1 << 16;
    /// Generalized carveout decode error
    pub const DECERR_GSC: u32 = 1 << 17;
}

/// All fault interrupt bits this generation raises
pub const INT_MASK: u32 = intr::DECERR_EMEM
    | intr::SECURITY_VIOLATION
    | intr::ARBITRATION_EMEM
    | intr::INVALID_SMMU_PAGE
    | intr::INVALID_APB_ASID_UPDATE
    | intr::DECERR_VPR
    | intr::SECERR_SEC
    | intr::DECERR_MTS
    | intr::DECERR_GSC;

// =============================================================================
// REGISTER OFFSETS
// =============================================================================

/// T124 memory-controller register offsets
pub mod mc {
    use ember_core::RegOffset;

    /// Latched interrupt status
    pub const INT_STATUS: RegOffset = RegOffset::new(0x00);
    /// Interrupt enable mask
    pub const INT_MASK: RegOffset = RegOffset::new(0x04);
    /// General fault status
    pub const ERR_STATUS: RegOffset = RegOffset::new(0x08);
    /// General fault address
    pub const ERR_ADR: RegOffset = RegOffset::new(0x10);
    /// VPR fault status
    pub const ERR_VPR_STATUS: RegOffset = RegOffset::new(0x654);
    /// VPR fault address
    pub const ERR_VPR_ADR: RegOffset = RegOffset::new(0x658);
    /// SEC carveout fault status
    pub const ERR_SEC_STATUS: RegOffset = RegOffset::new(0x67c);
    /// SEC carveout fault address
    pub const ERR_SEC_ADR: RegOffset = RegOffset::new(0x680);
    /// MTS carveout fault status
    pub const ERR_MTS_STATUS: RegOffset = RegOffset::new(0x9b0);
    /// MTS carveout fault address
    pub const ERR_MTS_ADR: RegOffset = RegOffset::new(0x9b4);
    /// Generalized carveout fault status, first word
    pub const ERR_GSC_STATUS0: RegOffset = RegOffset::new(0xc00);
    /// Generalized carveout fault status, second word
    pub const ERR_GSC_STATUS1: RegOffset = RegOffset::new(0xc04);
}

// =============================================================================
// FAULT TABLE
// =============================================================================

// Combined signatures must precede their single-bit components; lookup
// takes the first full match in table order.
static FAULT_ENTRIES: [FaultDescriptor; 12] = [
    FaultDescriptor::new(
        intr::DECERR_EMEM | intr::INVALID_SMMU_PAGE,
        "EMEM decode error on PDE or PTE entry",
        FaultFlags::SMMU_INFO,
        mc::ERR_STATUS,
        mc::ERR_ADR,
    ),
    FaultDescriptor::new(
        intr::DECERR_EMEM,
        "EMEM address decode error",
        FaultFlags::empty(),
        mc::ERR_STATUS,
        mc::ERR_ADR,
    ),
    FaultDescriptor::new(
        intr::SECURITY_VIOLATION | intr::INVALID_SMMU_PAGE,
        "security violation on PDE or PTE entry",
        FaultFlags::SMMU_INFO,
        mc::ERR_STATUS,
        mc::ERR_ADR,
    ),
    FaultDescriptor::new(
        intr::SECURITY_VIOLATION,
        "non secure access to secure region",
        FaultFlags::empty(),
        mc::ERR_STATUS,
        mc::ERR_ADR,
    ),
    FaultDescriptor::new(
        intr::INVALID_SMMU_PAGE,
        "SMMU address translation fault",
        FaultFlags::SMMU_INFO,
        mc::ERR_STATUS,
        mc::ERR_ADR,
    ),
    FaultDescriptor::new(
        intr::INVALID_APB_ASID_UPDATE,
        "ASID update from non-secure context",
        FaultFlags::NO_STATUS,
        RegOffset::none(),
        RegOffset::none(),
    ),
    FaultDescriptor::new(
        intr::DECERR_VPR | intr::INVALID_SMMU_PAGE,
        "VPR violation on PDE or PTE entry",
        FaultFlags::SMMU_INFO,
        mc::ERR_VPR_STATUS,
        mc::ERR_VPR_ADR,
    ),
    FaultDescriptor::new(
        intr::DECERR_VPR,
        "MC request violates VPR requirements",
        FaultFlags::empty(),
        mc::ERR_VPR_STATUS,
        mc::ERR_VPR_ADR,
    ),
    FaultDescriptor::new(
        intr::SECERR_SEC,
        "MC request violated SEC carveout requirements",
        FaultFlags::empty(),
        mc::ERR_SEC_STATUS,
        mc::ERR_SEC_ADR,
    ),
    FaultDescriptor::new(
        intr::DECERR_MTS,
        "MTS carveout access violation",
        FaultFlags::empty(),
        mc::ERR_MTS_STATUS,
        mc::ERR_MTS_ADR,
    ),
    FaultDescriptor::new(
        intr::DECERR_GSC,
        "GSC access violation",
        FaultFlags::TWO_STATUS,
        mc::ERR_GSC_STATUS0,
        mc::ERR_GSC_STATUS1,
    ),
    FaultDescriptor::new(
        intr::ARBITRATION_EMEM,
        "EMEM arbitration error",
        FaultFlags::NO_STATUS,
        RegOffset::none(),
        RegOffset::none(),
    ),
];

/// T124 fault descriptor table
pub static FAULTS: FaultTable = FaultTable::new(&FAULT_ENTRIES);

// =============================================================================
// INTERRUPT DESCRIPTIONS
// =============================================================================

/// Per-bit annotations for T124 status words
pub static DESCRIPTIONS: IntrDescriptions = IntrDescriptions::new([
    "",            // 0
    "",            // 1
    "",            // 2
    "",            // 3
    "",            // 4
    "",            // 5
    "decerr-emem", // 6
    "",            // 7
    "sec-viol",    // 8
    "arb-emem",    // 9
    "smmu-page",   // 10
    "apb-asid",    // 11
    "decerr-vpr",  // 12
    "secerr-sec",  // 13
    "",            // 14
    "",            // 15
    "decerr-mts",  // 16
    "decerr-gsc",  // 17
    "",            // 18
    "",            // 19
    "",            // 20
    "",            // 21
    "",            // 22
    "",            // 23
    "",            // 24
    "",            // 25
    "",            // 26
    "",            // 27
    "",            // 28
    "",            // 29
    "",            // 30
    "",            // 31
]);

// =============================================================================
// CLIENT TABLE
// =============================================================================

static CLIENT_ENTRIES: [ClientDescriptor; 59] = [
    ClientDescriptor::new("ptcr", "ptc", 0),
    ClientDescriptor::new("display0a", "dc", 1),
    ClientDescriptor::new("display0ab", "dcb", 2),
    ClientDescriptor::new("display0b", "dc", 3),
    ClientDescriptor::new("display0bb", "dcb", 4),
    ClientDescriptor::new("display0c", "dc", 5),
    ClientDescriptor::new("display0cb", "dcb", 6),
    ClientDescriptor::new("afir", "afi", 7),
    ClientDescriptor::new("avpcarm7r", "avpc", 8),
    ClientDescriptor::new("displayhc", "dc", 9),
    ClientDescriptor::new("displayhcb", "dcb", 10),
    ClientDescriptor::new("hdar", "hda", 11),
    ClientDescriptor::new("host1xdmar", "hc", 12),
    ClientDescriptor::new("host1xr", "hc", 13),
    ClientDescriptor::new("msencsrd", "msenc", 14),
    ClientDescriptor::new("ppcsahbdmar", "ppcs", 15),
    ClientDescriptor::new("ppcsahbslvr", "ppcs", 16),
    ClientDescriptor::new("satar", "sata", 17),
    ClientDescriptor::new("vdebsevr", "vde", 18),
    ClientDescriptor::new("vdember", "vde", 19),
    ClientDescriptor::new("vdemcer", "vde", 20),
    ClientDescriptor::new("vdetper", "vde", 21),
    ClientDescriptor::new("mpcorelpr", "mpcorelp", 22),
    ClientDescriptor::new("mpcorer", "mpcore", 23),
    ClientDescriptor::new("afiw", "afi", 24),
    ClientDescriptor::new("avpcarm7w", "avpc", 25),
    ClientDescriptor::new("hdaw", "hda", 26),
    ClientDescriptor::new("host1xw", "hc", 27),
    ClientDescriptor::new("ispwa", "isp", 28),
    ClientDescriptor::new("ispwb", "isp", 29),
    ClientDescriptor::new("mpcorelpw", "mpcorelp", 30),
    ClientDescriptor::new("mpcorew", "mpcore", 31),
    ClientDescriptor::new("msencswr", "msenc", 32),
    ClientDescriptor::new("ppcsahbdmaw", "ppcs", 33),
    ClientDescriptor::new("ppcsahbslvw", "ppcs", 34),
    ClientDescriptor::new("sataw", "sata", 35),
    ClientDescriptor::new("vdebsevw", "vde", 36),
    ClientDescriptor::new("vdedbgw", "vde", 37),
    ClientDescriptor::new("vdembew", "vde", 38),
    ClientDescriptor::new("vdetpmw", "vde", 39),
    ClientDescriptor::new("gpusrd", "gpu", 40),
    ClientDescriptor::new("gpuswr", "gpu", 41),
    ClientDescriptor::new("sdmmcra", "sdmmc1a", 42),
    ClientDescriptor::new("sdmmcraa", "sdmmc2a", 43),
    ClientDescriptor::new("sdmmcr", "sdmmc3a", 44),
    ClientDescriptor::new("sdmmcrab", "sdmmc4a", 45),
    ClientDescriptor::new("sdmmcwa", "sdmmc1a", 46),
    ClientDescriptor::new("sdmmcwaa", "sdmmc2a", 47),
    ClientDescriptor::new("sdmmcw", "sdmmc3a", 48),
    ClientDescriptor::new("sdmmcwab", "sdmmc4a", 49),
    ClientDescriptor::new("vicsrd", "vic", 50),
    ClientDescriptor::new("vicswr", "vic", 51),
    ClientDescriptor::new("viw", "vi", 52),
    ClientDescriptor::new("xusb_hostr", "xusb_host", 53),
    ClientDescriptor::new("xusb_hostw", "xusb_host", 54),
    ClientDescriptor::new("xusb_devr", "xusb_dev", 55),
    ClientDescriptor::new("xusb_devw", "xusb_dev", 56),
    ClientDescriptor::new("a9avpscr", "a9avp", 57),
    ClientDescriptor::new("a9avpscw", "a9avp", 58),
];

/// T124 client table
pub static CLIENTS: ClientTable = ClientTable::new(&CLIENT_ENTRIES);
