//! # Fault Descriptors
//!
//! Chip-supplied mapping from interrupt signature bits to structured
//! fault metadata. One descriptor exists for each distinct fault a
//! generation can raise.

use crate::error::{Error, Result};
use crate::types::RegOffset;

// =============================================================================
// FAULT FLAGS
// =============================================================================

bitflags::bitflags! {
    /// Capability flags describing which register reads are valid for a
    /// fault type
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FaultFlags: u32 {
        /// Status word carries an SMMU context sub-field
        const SMMU_INFO = 1 << 0;
        /// No status or address registers exist for this fault
        const NO_STATUS = 1 << 1;
        /// Two status registers, no address register
        const TWO_STATUS = 1 << 2;
    }
}

// =============================================================================
// FAULT DESCRIPTOR
// =============================================================================

/// Metadata for one distinct fault signature
///
/// `sig` is conceptually a single status bit; the full mask form leaves
/// room for combined signatures (e.g. a decode error raised through the
/// SMMU sets both bits and matches a dedicated combined entry).
#[derive(Debug, Clone, Copy)]
pub struct FaultDescriptor {
    /// Interrupt signature within the raw status word
    pub sig: u32,
    /// Human-readable cause
    pub msg: &'static str,
    /// Capability flags for this fault type
    pub flags: FaultFlags,
    /// Register holding the fault status (or the first of two)
    pub stat_reg: RegOffset,
    /// Register holding the faulting address (or the second status)
    pub addr_reg: RegOffset,
}

impl FaultDescriptor {
    /// Create a new fault descriptor
    pub const fn new(
        sig: u32,
        msg: &'static str,
        flags: FaultFlags,
        stat_reg: RegOffset,
        addr_reg: RegOffset,
    ) -> Self {
        Self {
            sig,
            msg,
            flags,
            stat_reg,
            addr_reg,
        }
    }
}

// =============================================================================
// FAULT TABLE
// =============================================================================

/// A successful descriptor lookup
///
/// `slot` is the descriptor's position in the table; the fault engine
/// uses it to index per-signature throttle counters.
#[derive(Debug, Clone, Copy)]
pub struct FaultMatch<'a> {
    /// Table index of the matched descriptor
    pub slot: usize,
    /// The matched descriptor
    pub desc: &'a FaultDescriptor,
}

/// Static per-generation fault descriptor table
#[derive(Debug, Clone, Copy)]
pub struct FaultTable {
    entries: &'static [FaultDescriptor],
}

impl FaultTable {
    /// Wrap a chip-supplied descriptor slice
    pub const fn new(entries: &'static [FaultDescriptor]) -> Self {
        Self { entries }
    }

    /// Number of descriptors in the table
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Throttle slot reserved for status words no descriptor matches
    pub const fn unknown_slot(&self) -> usize {
        self.entries.len()
    }

    /// All descriptors in table order
    pub fn entries(&self) -> &'static [FaultDescriptor] {
        self.entries
    }

    /// Resolve a raw interrupt status word to a descriptor
    ///
    /// Scans in table order and returns the first entry whose full
    /// signature is present in the word, so combined signatures must be
    /// listed before their single-bit components. Returns `None` when no
    /// entry matches; the caller substitutes the unknown-fault sentinel.
    pub fn lookup(&self, int_status: u32) -> Option<FaultMatch<'_>> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, e)| e.sig != 0 && int_status & e.sig == e.sig)
            .map(|(slot, desc)| FaultMatch { slot, desc })
    }

    /// Check the table invariant: no two entries claim the same signature
    pub fn validate(&self) -> Result<()> {
        for (i, a) in self.entries.iter().enumerate() {
            for b in &self.entries[i + 1..] {
                if a.sig == b.sig {
                    return Err(Error::DuplicateSignature);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAT: RegOffset = RegOffset::new(0x08);
    const ADDR: RegOffset = RegOffset::new(0x10);

    static ENTRIES: [FaultDescriptor; 3] = [
        FaultDescriptor::new(
            (1 << 6) | (1 << 10),
            "decode error on page entry",
            FaultFlags::SMMU_INFO,
            STAT,
            ADDR,
        ),
        FaultDescriptor::new(1 << 6, "address decode error", FaultFlags::empty(), STAT, ADDR),
        FaultDescriptor::new(1 << 10, "translation fault", FaultFlags::SMMU_INFO, STAT, ADDR),
    ];

    static TABLE: FaultTable = FaultTable::new(&ENTRIES);

    #[test]
    fn test_lookup_single_bit() {
        let m = TABLE.lookup(1 << 6).unwrap();
        assert_eq!(m.slot, 1);
        assert_eq!(m.desc.msg, "address decode error");
    }

    #[test]
    fn test_lookup_prefers_combined_signature() {
        // Both bits set: the combined entry listed first must win.
        let m = TABLE.lookup((1 << 6) | (1 << 10)).unwrap();
        assert_eq!(m.slot, 0);
    }

    #[test]
    fn test_lookup_requires_full_signature() {
        // Bit 10 alone must not match the combined entry.
        let m = TABLE.lookup(1 << 10).unwrap();
        assert_eq!(m.slot, 2);
    }

    #[test]
    fn test_lookup_miss() {
        assert!(TABLE.lookup(1 << 3).is_none());
        assert!(TABLE.lookup(0).is_none());
    }

    #[test]
    fn test_unknown_slot_past_entries() {
        assert_eq!(TABLE.unknown_slot(), 3);
    }

    #[test]
    fn test_validate_ok() {
        assert!(TABLE.validate().is_ok());
    }

    #[test]
    fn test_validate_duplicate() {
        static DUP: [FaultDescriptor; 2] = [
            FaultDescriptor::new(1 << 8, "a", FaultFlags::empty(), STAT, ADDR),
            FaultDescriptor::new(1 << 8, "b", FaultFlags::empty(), STAT, ADDR),
        ];
        let table = FaultTable::new(&DUP);
        assert_eq!(table.validate(), Err(crate::Error::DuplicateSignature));
    }
}
