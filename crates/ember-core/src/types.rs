//! # EMBER Core Types
//!
//! Fundamental type definitions used across the fault subsystem.
//!
//! These types provide:
//! - Strong typing for register handles and client identities
//! - Hardware-specific identifiers that cannot be mixed up
//! - A faulting-address type wide enough for the reconstructed
//!   physical address (base word plus extension bits)

use core::fmt;

// =============================================================================
// FAULT ADDRESS
// =============================================================================

/// Reconstructed physical address of a faulting transaction
///
/// The hardware reports a 32-bit address word; the high extension bits
/// come from the status register and land above bit 31 here.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct FaultAddr(u64);

impl FaultAddr {
    /// Create a new fault address
    #[inline]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Get the raw u64 value
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for FaultAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FaultAddr(0x{:010x})", self.0)
    }
}

impl fmt::Display for FaultAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:010x}", self.0)
    }
}

// =============================================================================
// REGISTER OFFSET
// =============================================================================

/// Opaque handle into chip register space
///
/// Owned by the register-access backend; this core never dereferences it,
/// only passes it back through the register-space boundary in `ember-hal`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct RegOffset(u32);

impl RegOffset {
    /// Create a new register offset
    #[inline]
    pub const fn new(offset: u32) -> Self {
        Self(offset)
    }

    /// Offset used by descriptors that carry no status registers
    #[inline]
    pub const fn none() -> Self {
        Self(0)
    }

    /// Get the raw u32 value
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for RegOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegOffset(0x{:03x})", self.0)
    }
}

// =============================================================================
// CLIENT ID
// =============================================================================

/// Numeric identity of a hardware transaction source
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ClientId(u32);

impl ClientId {
    /// Id carried by the unknown-client sentinel
    pub const INVALID: Self = Self(u32::MAX);

    /// Create a new client id
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index form for table access
    #[inline]
    pub const fn as_index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == u32::MAX {
            write!(f, "ClientId(invalid)")
        } else {
            write!(f, "ClientId({})", self.0)
        }
    }
}

// =============================================================================
// INTERRUPT LINE
// =============================================================================

/// Platform interrupt line carrying MC fault interrupts
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct IrqLine(u32);

impl IrqLine {
    /// Create a new interrupt line handle
    #[inline]
    pub const fn new(irq: u32) -> Self {
        Self(irq)
    }

    /// Get the raw u32 value
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for IrqLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IrqLine({})", self.0)
    }
}

impl fmt::Display for IrqLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// SOURCE CHANNEL
// =============================================================================

/// Memory controller channel a fault originated from
///
/// Single-channel generations always report channel 0.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct SourceChannel(u32);

impl SourceChannel {
    /// Create a new source channel
    #[inline]
    pub const fn new(chan: u32) -> Self {
        Self(chan)
    }

    /// Get the raw u32 value
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for SourceChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceChannel({})", self.0)
    }
}

impl fmt::Display for SourceChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// STATIC ASSERTIONS
// =============================================================================

static_assertions::assert_impl_all!(FaultAddr: Send, Sync, Copy);
static_assertions::assert_impl_all!(RegOffset: Send, Sync, Copy);
static_assertions::assert_impl_all!(ClientId: Send, Sync, Copy);
static_assertions::assert_impl_all!(IrqLine: Send, Sync, Copy);
