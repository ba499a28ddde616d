//! # EMBER Hardware Interface Layer
//!
//! The seams between the chip-agnostic fault engine and a concrete
//! memory-controller generation:
//!
//! - [`mmio::McRegisters`] - the register-space transport boundary
//! - [`chip::ChipOps`] - the per-generation capability set, installed
//!   once for the process lifetime
//! - [`regs`] - the fixed fault-status field layout shared by all
//!   generations
//!
//! No hardware is touched here; generation crates implement the traits
//! and the platform supplies the transport.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

// =============================================================================
// MODULE EXPORTS
// =============================================================================

pub mod chip;
pub mod mmio;
pub mod regs;

// Re-exports for convenience
pub use chip::{
    ChipOps, DiagnosticsView, FaultReport, IntrDescriptions, INTR_SLOTS, MAX_DESCRIPTION_LEN,
};
pub use mmio::{McRegisters, READ_FAILED};
