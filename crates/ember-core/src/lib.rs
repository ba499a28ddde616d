//! # EMBER Core
//!
//! Foundational types for the EMBER memory-controller fault subsystem.
//!
//! This crate holds everything the rest of the stack agrees on: the error
//! type, strongly-typed identifiers, and the two chip-supplied data tables
//! (fault descriptors and hardware clients). It contains no hardware
//! access and no policy - those live in `ember-hal` and `ember-fault`.
//!
//! ## Design Principles
//!
//! 1. **Strong Typing**: register handles, client ids and interrupt lines
//!    are distinct newtypes, not bare integers
//! 2. **Data, Not Behavior**: descriptor and client tables are static data
//!    supplied per chip generation
//! 3. **Degrade, Never Fail**: lookups resolve to sentinels, not panics

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

#[cfg(test)]
extern crate alloc;

// =============================================================================
// MODULE EXPORTS
// =============================================================================

pub mod client;
pub mod descriptor;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use client::{ClientDescriptor, ClientSlot, ClientTable};
pub use descriptor::{FaultDescriptor, FaultFlags, FaultMatch, FaultTable};
pub use error::{Error, Result};
pub use types::*;
