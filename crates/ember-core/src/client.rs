//! # Hardware Clients
//!
//! Chip-supplied mapping from a transaction source id to a human-readable
//! client identity. Ids outside the table resolve to the unknown-client
//! sentinel, never to an out-of-bounds access.

use core::fmt;

use crate::error::{Error, Result};
use crate::types::ClientId;

// =============================================================================
// CLIENT DESCRIPTOR
// =============================================================================

/// One hardware transaction source
#[derive(Debug, Clone, Copy)]
pub struct ClientDescriptor {
    /// Client name as reported in faults
    pub name: &'static str,
    /// Software group the client belongs to
    pub swgroup: &'static str,
    /// Numeric identity indexed from the fault status word
    pub id: ClientId,
}

impl ClientDescriptor {
    /// Create a new client descriptor
    pub const fn new(name: &'static str, swgroup: &'static str, id: u32) -> Self {
        Self {
            name,
            swgroup,
            id: ClientId::new(id),
        }
    }
}

impl fmt::Display for ClientDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.swgroup)
    }
}

/// Sentinel substituted for source ids outside the table
static UNKNOWN_CLIENT: ClientDescriptor = ClientDescriptor {
    name: "unknown",
    swgroup: "unknown",
    id: ClientId::INVALID,
};

// =============================================================================
// CLIENT TABLE
// =============================================================================

/// A resolved client and its statistics slot
///
/// `slot` indexes the per-client fault counters; the slot one past the
/// table end aggregates faults from unresolvable source ids.
#[derive(Debug, Clone, Copy)]
pub struct ClientSlot<'a> {
    /// Statistics slot for this client
    pub slot: usize,
    /// The resolved descriptor (the sentinel for out-of-range ids)
    pub desc: &'a ClientDescriptor,
}

/// Static per-generation client table
///
/// Invariant: entry `i` has client id `i`, so the raw source-id field of
/// a fault status word indexes the table directly.
#[derive(Debug, Clone, Copy)]
pub struct ClientTable {
    clients: &'static [ClientDescriptor],
}

impl ClientTable {
    /// Wrap a chip-supplied client slice
    pub const fn new(clients: &'static [ClientDescriptor]) -> Self {
        Self { clients }
    }

    /// Number of clients in the table
    pub const fn len(&self) -> usize {
        self.clients.len()
    }

    /// Whether the table is empty
    pub const fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Statistics slot for faults whose source id is out of range
    pub const fn unknown_slot(&self) -> usize {
        self.clients.len()
    }

    /// The unknown-client sentinel
    pub fn unknown() -> &'static ClientDescriptor {
        &UNKNOWN_CLIENT
    }

    /// All clients in id order
    pub fn entries(&self) -> &'static [ClientDescriptor] {
        self.clients
    }

    /// Look up a client by source id, falling back to the sentinel
    pub fn get(&self, id: ClientId) -> &'static ClientDescriptor {
        self.clients.get(id.as_index()).unwrap_or(&UNKNOWN_CLIENT)
    }

    /// Resolve a source id to a client and its statistics slot
    pub fn resolve(&self, id: ClientId) -> ClientSlot<'static> {
        match self.clients.get(id.as_index()) {
            Some(desc) => ClientSlot {
                slot: id.as_index(),
                desc,
            },
            None => ClientSlot {
                slot: self.unknown_slot(),
                desc: &UNKNOWN_CLIENT,
            },
        }
    }

    /// Check the table invariant: entry `i` carries id `i`
    pub fn validate(&self) -> Result<()> {
        for (i, c) in self.clients.iter().enumerate() {
            if c.id.as_index() != i {
                return Err(Error::SparseClientTable);
            }
        }
        Ok(())
    }
}
