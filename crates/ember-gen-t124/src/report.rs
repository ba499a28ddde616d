//! # T124 Report Rendering
//!
//! Wording and layout of fault reports and the diagnostics table for
//! the T124 generation. The engine decides *whether* to render; these
//! functions decide *how*.

use core::fmt;

use ember_hal::{DiagnosticsView, FaultReport, READ_FAILED};

// =============================================================================
// FAULT REPORTS
// =============================================================================

/// Emit one decoded fault to the log
pub fn render(r: &FaultReport<'_>) {
    log::error!("({}) {}: {}", r.client.swgroup, r.client.name, r.desc.msg);

    let status = match r.status {
        // Message-only fault, nothing further to print.
        None => return,
        Some(s) if s == READ_FAILED => {
            log::error!("  status read failed");
            return;
        }
        Some(s) => s,
    };

    match (r.second_status, r.addr) {
        (Some(second), _) => {
            log::error!("  status = {:#010x}; status2 = {:#010x}", status, second);
        }
        (None, Some(addr)) => {
            log::error!("  status = {:#010x}; addr = {}", status, addr);
        }
        (None, None) => {
            log::error!("  status = {:#010x}", status);
        }
    }

    let secure = if r.secure { "yes" } else { "no" };
    let access = if r.write { "write" } else { "read" };
    match r.smmu_context {
        Some(ctx) => {
            log::error!(
                "  secure: {}, access-type: {}, smmu context: {}",
                secure,
                access,
                ctx
            );
        }
        None => log::error!("  secure: {}, access-type: {}", secure, access),
    }
}

// =============================================================================
// DIAGNOSTICS
// =============================================================================

/// Render the cumulative diagnostics table into a sink
pub fn render_diagnostics(view: &DiagnosticsView<'_>, sink: &mut dyn fmt::Write) -> fmt::Result {
    writeln!(sink, "{:<16} {:<12} {:>8}", "client", "swgroup", "faults")?;
    writeln!(sink, "--------------------------------------")?;
    for (client, count) in view.clients_with_counts() {
        if count == 0 {
            continue;
        }
        writeln!(sink, "{:<16} {:<12} {:>8}", client.name, client.swgroup, count)?;
    }
    if view.unknown_client_count() != 0 {
        writeln!(
            sink,
            "{:<16} {:<12} {:>8}",
            "unknown",
            "-",
            view.unknown_client_count()
        )?;
    }

    writeln!(sink)?;
    writeln!(sink, "fault signature throttle:")?;
    for (desc, count) in view.faults_with_counts() {
        if count == 0 {
            continue;
        }
        writeln!(sink, "  {}: {}", desc.msg, count)?;
    }
    if view.unknown_fault_count() != 0 {
        writeln!(sink, "  unknown fault: {}", view.unknown_fault_count())?;
    }

    writeln!(sink)?;
    writeln!(sink, "arb interval average: {} ns", view.arb_average_ns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables;
    use alloc::string::String;

    #[test]
    fn test_diagnostics_layout() {
        let mut client_counts = [0u64; 60];
        client_counts[40] = 3; // gpusrd
        client_counts[59] = 1; // unknown slot
        let throttle_counts = [7u32; 13];

        let view = DiagnosticsView {
            clients: &tables::CLIENTS,
            client_counts: &client_counts,
            faults: &tables::FAULTS,
            throttle_counts: &throttle_counts,
            arb_average_ns: 125_000,
        };

        let mut out = String::new();
        render_diagnostics(&view, &mut out).unwrap();

        assert!(out.contains("gpusrd"));
        assert!(out.contains("unknown"));
        assert!(out.contains("EMEM address decode error: 7"));
        assert!(out.contains("unknown fault: 7"));
        assert!(out.contains("arb interval average: 125000 ns"));
        // Clients that never faulted stay out of the table.
        assert!(!out.contains("ptcr"));
    }
}
