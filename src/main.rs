/*!
 * Timeslice VM - Main Entry Point
 *
 * Runs built-in programs as processes on one simulated CPU:
 * - Configuration from VM_* environment variables
 * - Scheduling policy, time slice, and cycle ceiling from that configuration
 * - Process table and per-process output on stdout
 */

use miette::{miette, IntoDiagnostic};
use tracing::info;

use timeslice_vm::asm::programs;
use timeslice_vm::{init_tracing, ProcessManager, VmConfig};

fn main() -> miette::Result<()> {
    // Initialize structured tracing
    init_tracing();

    let config = VmConfig::from_env()?;
    info!(
        policy = %config.policy,
        time_slice = config.time_slice,
        memory = config.memory_size,
        max_cycles = config.max_cycles,
        "Timeslice VM starting"
    );

    let mut names: Vec<String> = std::env::args().skip(1).collect();
    if names.is_empty() {
        names = programs::NAMES.iter().map(|n| n.to_string()).collect();
    }

    let mut manager = ProcessManager::builder().with_config(config).build();
    for name in &names {
        let program = programs::by_name(name).ok_or_else(|| {
            miette!(
                code = "vm::unknown_program",
                help = format!("Built-in programs: {}", programs::NAMES.join(", ")),
                "Unknown program: {}",
                name
            )
        })?;
        manager.create_process(program, name)?;
    }

    let summary = manager.run_to_completion();

    let report_json = std::env::var("VM_REPORT_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);
    if report_json {
        let json = serde_json::to_string_pretty(&manager.snapshot()).into_diagnostic()?;
        println!("{}", json);
        return Ok(());
    }

    println!("{}", manager.get_process_info());
    println!();
    for pcb in manager.processes() {
        let values: Vec<String> = manager
            .output_of(pcb.pid())
            .iter()
            .map(|v| v.to_string())
            .collect();
        println!("{:<8} {:<20} {}", pcb.pid(), pcb.name(), values.join(" "));
    }
    println!();
    println!("{} cycles, outcome: {:?}", summary.clock, summary.outcome);

    Ok(())
}
