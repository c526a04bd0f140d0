//! Command queue operations
//!
//! Usage:
//!   visloc locate <THING>
//!   visloc clear
//!   visloc pending

use clap::Args;
use std::io::Write;
use visloc_core::ops::CommandStore;
use visloc_engine::LocationRequester;

#[derive(Debug, Args)]
pub struct LocateArgs {
    /// Name of the thing to locate, passed through unchecked
    pub thing: String,
}

/// Push a locate command and print the resulting queue length
pub fn execute_locate<S: CommandStore>(
    args: LocateArgs,
    requester: &mut LocationRequester<S>,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let queue_len = requester.locate(&args.thing)?;
    writeln!(out, "{}", queue_len)?;
    Ok(())
}

/// Delete the command queue and print how many keys were removed
pub fn execute_clear<S: CommandStore>(
    requester: &mut LocationRequester<S>,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let removed = requester.clear_commands()?;
    writeln!(out, "{}", removed)?;
    Ok(())
}

/// Print the number of queued commands
pub fn execute_pending<S: CommandStore>(
    requester: &mut LocationRequester<S>,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let queue_len = requester.pending_commands()?;
    writeln!(out, "{}", queue_len)?;
    Ok(())
}
