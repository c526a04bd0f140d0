//! Location read
//!
//! Usage: visloc location

use std::io::Write;
use visloc_core::ops::CommandStore;
use visloc_engine::LocationRequester;

/// Printed when nothing has been published under the location key
pub const NO_LOCATION: &str = "no location";

/// Print the current location as one JSON line, or `no location`
pub fn execute<S: CommandStore>(
    requester: &mut LocationRequester<S>,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match requester.get_location()? {
        Some(location) => writeln!(out, "{}", serde_json::to_string(&location)?)?,
        None => writeln!(out, "{}", NO_LOCATION)?,
    }
    Ok(())
}
