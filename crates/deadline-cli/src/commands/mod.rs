pub mod config;
pub mod dates;
pub mod status;
pub mod watch;

use deadline_core::Frame;

/// Print one frame: the label, or a JSON line for a panel host.
pub fn print_frame(frame: &Frame, json: bool) -> serde_json::Result<()> {
    if json {
        println!("{}", serde_json::to_string(frame)?);
    } else {
        println!("{}", frame.rendered.text);
    }
    Ok(())
}
