use crate::{
    interaction::{ActionEvent, SwerveInteraction},
    swerve::{Sample, SwerveSettings},
};

/// Runs `samples` through a fresh interaction and collects every emitted event.
///
/// With `flush_tail`, a timeout still pending after the last sample is fired
/// at its deadline so traces that stop mid-gesture still report the cancel.
pub fn replay(samples: &[Sample], settings: SwerveSettings, flush_tail: bool) -> Vec<ActionEvent> {
    let mut interaction = SwerveInteraction::new(settings);
    let mut events: Vec<ActionEvent> = samples
        .iter()
        .filter_map(|sample| interaction.update(*sample))
        .collect();

    if flush_tail {
        if let Some(deadline) = interaction.pending_deadline() {
            events.extend(interaction.poll_timeout(deadline));
        }
    }

    events
}

pub fn event_csv_header() -> &'static str {
    "event,t,kind,count"
}

pub fn event_csv_line(event: &ActionEvent) -> String {
    format!(
        "event,{:.3},{},{}",
        event.time,
        event.signal.as_str(),
        event.swerve_count
    )
}
