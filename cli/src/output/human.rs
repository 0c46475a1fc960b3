//! Human-readable rendering of status, volume and menu.

use owo_colors::OwoColorize as _;

use crate::application::services::status::StatusReport;
use crate::application::services::volume::VolumeReport;
use crate::domain::container::ContainerState;
use crate::output::OutputContext;

/// One-line description of a container state.
#[must_use]
pub fn container_state_display(state: ContainerState) -> &'static str {
    match state {
        ContainerState::Running => "running",
        ContainerState::Stopped => "stopped (start to resume)",
        ContainerState::Paused => "paused (start to unpause)",
        ContainerState::Absent => "not created",
    }
}

fn present(flag: bool) -> &'static str {
    if flag { "present" } else { "missing" }
}

/// Render the full status report.
pub fn render_status(ctx: &OutputContext, report: &StatusReport) {
    if !report.runtime_available {
        ctx.error(&format!(
            "{} is not available. Start the container runtime and retry.",
            report.runtime
        ));
        return;
    }
    ctx.field("Image:    ", &format!("{} ({})", report.image, present(report.image_present)));
    ctx.field(
        "Container:",
        &format!("{} ({})", report.container, container_state_display(report.container_state)),
    );
    ctx.field("Volume:   ", &format!("{} ({})", report.volume, report.volume_size));
    ctx.field(
        "GPU:      ",
        if report.gpu_available { "available" } else { "not detected (CPU mode)" },
    );
}

/// Render the model volume report.
pub fn render_volume(ctx: &OutputContext, report: &VolumeReport) {
    ctx.title("Model volume");
    ctx.field("Name:     ", &report.name);
    ctx.field("Size:     ", &report.size.to_string());
    ctx.field(
        "Container:",
        &format!("{} ({})", report.container, container_state_display(report.container_state)),
    );
    if report.in_use() {
        ctx.info("The volume is attached to the container. Delete the container to free it.");
    }
}

/// One numbered menu entry, `n` counting from 1.
#[must_use]
pub fn menu_entry(ctx: &OutputContext, n: usize, label: &str) -> String {
    format!("  {}  {label}", format!("{n:>2})").style(ctx.styles.key))
}

/// Render the numbered menu followed by a blank line.
pub fn render_menu(ctx: &OutputContext, labels: &[&str]) {
    if ctx.quiet {
        return;
    }
    for (i, label) in labels.iter().enumerate() {
        println!("{}", menu_entry(ctx, i + 1, label));
    }
    println!();
}
