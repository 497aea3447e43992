use owo_colors::{OwoColorize, Style};

use authdev::core::device::{Attachment, WebauthnDevice};
use authdev::core::filter::DeviceSummary;

fn paint(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Get the terminal color for an attachment kind.
pub fn attachment_style(attachment: Option<&Attachment>) -> Style {
    match attachment {
        Some(Attachment::Platform) => Style::new().cyan(),
        Some(Attachment::CrossPlatform) => Style::new().green(),
        _ => Style::new().dimmed(),
    }
}

/// Render a single device as a one-line summary for list output.
pub fn render_device_line(device: &WebauthnDevice, color: bool) -> String {
    let id = device
        .id()
        .map(|id| format!("#{id}"))
        .unwrap_or_else(|| "#?".into());
    let attachment = device
        .attachment()
        .map(Attachment::label)
        .unwrap_or("unknown");
    let last_used = device
        .last_used_at()
        .map(|ts| ts.at().format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "never".into());

    let mut flags = Vec::new();
    if device.has_clone_warning() {
        flags.push("clone-warning");
    }
    if device.is_discoverable() {
        flags.push("discoverable");
    }
    let flag_str = if flags.is_empty() {
        String::new()
    } else {
        let joined = format!("[{}]", flags.join(","));
        let style = if device.has_clone_warning() {
            Style::new().red().bold()
        } else {
            Style::new().dimmed()
        };
        format!(" {}", paint(&joined, style, color))
    };

    format!(
        "{} {} ({}) last used {}{}",
        paint(&id, Style::new().dimmed(), color),
        paint(&device.display_name(), Style::new().bold(), color),
        paint(attachment, attachment_style(device.attachment()), color),
        last_used,
        flag_str,
    )
}

/// Render a device list. `None` is the portal's explicit "no data" answer.
pub fn render_devices(devices: Option<&[WebauthnDevice]>, color: bool) -> String {
    let Some(devices) = devices else {
        return "no device data returned".into();
    };
    let mut lines: Vec<String> = devices
        .iter()
        .map(|d| render_device_line(d, color))
        .collect();
    lines.push(match devices.len() {
        1 => "1 device".into(),
        n => format!("{n} devices"),
    });
    lines.join("\n")
}

/// Render the device summary table.
pub fn render_summary(summary: &DeviceSummary, color: bool) -> String {
    let rows = [
        ("platform", summary.platform),
        ("cross-platform", summary.cross_platform),
        ("other", summary.other_attachment),
        ("discoverable", summary.discoverable),
        ("never used", summary.never_used),
        ("clone warnings", summary.clone_warnings),
    ];
    let mut lines = vec![paint(
        &format!("{} devices", summary.total),
        Style::new().bold(),
        color,
    )];
    for (label, count) in rows {
        let line = format!("  {:<15} {}", format!("{label}:"), count);
        if label == "clone warnings" && count > 0 {
            lines.push(paint(&line, Style::new().red(), color));
        } else {
            lines.push(line);
        }
    }
    lines.join("\n")
}
