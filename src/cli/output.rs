use std::io::Write;

use authdev::core::device::WebauthnDevice;
use crate::cli::OutputFormat;

/// Write devices in the requested output format.
///
/// JSON keeps `null` (absent) and `[]` (no devices) apart.
pub fn output_devices(
    devices: Option<&[WebauthnDevice]>,
    format: OutputFormat,
    color: bool,
    writer: &mut dyn Write,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, &devices)?;
            writeln!(writer)?;
        }
        OutputFormat::Ids => {
            for device in devices.unwrap_or_default() {
                match (device.kid(), device.id()) {
                    (Some(kid), _) => writeln!(writer, "{kid}")?,
                    (None, Some(id)) => writeln!(writer, "{id}")?,
                    (None, None) => {}
                }
            }
        }
        OutputFormat::Human => {
            writeln!(writer, "{}", super::display::render_devices(devices, color))?;
        }
    }
    Ok(())
}
