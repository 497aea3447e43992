use authdev::core::devices::fetch_devices;
use authdev::core::filter::DeviceSummary;
use authdev::core::transport::HttpTransport;

use crate::cli::{Context, OutputFormat};

pub fn run(ctx: &Context) -> anyhow::Result<()> {
    let transport = HttpTransport::from_config(&ctx.config)?;
    tracing::debug!(portal = %transport.base_url(), "using portal");
    let devices = ctx.block_on("fetching devices", fetch_devices(&transport))??;
    let summary = devices.as_deref().map(DeviceSummary::from_devices);

    match ctx.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(std::io::stdout(), &summary)?;
            println!();
        }
        _ => match summary {
            Some(ref s) => println!("{}", crate::cli::display::render_summary(s, ctx.color())),
            None => println!("{}", crate::cli::display::render_devices(None, ctx.color())),
        },
    }

    Ok(())
}
