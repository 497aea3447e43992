use authdev::core::device::Attachment;
use authdev::core::devices::fetch_devices;
use authdev::core::filter::DeviceFilter;
use authdev::core::transport::HttpTransport;

use crate::cli::Context;

#[derive(clap::Args)]
pub struct DevicesArgs {
    /// Show only platform authenticators (built-in)
    #[arg(long, conflicts_with = "cross_platform")]
    pub platform: bool,

    /// Show only cross-platform authenticators (roaming keys)
    #[arg(long)]
    pub cross_platform: bool,

    /// Show only devices flagged with a clone warning
    #[arg(long)]
    pub clone_warning: bool,

    /// Show only discoverable credentials (passkeys)
    #[arg(long)]
    pub discoverable: bool,

    /// Show only devices that were never used
    #[arg(long)]
    pub unused: bool,

    /// Filter by description substring
    #[arg(long)]
    pub name: Option<String>,
}

impl DevicesArgs {
    pub fn to_filter(&self) -> DeviceFilter {
        let attachment = if self.platform {
            Some(Attachment::Platform)
        } else if self.cross_platform {
            Some(Attachment::CrossPlatform)
        } else {
            None
        };
        DeviceFilter {
            attachment,
            clone_warning: self.clone_warning.then_some(true),
            discoverable: self.discoverable.then_some(true),
            unused: self.unused.then_some(true),
            name_contains: self.name.clone(),
        }
    }
}

pub fn run(args: &DevicesArgs, ctx: &Context) -> anyhow::Result<()> {
    let transport = HttpTransport::from_config(&ctx.config)?;
    tracing::debug!(portal = %transport.base_url(), "using portal");
    let devices = ctx.block_on("fetching devices", fetch_devices(&transport))??;
    tracing::info!(
        absent = devices.is_none(),
        count = devices.as_ref().map_or(0, Vec::len),
        "fetched devices"
    );

    let filter = args.to_filter();
    let devices = devices.map(|d| filter.apply(d));

    let mut stdout = std::io::stdout().lock();
    crate::cli::output::output_devices(devices.as_deref(), ctx.format, ctx.color(), &mut stdout)
}
