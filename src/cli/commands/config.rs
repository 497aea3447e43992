use crate::cli::{Context, OutputFormat};

pub fn run(ctx: &Context) -> anyhow::Result<()> {
    let mut cfg = ctx.config.clone();
    cfg.session = cfg.session.redacted();

    match ctx.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(std::io::stdout(), &cfg)?;
            println!();
        }
        _ => {
            // Human-readable: just use TOML format
            let toml_str = toml::to_string_pretty(&cfg)?;
            println!("{}", toml_str);
        }
    }

    Ok(())
}
