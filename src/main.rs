use anyhow::Result;
use badge_gen::icon_gen::{self, Args};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins; without it the crate logs at info, or debug with -v
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) if args.verbose => filter.add_directive("badge_gen=debug".parse()?),
        Ok(filter) => filter,
        Err(_) => {
            let level = if args.verbose { "debug" } else { "info" };
            EnvFilter::new(format!("badge_gen={level}"))
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    icon_gen::generate_icons(args)
}
