use crate::config::{parse_state_arg, IconConfig, StateSpec};
use crate::error::GenerateError;
use crate::manifest::{write_manifest, IconManifest};
use crate::raster::{generate_asset, IconAsset};
use crate::sink::{AssetSink, DirectorySink};
use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use std::{fs::create_dir_all, path::PathBuf};
use tracing::info;

#[derive(Debug, Clone, Parser)]
#[clap(
    name = "badge-gen",
    about = "Generate rounded-badge icons for every state and size"
)]
pub struct Args {
    /// Output directory. Icons are written to <DIR>/<state>/icon<size>.png.
    #[clap(short, long, value_name = "DIR", default_value = "./icons")]
    pub output: PathBuf,

    /// TOML file with `sizes` and `[[states]]` entries.
    #[clap(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Icon sizes to generate. Overrides the config file.
    #[clap(short, long, value_delimiter = ',', value_name = "SIZES")]
    pub sizes: Option<Vec<u32>>,

    /// A state and its badge color, e.g. `enabled=#4caf50` or `disabled=158,158,158`.
    /// Repeat for several states. Overrides the config file.
    #[clap(long = "state", value_name = "NAME=COLOR", value_parser = parse_state_arg)]
    pub states: Vec<StateSpec>,

    /// Remove the state directories before generating
    #[clap(long)]
    pub clean: bool,

    /// Don't write manifest.json
    #[clap(long)]
    pub no_manifest: bool,

    /// Render icons one at a time instead of in parallel
    #[clap(long)]
    pub sequential: bool,

    /// Log geometry details
    #[clap(short, long)]
    pub verbose: bool,
}

/// Merge the config file (or the defaults) with command line overrides.
pub fn resolve_config(args: &Args) -> Result<IconConfig> {
    let mut config = match &args.config {
        Some(path) => IconConfig::load(path)?,
        None => IconConfig::default(),
    };

    if let Some(sizes) = &args.sizes {
        config.sizes = sizes.clone();
    }
    if !args.states.is_empty() {
        config.states = args.states.clone();
    }

    config.validate()
}

pub fn generate_icons(args: Args) -> Result<()> {
    let config = resolve_config(&args)?;

    // Ensure the output directory exists
    create_dir_all(&args.output).context("Can't create output directory")?;

    let mut sink = DirectorySink::new(&args.output);
    if args.clean {
        sink.clean(config.states.iter().map(|state| state.name.as_str()))
            .context("Can't clean output directory")?;
    }

    for state in &config.states {
        info!("Generating {} icons ({})...", state.name, state.color);
    }
    let assets = render_assets(&config, !args.sequential)?;
    let manifest = write_assets(&mut sink, &assets)?;

    if !args.no_manifest {
        write_manifest(sink.root(), &manifest)?;
        info!("✓ Generated manifest.json");
    }

    info!("Done! {} icons in {}", assets.len(), sink.root().display());
    Ok(())
}

/// Render every `(state, size)` pair of the plan, in plan order.
pub fn render_assets(config: &IconConfig, parallel: bool) -> Result<Vec<IconAsset>, GenerateError> {
    let plan = config.plan();
    let render =
        |&(state, size): &(&StateSpec, u32)| generate_asset(&state.name, size, state.color);

    if parallel {
        plan.par_iter().map(render).collect()
    } else {
        plan.iter().map(render).collect()
    }
}

/// Hand every asset to the sink and describe what was written.
pub fn write_assets<S: AssetSink>(
    sink: &mut S,
    assets: &[IconAsset],
) -> Result<IconManifest, GenerateError> {
    let mut manifest = IconManifest::new(env!("CARGO_PKG_NAME").to_string());

    for asset in assets {
        sink.write(asset)?;
        manifest.add_icon(&asset.state, asset.size);
    }

    Ok(manifest)
}
