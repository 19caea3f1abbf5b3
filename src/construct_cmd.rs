//! Construct command: tune a stabilising update for a custom script.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, info_span};

use wavelift_basis::{StableWavelet, construct_stable_wavelet};
use wavelift_script::{compile, render_steps};

use crate::cli::ConstructArgs;
use crate::config::WaveliftConfig;
use crate::convert;
use crate::output;

/// JSON output of `construct`.
#[derive(Serialize)]
struct Constructed {
    #[serde(flatten)]
    wavelet: StableWavelet,
    /// The input steps followed by the tuned update, as script text.
    script: String,
}

/// Run the constructor.
pub fn run(args: ConstructArgs) -> Result<()> {
    let _cmd = info_span!("construct").entered();
    let config = WaveliftConfig::load(args.common.config.as_deref())?;
    let search = convert::build_search_config(&config.construct, &args)?;

    let text = output::read_script(&args.script)?;
    let mut steps = compile(&text)
        .with_context(|| format!("failed to parse script: {}", args.script.display()))?;
    if steps.is_empty() {
        bail!("script has no steps: {}", args.script.display());
    }

    info!(candidates = search.candidates(), "searching update coefficients");
    let wavelet = construct_stable_wavelet(&mut steps, &search)?;
    info!(
        alpha = wavelet.alpha,
        beta = wavelet.beta,
        dual = wavelet.dual_smoothness,
        "Riesz basis for {}",
        wavelet.riesz_interval
    );

    let constructed = Constructed {
        wavelet,
        script: render_steps(&steps),
    };
    output::write_json(&constructed, args.common.output.as_deref())
}
