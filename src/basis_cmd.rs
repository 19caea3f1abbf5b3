//! Basis command: sample a function and run one multiresolution operation.

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use wavelift_basis::render;
use wavelift_lifting::Scheme;

use crate::cli::BasisArgs;
use crate::config::WaveliftConfig;
use crate::convert;
use crate::output;

/// Run the basis pipeline.
pub fn run(args: BasisArgs) -> Result<()> {
    let _cmd = info_span!("basis").entered();
    let config = WaveliftConfig::load(args.common.config.as_deref())?;

    let scheme = convert::resolve_scheme(&args.scheme, &config.basis)?;
    let script = match (&args.scheme.script, scheme) {
        (Some(path), _) => Some(output::read_script(path)?),
        (None, Scheme::Custom) => Some(convert::DEFAULT_SCRIPT.to_string()),
        (None, _) => None,
    };
    if args.scheme.script.is_some() && scheme != Scheme::Custom {
        warn!(%scheme, "script ignored for a catalog scheme");
    }

    let request = convert::build_request(&args, &config.basis, script)?;
    let report = render(&request).context("failed to render basis")?;
    info!(
        scheme = %report.scheme,
        samples = report.values.len(),
        volume = report.volume,
        "basis rendered"
    );
    for line in &report.diagnostics {
        info!("{line}");
    }

    output::write_json(&report, args.common.output.as_deref())
}
