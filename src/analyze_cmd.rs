//! Analyze command: smoothness report for a scheme or script.

use anyhow::Result;
use tracing::{info, info_span, warn};

use wavelift_basis::analyze;
use wavelift_lifting::{Program, Scheme};
use wavelift_script::{ParsedScript, parse_steps};

use crate::cli::AnalyzeArgs;
use crate::config::WaveliftConfig;
use crate::convert;
use crate::output;

/// Run the analysis.
pub fn run(args: AnalyzeArgs) -> Result<()> {
    let _cmd = info_span!("analyze").entered();
    let config = WaveliftConfig::load(args.common.config.as_deref())?;

    let scheme = convert::resolve_scheme(&args.scheme, &config.basis)?;
    let parsed = match (scheme, &args.scheme.script) {
        (Scheme::Custom, Some(path)) => parse_steps(&output::read_script(path)?),
        (Scheme::Custom, None) => parse_steps(convert::DEFAULT_SCRIPT),
        _ => ParsedScript::default(),
    };

    let program = match scheme {
        Scheme::Custom if parsed.steps.is_empty() => {
            let fallback = Scheme::default();
            warn!(%fallback, "custom script has no steps");
            Program::catalog(fallback)
        }
        Scheme::Custom => Program::custom(&parsed.steps),
        other => Program::catalog(other),
    };

    let mut report = analyze(program);
    if let Some(diagnostic) = parsed.diagnostic {
        report.diagnostics.insert(0, diagnostic);
    }
    for line in &report.diagnostics {
        info!("{line}");
    }

    output::write_json(&report, args.common.output.as_deref())
}
