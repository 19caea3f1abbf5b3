//! Pure conversion functions: CLI arguments and TOML config -> crate API types.

use anyhow::{Context, Result};

use wavelift_basis::{
    BasisFunction, FunctionKind, Operation, Request, SearchConfig, Space, TestFunction,
};
use wavelift_lifting::{Boundary, Scheme};

use crate::cli::{BasisArgs, ConstructArgs, FunctionArg, SchemeArgs, SpaceArg};
use crate::config::{BasisToml, ConstructToml};

/// Script used when the custom scheme is selected without a script file.
pub const DEFAULT_SCRIPT: &str = "// four-point scheme

predict;
-1/16; 9/16; 9/16; -1/16;

update;
0.25; 0.25;
";

/// Parses a scheme name.
pub fn parse_scheme(s: &str) -> Result<Scheme> {
    Ok(Scheme::from_name(s)?)
}

/// Parses a boundary mode name.
pub fn parse_boundary(s: &str) -> Result<Boundary> {
    Ok(Boundary::from_name(s)?)
}

/// Picks the scheme: an explicit `--scheme`, else custom when a script file
/// is given, else the config file's scheme.
pub fn resolve_scheme(args: &SchemeArgs, basis: &BasisToml) -> Result<Scheme> {
    match (&args.scheme, &args.script) {
        (Some(name), _) => parse_scheme(name),
        (None, Some(_)) => Ok(Scheme::Custom),
        (None, None) => parse_scheme(&basis.scheme).context("invalid [basis].scheme"),
    }
}

/// Maps the `--function` choice to the sampled function.
pub fn function_kind(function: FunctionArg, test_function: usize) -> Result<FunctionKind> {
    Ok(match function {
        FunctionArg::Scaling => FunctionKind::Basis(BasisFunction::Scaling),
        FunctionArg::Wavelet => FunctionKind::Basis(BasisFunction::Wavelet),
        FunctionArg::DualScaling => FunctionKind::Basis(BasisFunction::DualScaling),
        FunctionArg::DualWavelet => FunctionKind::Basis(BasisFunction::DualWavelet),
        FunctionArg::Test => FunctionKind::Test(TestFunction::from_index(test_function)?),
    })
}

/// Builds a [`Request`] for the `basis` subcommand.
///
/// `script` is the step script text, read by the caller.
pub fn build_request(
    args: &BasisArgs,
    basis: &BasisToml,
    script: Option<String>,
) -> Result<Request> {
    let scheme = resolve_scheme(&args.scheme, basis)?;
    let boundary = match &args.boundary {
        Some(name) => parse_boundary(name)?,
        None => parse_boundary(&basis.boundary).context("invalid [basis].boundary")?,
    };
    let levels = args.levels.unwrap_or(basis.levels);

    let operation = match (args.compress, args.smooth) {
        (Some(threshold), _) => Operation::Compress { threshold },
        (None, Some(threshold)) => Operation::Smooth {
            threshold,
            level: args.smooth_level.unwrap_or(basis.smooth_level),
        },
        (None, None) => Operation::None,
    };

    let mut request = Request::new(scheme)
        .with_levels(levels)
        .with_boundary(boundary)
        .with_function(function_kind(args.function, args.test_function)?)
        .with_operation(operation);
    if let Some(script) = script {
        request = request.with_script(script);
    }
    if let (Some(space), Some(level)) = (args.space, args.level) {
        let space = match space {
            SpaceArg::Scaling => Space::Scaling,
            SpaceArg::Wavelet => Space::Wavelet,
        };
        request = request.with_view(space, level);
    }
    request.validate()?;
    Ok(request)
}

/// Builds a [`SearchConfig`] from `[construct]`, with CLI overrides.
pub fn build_search_config(
    construct: &ConstructToml,
    args: &ConstructArgs,
) -> Result<SearchConfig> {
    let cfg = SearchConfig::new()
        .with_range(
            args.min_alpha.unwrap_or(construct.min_alpha),
            args.max_alpha.unwrap_or(construct.max_alpha),
        )
        .with_step(args.step.unwrap_or(construct.step))
        .with_parallel(construct.parallel && !args.sequential);
    cfg.validate()?;
    Ok(cfg)
}
