//! # wavelift-basis
//!
//! Basis functions of lifting schemes, and the diagnostics built on them.
//!
//! - [`Basis`] synthesizes scaling functions, wavelets and their duals by
//!   running the inverse transform on an impulse, samples [`TestFunction`]s,
//!   and compresses, smooths or projects them.
//! - [`render`] is the front-end pipeline: a [`Request`] in, a
//!   [`BasisReport`] out.
//! - [`analyze`] measures the smoothness of a scheme's primal and dual
//!   scaling functions and suggests normalization and vanishing-moment fixes.
//! - [`construct_stable_wavelet`] appends an update step to a custom scheme
//!   and sweeps it for the smoothest dual.
//!
//! ```mermaid
//! graph LR
//!     A["script text"] -->|"parse_steps"| B["Vec&lt;LiftingStep&gt;"]
//!     B --> C["Program"]
//!     C -->|"render"| D["BasisReport"]
//!     C -->|"analyze"| E["AnalysisReport"]
//!     B -->|"construct_stable_wavelet"| F["StableWavelet"]
//! ```

mod analysis;
mod basis;
mod construct;
mod error;
mod request;
mod test_function;

pub use analysis::{
    AnalysisReport, PROBE_LEN, RieszInterval, analyze, compute_smoothness, mask_smoothness,
};
pub use basis::{Basis, BasisFunction, ErrorMetrics, MAX_LEVELS, volume};
pub use construct::{MAX_CANDIDATES, SearchConfig, StableWavelet, construct_stable_wavelet};
pub use error::BasisError;
pub use request::{BasisReport, DEFAULT_LEVELS, FunctionKind, Operation, Request, Space, render};
pub use test_function::{Shape, TestFunction};
