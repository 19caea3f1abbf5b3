//! # wavelift-lifting
//!
//! The lifting scheme: in-place, exactly invertible wavelet transforms built
//! from predict, update and scale steps on a strided buffer.
//!
//! ## Building Blocks
//!
//! ```mermaid
//! graph LR
//!     A["Scheme / Vec&lt;LiftingStep&gt;"] -->|"Program::new"| B["Program"]
//!     B -->|".forward(..)"| C["predict / update / scale_*"]
//!     B -->|".inverse(..)"| D["ipredict / iupdate / iscale_*"]
//!     B -->|".biorthogonal_inverse(..)"| E["dual basis synthesis"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use wavelift_lifting::{Boundary, Layout, Program, Scheme};
//!
//! let layout = Layout::new(64).with_boundary(Boundary::Cyclic);
//! let program = Program::catalog(Scheme::Cdf97);
//! let mut x: Vec<f64> = (0..64).map(|i| (i as f64 / 8.0).sin()).collect();
//! let original = x.clone();
//!
//! program.forward_levels(&mut x, layout, 4);
//! program.inverse_levels(&mut x, layout, 4);
//! assert!(x.iter().zip(&original).all(|(a, b)| (a - b).abs() < 1e-12));
//! ```

mod error;
mod layout;
mod primitives;
mod program;
mod scheme;
mod step;
mod threshold;

pub use error::LiftingError;
pub use layout::{Boundary, Layout, is_multiple_of_power_of_two};
pub use primitives::{
    ipredict, iscale_even, iscale_odd, iupdate, predict, scale_even, scale_odd, stencil_offset,
    update,
};
pub use program::Program;
pub use scheme::Scheme;
pub use step::{LiftingStep, Stage, StepKind};
pub use threshold::{compress_coefficients, shrink_coefficients};
