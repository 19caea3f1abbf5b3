//! The catalog of named lifting schemes.
//!
//! Each catalog scheme is a `'static` table of [`Stage`]s applied in order
//! by the forward transform. The inverse runs the same table backwards with
//! every stage undone; see [`crate::Program`].

use crate::error::LiftingError;
use crate::step::Stage;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

const FOUR_POINT_PREDICT: [f64; 4] = [-1.0 / 16.0, 9.0 / 16.0, 9.0 / 16.0, -1.0 / 16.0];
const CHAIKIN_PREDICT: [f64; 2] = [0.25, 0.75];
const CHAIKIN_UPDATE: [f64; 2] = [0.0, -1.0 / 3.0];

const STABLE_LINEAR: &[Stage<'static>] = &[
    Stage::Predict(&[0.5, 0.5]),
    Stage::Update(&[-0.0562, 0.3062, 0.3062, -0.0562]),
];

const STABLE_QUADRATIC: &[Stage<'static>] = &[
    Stage::Update(&CHAIKIN_UPDATE),
    Stage::ScaleEven {
        factor: 1.5,
        avoid_border: true,
    },
    Stage::Predict(&CHAIKIN_PREDICT),
    Stage::Update(&[-0.0975, 0.430_833_333_333, 0.430_833_333_333, -0.0975]),
];

const STABLE_CUBIC: &[Stage<'static>] = &[
    Stage::ScaleEven {
        factor: 2.0,
        avoid_border: true,
    },
    Stage::Update(&[-0.5, -0.5]),
    Stage::Predict(&[0.5, 0.5]),
    Stage::Update(&[-0.1217, 0.4967, 0.4967, -0.1217]),
];

const STABLE_FOUR_POINT: &[Stage<'static>] = &[
    Stage::Predict(&FOUR_POINT_PREDICT),
    Stage::Update(&[-0.0415, 0.2915, 0.2915, -0.0415]),
];

const CDF_5_3: &[Stage<'static>] = &[Stage::Predict(&[0.5, 0.5]), Stage::Update(&[0.25, 0.25])];

const CDF_9_7: &[Stage<'static>] = &[
    Stage::Predict(&[1.586_134_342_069_364_8, 1.586_134_342_069_364_8]),
    Stage::Update(&[-0.052_980_118_571_885_6, -0.052_980_118_571_885_6]),
    Stage::Predict(&[-0.882_911_075_541_187_5, -0.882_911_075_541_187_5]),
    Stage::Update(&[0.443_506_852_051_114_2, 0.443_506_852_051_114_2]),
    Stage::ScaleOdd {
        factor: 1.0 / 1.625_786_132_231_922_9,
        avoid_border: false,
    },
    Stage::ScaleEven {
        factor: 1.0 / 1.230_174_104_914_126,
        avoid_border: false,
    },
];

const CHAIKIN: &[Stage<'static>] = &[
    Stage::Update(&CHAIKIN_UPDATE),
    Stage::ScaleEven {
        factor: 1.5,
        avoid_border: true,
    },
    Stage::Predict(&CHAIKIN_PREDICT),
    Stage::Update(&[1.0 / 3.0, 1.0 / 3.0]),
];

const CUBIC_BSPLINES: &[Stage<'static>] = &[
    Stage::Update(&[-0.25, -0.25]),
    Stage::ScaleEven {
        factor: 2.0,
        avoid_border: true,
    },
    Stage::Predict(&[0.5, 0.5]),
];

const CUBIC_BSPLINE_WAVELETS: &[Stage<'static>] = &[
    Stage::ScaleEven {
        factor: 2.0,
        avoid_border: true,
    },
    Stage::Update(&[-0.5, -0.5]),
    Stage::Predict(&[0.5, 0.5]),
    Stage::Update(&[0.375, 0.375]),
];

const DAUBECHIES_D4: &[Stage<'static>] = &[
    Stage::Update(&[0.0, SQRT_3]),
    Stage::Predict(&[(SQRT_3 - 2.0) / 4.0, SQRT_3 / 4.0, 0.0, 0.0]),
    Stage::Update(&[0.0, 0.0, 0.0, -1.0]),
    Stage::ScaleEven {
        factor: (SQRT_3 - 1.0) / 2.0,
        avoid_border: false,
    },
    Stage::ScaleOdd {
        factor: (SQRT_3 + 1.0) / 2.0,
        avoid_border: false,
    },
];

const FOUR_POINT: &[Stage<'static>] = &[
    Stage::Predict(&FOUR_POINT_PREDICT),
    Stage::Update(&[0.25, 0.25]),
];

const HAAR: &[Stage<'static>] = &[Stage::Predict(&[1.0]), Stage::Update(&[0.5, 0.0])];

/// Selector for a wavelet family.
///
/// The declaration order is the selector index exposed to front ends.
///
/// | Scheme | Width | Forward stages |
/// |--------|-------|----------------|
/// | [`Scheme::StableLinear`] | 4 | linear predict, stabilising 4-tap update |
/// | [`Scheme::StableQuadratic`] | 5 | Chaikin predict, stabilising 4-tap update |
/// | [`Scheme::StableCubic`] | 4 | cubic B-spline predict, stabilising 4-tap update |
/// | [`Scheme::StableFourPoint`] | 5 | 4-point predict, stabilising 4-tap update |
/// | [`Scheme::Cdf53`] | 4 | linear predict, 2-tap update |
/// | [`Scheme::Cdf97`] | 4 | two predict/update pairs, scaling |
/// | [`Scheme::Chaikin`] | 4 | corner-cutting subdivision |
/// | [`Scheme::CubicBsplines`] | 4 | cubic B-spline subdivision |
/// | [`Scheme::CubicBsplineWavelets`] | 4 | cubic B-splines with an extra update |
/// | [`Scheme::DaubechiesD4`] | 4 | orthogonal D4 factorisation |
/// | [`Scheme::FourPoint`] | 4 | 4-point interpolating predict |
/// | [`Scheme::Haar`] | 4 | piecewise constant |
/// | [`Scheme::Custom`] | 5 | steps supplied by a script |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Linear interpolation with a stabilising update.
    #[default]
    StableLinear,
    /// Quadratic (Chaikin) prediction with a stabilising update.
    StableQuadratic,
    /// Cubic B-spline prediction with a stabilising update.
    StableCubic,
    /// 4-point interpolation with a stabilising update.
    StableFourPoint,
    /// Cohen-Daubechies-Feauveau 5/3.
    Cdf53,
    /// Cohen-Daubechies-Feauveau 9/7.
    Cdf97,
    /// Chaikin corner cutting.
    Chaikin,
    /// Cubic B-splines.
    CubicBsplines,
    /// Cubic B-splines with an additional wavelet update.
    CubicBsplineWavelets,
    /// Daubechies D4.
    DaubechiesD4,
    /// 4-point interpolating scheme.
    FourPoint,
    /// Haar.
    Haar,
    /// Steps supplied at run time.
    Custom,
}

impl Scheme {
    /// Every scheme, in selector order.
    pub const ALL: [Scheme; 13] = [
        Scheme::StableLinear,
        Scheme::StableQuadratic,
        Scheme::StableCubic,
        Scheme::StableFourPoint,
        Scheme::Cdf53,
        Scheme::Cdf97,
        Scheme::Chaikin,
        Scheme::CubicBsplines,
        Scheme::CubicBsplineWavelets,
        Scheme::DaubechiesD4,
        Scheme::FourPoint,
        Scheme::Haar,
        Scheme::Custom,
    ];

    /// Catalog stages in forward order, or `None` for [`Scheme::Custom`].
    pub fn stages(&self) -> Option<&'static [Stage<'static>]> {
        match self {
            Self::StableLinear => Some(STABLE_LINEAR),
            Self::StableQuadratic => Some(STABLE_QUADRATIC),
            Self::StableCubic => Some(STABLE_CUBIC),
            Self::StableFourPoint => Some(STABLE_FOUR_POINT),
            Self::Cdf53 => Some(CDF_5_3),
            Self::Cdf97 => Some(CDF_9_7),
            Self::Chaikin => Some(CHAIKIN),
            Self::CubicBsplines => Some(CUBIC_BSPLINES),
            Self::CubicBsplineWavelets => Some(CUBIC_BSPLINE_WAVELETS),
            Self::DaubechiesD4 => Some(DAUBECHIES_D4),
            Self::FourPoint => Some(FOUR_POINT),
            Self::Haar => Some(HAAR),
            Self::Custom => None,
        }
    }

    /// Number of coarsest levels a basis construction leaves untouched.
    ///
    /// A basis over `L` levels applies the scheme at levels `L - width`
    /// down to 0.
    pub fn width(&self) -> u32 {
        match self {
            Self::StableQuadratic | Self::StableFourPoint | Self::Custom => 5,
            _ => 4,
        }
    }

    /// Canonical name, accepted by [`Scheme::from_name`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::StableLinear => "stable-linear",
            Self::StableQuadratic => "stable-quadratic",
            Self::StableCubic => "stable-cubic",
            Self::StableFourPoint => "stable-four-point",
            Self::Cdf53 => "cdf53",
            Self::Cdf97 => "cdf97",
            Self::Chaikin => "chaikin",
            Self::CubicBsplines => "cubic-bsplines",
            Self::CubicBsplineWavelets => "cubic-bspline-wavelets",
            Self::DaubechiesD4 => "d4",
            Self::FourPoint => "four-point",
            Self::Haar => "haar",
            Self::Custom => "custom",
        }
    }

    /// Parses a scheme from a case-insensitive name.
    ///
    /// Underscores and dashes are interchangeable, and `cdf-5-3`, `cdf-9-7`
    /// and `daubechies-d4` are accepted as aliases.
    ///
    /// # Errors
    ///
    /// Returns [`LiftingError::UnsupportedScheme`] if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, LiftingError> {
        let normalized = name.to_lowercase().replace('_', "-");
        let alias = match normalized.as_str() {
            "cdf-5-3" | "cdf5/3" => "cdf53",
            "cdf-9-7" | "cdf9/7" => "cdf97",
            "daubechies-d4" | "daubechies4" => "d4",
            other => other,
        };
        Self::ALL
            .into_iter()
            .find(|s| s.name() == alias)
            .ok_or_else(|| LiftingError::UnsupportedScheme(name.to_string()))
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
