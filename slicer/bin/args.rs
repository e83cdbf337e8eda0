use std::{path::PathBuf, str::FromStr};

use anyhow::{Context, Ok, Result};
use clap::{ArgAction, Parser};
use nalgebra::{ArrayStorage, Const, Matrix, Scalar, Vector3, U1};
use num_traits::Zero;

#[derive(Debug, Parser)]
/// Cuts a triangle mesh with a plane and writes out the cross-section.
pub struct Args {
    /// Path to a .stl or .obj file.
    pub mesh: PathBuf,

    #[arg(long, default_value_t = 0.0)]
    /// Height of the horizontal cutting plane. Ignored if --origin is given.
    pub height: f64,
    #[arg(long, value_parser = vector_value_parser::<f64, 3>)]
    /// Any point on the cutting plane, as `x, y, z`.
    pub origin: Option<Vector3<f64>>,
    #[arg(long, default_value = "0, 0, 1", value_parser = vector_value_parser::<f64, 3>)]
    /// Normal of the cutting plane. Does not need to be normalized.
    pub normal: Vector3<f64>,

    #[arg(long, conflicts_with_all = ["height", "origin", "normal"])]
    /// Instead of a single plane, cut the whole model into horizontal layers
    /// this far apart.
    pub layer_height: Option<f64>,

    #[arg(long)]
    /// Overrides the numerical tolerance from the config file.
    pub tolerance: Option<f64>,
    #[arg(long)]
    /// Path to a TOML config file.
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    /// File to save the cross-section to, either .svg or .txt. Segments are
    /// printed to stdout if missing.
    pub output: Option<PathBuf>,

    #[arg(short, long, action = ArgAction::Count)]
    /// Log more, can be repeated.
    pub verbose: u8,
}

impl Args {
    /// Point on the single cutting plane.
    pub fn origin(&self) -> Vector3<f64> {
        self.origin
            .unwrap_or_else(|| Vector3::new(0.0, 0.0, self.height))
    }
}

fn vector_value_parser<T, const N: usize>(
    raw: &str,
) -> Result<Matrix<T, Const<N>, U1, ArrayStorage<T, N, 1>>>
where
    T: FromStr + Scalar + Zero,
    T::Err: Send + Sync + std::error::Error + 'static,
{
    let mut vec = Matrix::<T, Const<N>, U1, ArrayStorage<T, N, 1>>::zeros();

    let mut parts = raw.splitn(N, ',');
    for i in 0..N {
        let element = parts.next().context("Missing vector element")?.trim();
        vec[i] = element
            .parse()
            .context("Can't convert element from string")?;
    }

    Ok(vec)
}
