//! The two event selectors.
//!
//! Both are pure functions over the immutable bundle, so they can be tested
//! without a server and called concurrently without locking. All domain
//! faults funnel into `SelectError`; the HTTP layer logs them and answers
//! with an empty figure, never a crash.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use crate::artifact::ArtifactBundle;
use crate::figures::{seasonality_figure, Figure};

/// Recoverable lookup fault: the request named a key or index outside the
/// bundle's domain, or the hover payload did not carry a usable point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    UnknownAlgorithm(String),
    UnknownDimensionality(String),
    IndexOutOfRange { index: i64, len: usize },
    MalformedHover,
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectError::UnknownAlgorithm(alg) => write!(f, "unknown algorithm {:?}", alg),
            SelectError::UnknownDimensionality(dim) => {
                write!(f, "unknown dimensionality {:?}", dim)
            }
            SelectError::IndexOutOfRange { index, len } => {
                write!(f, "condition index {} outside 0..{}", index, len)
            }
            SelectError::MalformedHover => write!(f, "hover payload carries no condition index"),
        }
    }
}

impl std::error::Error for SelectError {}

/// Hover payload as plotly.js emits it: `{points: [{customdata: <index>}]}`.
/// `customdata` stays optional so "no hover yet" and malformed payloads are
/// representable instead of a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct HoverData {
    #[serde(default)]
    pub points: Vec<HoverPoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HoverPoint {
    #[serde(default)]
    pub customdata: Option<Value>,
}

/// Embedding selector: (algorithm, dimensionality) to the stored figure
/// pair, returned exactly as the bundle holds it.
pub fn embedding(
    bundle: &ArtifactBundle,
    algorithm: &str,
    dim: &str,
) -> Result<(Figure, Figure), SelectError> {
    let table = match dim {
        "2D" => &bundle.dim2manifolds,
        "3D" => &bundle.dim3manifolds,
        other => return Err(SelectError::UnknownDimensionality(other.to_string())),
    };
    let entry = table
        .get(algorithm)
        .ok_or_else(|| SelectError::UnknownAlgorithm(algorithm.to_string()))?;
    let manifold = Figure::new(entry.manifold_data.clone(), entry.manifold_layout.clone());
    let legend = Figure::new(entry.legend_data.clone(), entry.legend_layout.clone());
    Ok((manifold, legend))
}

/// Seasonality detail selector: hover payload to the band figure for the
/// hovered condition.
pub fn seasonality(bundle: &ArtifactBundle, hover: &HoverData) -> Result<Figure, SelectError> {
    let index = hover
        .points
        .first()
        .and_then(|p| p.customdata.as_ref())
        .and_then(Value::as_i64)
        .ok_or(SelectError::MalformedHover)?;
    let len = bundle.cond_names.len();
    if index < 0 || index as usize >= len {
        return Err(SelectError::IndexOutOfRange { index, len });
    }
    let record = &bundle.seasonality[index as usize];
    Ok(seasonality_figure(record, &bundle.cond_names[index as usize]))
}
