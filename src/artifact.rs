//! The precomputed artifact bundle: data model, deserialization, validation.
//!
//! The bundle is produced offline and consumed read-only. It carries four
//! top-level parts keyed exactly as the producer writes them: the 3D and 2D
//! manifold tables (algorithm name to stored plotly traces/layouts), the
//! per-condition seasonality records, and the index-aligned condition names.
//! Everything plot-shaped is opaque `serde_json::Value`; the server never
//! transforms it, only returns it.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::logging::{log, obj, v_num, v_str, Domain, Level};

/// The five fixed algorithm names, in presentation order. Both manifold
/// tables must carry exactly these keys.
pub const ALGORITHMS: [&str; 5] = [
    "Principal Component Analysis (PCA)",
    "Isomap",
    "Locally Linear Embedding (LLE)",
    "Modified Locally Linear Embedding (MLLE)",
    "Local Tangent Space Alignment (LTSA)",
];

pub const DEFAULT_ALGORITHM: &str = "Isomap";
pub const DEFAULT_DIMENSIONALITY: &str = "3D";

/// Stored figure geometry for one (algorithm, dimensionality) pair:
/// the embedding scatter and its paired legend plot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifoldEntry {
    pub manifold_data: Vec<Value>,
    pub manifold_layout: Value,
    pub legend_data: Vec<Value>,
    pub legend_layout: Value,
}

/// One condition's seasonal fluctuation summary: a mean per week-of-year and
/// a credible-interval band as [lower, upper] per week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalityRecord {
    pub hpd: Vec<[f64; 2]>,
    pub mean: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactBundle {
    pub dim3manifolds: HashMap<String, ManifoldEntry>,
    pub dim2manifolds: HashMap<String, ManifoldEntry>,
    #[serde(rename = "seasonalityPlotData")]
    pub seasonality: Vec<SeasonalityRecord>,
    #[serde(rename = "condName")]
    pub cond_names: Vec<String>,
}

impl ArtifactBundle {
    /// Load and validate the bundle. Any failure here is fatal to startup:
    /// the server has nothing meaningful to serve without it.
    pub fn load(path: &Path) -> Result<Self> {
        let hash = file_sha256(path)
            .with_context(|| format!("cannot hash artifact bundle {}", path.display()))?;
        let raw = std::fs::read(path)
            .with_context(|| format!("cannot read artifact bundle {}", path.display()))?;
        let bundle: ArtifactBundle = serde_json::from_slice(&raw)
            .with_context(|| format!("artifact bundle {} does not deserialize", path.display()))?;
        bundle.validate()?;
        log(
            Level::Info,
            Domain::Artifact,
            "bundle_loaded",
            obj(&[
                ("path", v_str(&path.display().to_string())),
                ("sha256", v_str(&hash)),
                ("conditions", v_num(bundle.cond_names.len() as f64)),
                ("algorithms", v_num(bundle.dim3manifolds.len() as f64)),
                (
                    "weeks",
                    v_num(bundle.seasonality.first().map(|r| r.mean.len()).unwrap_or(0) as f64),
                ),
            ]),
        );
        Ok(bundle)
    }

    /// Shape checks on the index-aligned collections and manifold tables.
    /// The point-to-condition association carried in trace `customdata` is
    /// verified here instead of being trusted at hover time.
    pub fn validate(&self) -> Result<()> {
        if self.cond_names.is_empty() {
            bail!("artifact bundle has no conditions");
        }
        if self.seasonality.len() != self.cond_names.len() {
            bail!(
                "seasonality records ({}) and condition names ({}) are not index-aligned",
                self.seasonality.len(),
                self.cond_names.len()
            );
        }
        for (i, rec) in self.seasonality.iter().enumerate() {
            if rec.hpd.len() != rec.mean.len() {
                bail!(
                    "condition {}: hpd has {} weeks but mean has {}",
                    i,
                    rec.hpd.len(),
                    rec.mean.len()
                );
            }
            if rec.mean.is_empty() {
                bail!("condition {}: empty seasonality curve", i);
            }
        }
        for (dim, table) in [("3D", &self.dim3manifolds), ("2D", &self.dim2manifolds)] {
            for alg in ALGORITHMS {
                let entry = match table.get(alg) {
                    Some(e) => e,
                    None => bail!("{} manifold table is missing algorithm {:?}", dim, alg),
                };
                self.check_customdata(dim, alg, &entry.manifold_data)?;
            }
            if table.len() != ALGORITHMS.len() {
                bail!(
                    "{} manifold table has {} entries, expected {}",
                    dim,
                    table.len(),
                    ALGORITHMS.len()
                );
            }
        }
        Ok(())
    }

    fn check_customdata(&self, dim: &str, alg: &str, traces: &[Value]) -> Result<()> {
        let n = self.cond_names.len() as i64;
        for trace in traces {
            let Some(customdata) = trace.get("customdata").and_then(Value::as_array) else {
                continue;
            };
            for v in customdata {
                let idx = v
                    .as_i64()
                    .with_context(|| format!("{} {:?}: non-integer customdata {}", dim, alg, v))?;
                if idx < 0 || idx >= n {
                    bail!(
                        "{} {:?}: customdata {} outside condition range 0..{}",
                        dim,
                        alg,
                        idx,
                        n
                    );
                }
            }
        }
        Ok(())
    }
}

/// Streaming SHA-256 of a file, hex-encoded. Logged at startup so a run can
/// be tied back to the exact bundle it served.
pub fn file_sha256(path: &Path) -> Result<String> {
    let mut file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn entry_with_customdata(customdata: Vec<i64>) -> ManifoldEntry {
        ManifoldEntry {
            manifold_data: vec![json!({
                "type": "scatter3d",
                "x": [0.0, 1.0],
                "y": [0.0, 1.0],
                "z": [0.0, 1.0],
                "customdata": customdata,
            })],
            manifold_layout: json!({"height": 700}),
            legend_data: vec![json!({"type": "scatter", "x": [0], "y": [0]})],
            legend_layout: json!({"showlegend": true}),
        }
    }

    fn small_bundle() -> ArtifactBundle {
        let table: HashMap<String, ManifoldEntry> = ALGORITHMS
            .iter()
            .map(|a| (a.to_string(), entry_with_customdata(vec![0, 1])))
            .collect();
        ArtifactBundle {
            dim3manifolds: table.clone(),
            dim2manifolds: table,
            seasonality: vec![
                SeasonalityRecord {
                    hpd: vec![[0.05, 0.15], [0.1, 0.3]],
                    mean: vec![0.1, 0.2],
                },
                SeasonalityRecord {
                    hpd: vec![[-0.1, 0.1], [-0.2, 0.0]],
                    mean: vec![0.0, -0.1],
                },
            ],
            cond_names: vec!["Influenza".to_string(), "Measles".to_string()],
        }
    }

    #[test]
    fn valid_bundle_passes() {
        assert!(small_bundle().validate().is_ok());
    }

    #[test]
    fn misaligned_names_fail() {
        let mut b = small_bundle();
        b.cond_names.pop();
        let err = b.validate().unwrap_err().to_string();
        assert!(err.contains("index-aligned"), "{}", err);
    }

    #[test]
    fn ragged_record_fails() {
        let mut b = small_bundle();
        b.seasonality[1].mean.pop();
        let err = b.validate().unwrap_err().to_string();
        assert!(err.contains("weeks"), "{}", err);
    }

    #[test]
    fn missing_algorithm_fails() {
        let mut b = small_bundle();
        b.dim2manifolds.remove("Isomap");
        let err = b.validate().unwrap_err().to_string();
        assert!(err.contains("missing algorithm"), "{}", err);
    }

    #[test]
    fn out_of_range_customdata_fails() {
        let mut b = small_bundle();
        b.dim3manifolds
            .insert("Isomap".to_string(), entry_with_customdata(vec![0, 7]));
        let err = b.validate().unwrap_err().to_string();
        assert!(err.contains("customdata 7"), "{}", err);
    }

    #[test]
    fn load_round_trips_through_disk() {
        let bundle = small_bundle();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&bundle).unwrap().as_bytes())
            .unwrap();
        let loaded = ArtifactBundle::load(file.path()).unwrap();
        assert_eq!(loaded.cond_names, bundle.cond_names);
        assert_eq!(loaded.seasonality[0].mean, bundle.seasonality[0].mean);
        assert_eq!(
            loaded.dim3manifolds["Isomap"].manifold_data,
            bundle.dim3manifolds["Isomap"].manifold_data
        );
    }

    #[test]
    fn load_missing_file_fails() {
        let err = ArtifactBundle::load(Path::new("/nonexistent/bundle.json")).unwrap_err();
        assert!(err.to_string().contains("hash artifact bundle"));
    }

    #[test]
    fn sha256_is_deterministic() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"bundle bytes").unwrap();
        let h1 = file_sha256(file.path()).unwrap();
        let h2 = file_sha256(file.path()).unwrap();
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
    }
}
