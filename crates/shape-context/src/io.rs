//! JSON point-set files, run configuration and descriptor reports.

use serde::{Deserialize, Serialize};
use shape_context_core::{
    InputError, PointSet, ShapeContextDescriptors, ShapeContextError, ShapeContextParams,
};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum ShapeContextIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid point set: {0}")]
    Points(#[from] InputError),
}

/// Point coordinates on disk: `{ "points": [[x, y], ...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSetFile {
    pub points: Vec<[f64; 2]>,
}

impl PointSetFile {
    pub fn from_point_set(points: &PointSet) -> Self {
        Self {
            points: points.to_rows(),
        }
    }

    /// Validate the coordinates into a [`PointSet`].
    pub fn to_point_set(&self) -> Result<PointSet, InputError> {
        PointSet::from_rows(&self.points)
    }

    /// Load a point file from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ShapeContextIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write the points to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ShapeContextIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Configuration for one descriptor run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeContextRunConfig {
    pub points_path: String,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub params: ShapeContextParams,
}

impl ShapeContextRunConfig {
    pub fn new(points_path: impl Into<String>) -> Self {
        Self {
            points_path: points_path.into(),
            output_path: None,
            params: ShapeContextParams::default(),
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ShapeContextIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ShapeContextIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("shape_context_report.json"))
    }

    /// Read and validate the configured point file.
    pub fn load_points(&self) -> Result<PointSet, ShapeContextIoError> {
        Ok(PointSetFile::load_json(&self.points_path)?.to_point_set()?)
    }
}

/// Result of one run, as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptorReport {
    pub points_path: String,
    #[serde(default)]
    pub config_path: Option<String>,
    pub num_points: usize,
    pub params: ShapeContextParams,
    #[serde(default)]
    pub descriptors: Vec<Vec<f64>>,
    #[serde(default)]
    pub row_totals: Vec<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl DescriptorReport {
    /// Base report without descriptors.
    pub fn new(
        cfg: &ShapeContextRunConfig,
        config_path: Option<&Path>,
        num_points: usize,
    ) -> Self {
        Self {
            points_path: cfg.points_path.clone(),
            config_path: config_path.map(|p| p.to_string_lossy().into_owned()),
            num_points,
            params: cfg.params.clone(),
            descriptors: Vec::new(),
            row_totals: Vec::new(),
            error: None,
        }
    }

    /// Populate report fields from a successful run.
    pub fn set_descriptors(&mut self, desc: &ShapeContextDescriptors) {
        self.num_points = desc.num_points();
        self.descriptors = desc.to_rows();
        self.row_totals = desc.row_totals();
        self.error = None;
    }

    /// Record a descriptor error.
    pub fn set_error(&mut self, err: &ShapeContextError) {
        self.descriptors.clear();
        self.row_totals.clear();
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ShapeContextIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON, creating parent directories.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ShapeContextIoError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
