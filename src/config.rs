use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Presentation constants the locator and gutter need.
///
/// All values are pixels, supplied by the host surface; the engine never
/// measures layout itself. Defaults match a 24px line box with a small
/// padded header, which is what the reference surfaces render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// Height of one rendered row.
    pub line_height: f64,
    /// Vertical padding above the first row.
    pub padding_top: f64,
    /// Horizontal offset of column 0 from the pointer origin.
    pub left_margin: f64,
    /// Offset of the text container's top edge within the viewport.
    pub container_top: f64,
    /// Constant correction applied to gutter label positions.
    pub label_correction: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            line_height: 24.0,
            padding_top: 12.0,
            left_margin: 8.0,
            container_top: 0.0,
            label_correction: 2.0,
        }
    }
}

/// Partial metrics parsed from a config file. Unset fields fall back to the
/// defaults (or to an earlier file's values via [`MetricOverrides::union`]).
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MetricOverrides {
    pub line_height: Option<f64>,
    pub padding_top: Option<f64>,
    pub left_margin: Option<f64>,
    pub container_top: Option<f64>,
    pub label_correction: Option<f64>,
}

impl MetricOverrides {
    /// Merge two override sets; `other` wins where both are set.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            line_height: other.line_height.or(self.line_height),
            padding_top: other.padding_top.or(self.padding_top),
            left_margin: other.left_margin.or(self.left_margin),
            container_top: other.container_top.or(self.container_top),
            label_correction: other.label_correction.or(self.label_correction),
        }
    }

    /// Apply the overrides on top of a base set of metrics.
    pub fn apply(&self, base: LayoutMetrics) -> LayoutMetrics {
        LayoutMetrics {
            line_height: self.line_height.unwrap_or(base.line_height),
            padding_top: self.padding_top.unwrap_or(base.padding_top),
            left_margin: self.left_margin.unwrap_or(base.left_margin),
            container_top: self.container_top.unwrap_or(base.container_top),
            label_correction: self.label_correction.unwrap_or(base.label_correction),
        }
    }
}

/// Load metric overrides from a file. A missing file is an empty override
/// set, not an error.
pub fn load_metrics(path: &Path) -> Result<MetricOverrides> {
    if !path.exists() {
        return Ok(MetricOverrides::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read metrics config {}", path.display()))?;
    Ok(parse_metrics(&content))
}

/// Save metric overrides to a file, creating parent directories as needed.
pub fn save_metrics(path: &Path, overrides: &MetricOverrides) -> Result<()> {
    let mut lines = vec!["# textpos layout metrics".to_string()];
    if let Some(v) = overrides.line_height {
        lines.push(format!("line-height {v}"));
    }
    if let Some(v) = overrides.padding_top {
        lines.push(format!("padding-top {v}"));
    }
    if let Some(v) = overrides.left_margin {
        lines.push(format!("left-margin {v}"));
    }
    if let Some(v) = overrides.container_top {
        lines.push(format!("container-top {v}"));
    }
    if let Some(v) = overrides.label_correction {
        lines.push(format!("label-correction {v}"));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write metrics config {}", path.display()))
}

/// Parse `key value` lines. Comments and blank lines are ignored; unknown
/// keys and unparseable values are skipped rather than rejected.
pub fn parse_metrics(content: &str) -> MetricOverrides {
    let mut overrides = MetricOverrides::default();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.split_whitespace();
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        let Ok(value) = value.parse::<f64>() else {
            continue;
        };
        match key {
            "line-height" => overrides.line_height = Some(value),
            "padding-top" => overrides.padding_top = Some(value),
            "left-margin" => overrides.left_margin = Some(value),
            "container-top" => overrides.container_top = Some(value),
            "label-correction" => overrides.label_correction = Some(value),
            _ => {}
        }
    }
    overrides
}
