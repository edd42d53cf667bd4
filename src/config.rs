//! Beam definition files
//!
//! A definition describes the span, the supports and the applied loads in a
//! unit system of the author's choosing. TOML and JSON are accepted; the
//! format is picked from the file extension.
//!
//! ```toml
//! span = 9.0
//! fixed_support = 2.0
//! rolling_support = 7.0
//!
//! [units]
//! length = "m"
//! force = "kN"
//!
//! [[loads]]
//! kind = "point"
//! x_coord = 3.0
//! force = [0.0, -20.0]
//!
//! [[loads]]
//! kind = "distributed"
//! expression = "10*x + 5"
//! left = 0.0
//! right = 2.0
//! origin = "left"
//! ```

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::beam::Beam;
use crate::error::BeamError;
use crate::loads::{DistributedLoad, Load, PointLoad, PointTorque};
use crate::math::polynomial::Polynomial;
use crate::types::{LengthValue, UnitScale};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid beam definition: {0}")]
    Beam(#[from] BeamError),

    #[error("{kind} load is missing field '{field}'")]
    MissingField { kind: String, field: &'static str },

    #[error("Invalid value for '{field}': {value}")]
    InvalidField { field: &'static str, value: String },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Units the definition's numbers are written in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSystem {
    #[serde(default = "default_length_unit")]
    pub length: String,
    #[serde(default = "default_force_unit")]
    pub force: String,
}

fn default_length_unit() -> String {
    "m".to_string()
}

fn default_force_unit() -> String {
    "kN".to_string()
}

impl Default for UnitSystem {
    fn default() -> Self {
        Self {
            length: default_length_unit(),
            force: default_force_unit(),
        }
    }
}

/// One entry of the `loads` list
///
/// Which fields are required depends on `kind`:
/// - `point`: `x_coord` and either `force = [Fx, Fy]` or a vertical `magnitude`
/// - `distributed`: `coeffs` (ascending) or `expression`, `left`, `right`,
///   optional `origin` (`global` or `left`)
/// - `torque`: `magnitude` (counter-clockwise positive) and `x_coord`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadDefinition {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_coord: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coeffs: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl LoadDefinition {
    fn require<T: Copy>(&self, value: Option<T>, field: &'static str) -> Result<T, ConfigError> {
        value.ok_or_else(|| ConfigError::MissingField {
            kind: self.kind.clone(),
            field,
        })
    }

    /// Convert into a load in internal units
    pub fn to_load(&self, scale: &UnitScale) -> Result<Load, ConfigError> {
        match self.kind.to_ascii_lowercase().as_str() {
            "point" => {
                let x_coord = scale.coord(self.require(self.x_coord, "x_coord")?);
                let [fx, fy] = match (self.force, self.magnitude) {
                    (Some(force), _) => force,
                    (None, Some(magnitude)) => [0.0, magnitude],
                    (None, None) => self.require(None, "force")?,
                };
                Ok(PointLoad::new(scale.force(fx), scale.force(fy), x_coord).into())
            }
            "distributed" => {
                let left = scale.coord(self.require(self.left, "left")?);
                let right = scale.coord(self.require(self.right, "right")?);
                let intensity = self.intensity()?;
                // w(x) written in user units: substitute x_user = x / L and scale to kN/m
                let intensity = intensity
                    .compose_linear(1.0 / scale.length, 0.0)
                    .scaled(scale.intensity(1.0));

                let load = match self.origin.as_deref().unwrap_or("global") {
                    "global" => DistributedLoad::new(intensity, left, right)?,
                    "left" | "local" => DistributedLoad::local(intensity, left, right)?,
                    other => {
                        return Err(ConfigError::InvalidField {
                            field: "origin",
                            value: other.to_string(),
                        });
                    }
                };
                Ok(load.into())
            }
            "torque" => {
                let magnitude = scale.moment(self.require(self.magnitude, "magnitude")?);
                let x_coord = scale.coord(self.require(self.x_coord, "x_coord")?);
                Ok(PointTorque::new(magnitude, x_coord).into())
            }
            _ => Err(BeamError::InvalidLoadType(self.kind.clone()).into()),
        }
    }

    fn intensity(&self) -> Result<Polynomial, ConfigError> {
        match (&self.coeffs, &self.expression) {
            (Some(coeffs), _) => Ok(Polynomial::new(coeffs.clone())),
            (None, Some(expression)) => Ok(expression.parse::<Polynomial>()?),
            (None, None) => Err(ConfigError::MissingField {
                kind: self.kind.clone(),
                field: "coeffs",
            }),
        }
    }
}

/// Complete description of a loaded beam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamDefinition {
    pub span: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_support: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolling_support: Option<f64>,
    #[serde(default)]
    pub units: UnitSystem,
    #[serde(default)]
    pub loads: Vec<LoadDefinition>,
}

impl BeamDefinition {
    /// Load a definition from a `.toml` or `.json` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;

        let definition = match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Self::from_toml_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        info!(
            "Loaded beam definition from {} ({} loads)",
            path.display(),
            definition.loads.len()
        );
        Ok(definition)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn unit_scale(&self) -> Result<UnitScale, ConfigError> {
        UnitScale::from_units(&self.units.length, &self.units.force)
            .map_err(|e| ConfigError::Beam(e.into()))
    }

    /// Build the beam in internal units (metres, kilonewtons)
    pub fn to_beam(&self) -> Result<Beam, ConfigError> {
        let scale = self.unit_scale()?;

        let span = LengthValue::new(self.span, self.units.length.as_str())
            .to_length()
            .map_err(BeamError::from)?;
        let mut beam = Beam::with_length(span)?;

        // Unspecified supports keep the beam's defaults
        if self.fixed_support.is_some() || self.rolling_support.is_some() {
            let fixed = self.fixed_support.map_or(beam.fixed_support(), |x| scale.coord(x));
            let rolling = self.rolling_support.map_or(beam.rolling_support(), |x| scale.coord(x));
            beam.set_supports(fixed, rolling)?;
        }

        let loads = self
            .loads
            .iter()
            .map(|load| load.to_load(&scale))
            .collect::<Result<Vec<_>, _>>()?;
        beam.add_loads(loads)?;

        Ok(beam)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{foot, kilonewton, kip, meter, Force, Length};
    use approx::assert_relative_eq;
    use std::io::Write;

    const TEXTBOOK: &str = r#"
        span = 9.0
        fixed_support = 2.0
        rolling_support = 7.0

        [[loads]]
        kind = "point"
        x_coord = 3.0
        force = [0.0, -20.0]
    "#;

    #[test]
    fn test_textbook_definition() {
        let definition = BeamDefinition::from_toml_str(TEXTBOOK).unwrap();
        assert_eq!(definition.units, UnitSystem::default());

        let (f_ax, f_ay, f_by) = definition.to_beam().unwrap().get_reaction_forces();
        assert_relative_eq!(f_ax, 0.0);
        assert_relative_eq!(f_ay, 16.0, epsilon = 1e-9);
        assert_relative_eq!(f_by, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_all_load_kinds() {
        let definition = BeamDefinition::from_toml_str(
            r#"
            span = 10.0

            [[loads]]
            kind = "point"
            x_coord = 5.0
            magnitude = -4.0

            [[loads]]
            kind = "distributed"
            expression = "10*x + 5"
            left = 0.0
            right = 2.0

            [[loads]]
            kind = "distributed"
            coeffs = [0.0, 1.0]
            left = 6.0
            right = 8.0
            origin = "left"

            [[loads]]
            kind = "torque"
            magnitude = 231.0
            x_coord = 3.0
            "#,
        )
        .unwrap();

        let beam = definition.to_beam().unwrap();
        assert_eq!(beam.loads().len(), 4);
        assert_eq!(beam.fixed_support(), 2.0);
        assert_eq!(beam.rolling_support(), 8.0);
        assert_relative_eq!(beam.distributed_load_at(1.0).unwrap(), 15.0);
        // Local origin: w = x - 6 on [6, 8]
        assert_relative_eq!(beam.distributed_load_at(7.0).unwrap(), 1.0, epsilon = 1e-12);
        assert!(beam.is_in_equilibrium(1e-9));
    }

    #[test]
    fn test_unknown_load_kind() {
        let definition = BeamDefinition {
            span: 5.0,
            fixed_support: None,
            rolling_support: None,
            units: UnitSystem::default(),
            loads: vec![LoadDefinition {
                kind: "snow".into(),
                ..LoadDefinition::default()
            }],
        };
        assert!(matches!(
            definition.to_beam(),
            Err(ConfigError::Beam(BeamError::InvalidLoadType(kind))) if kind == "snow"
        ));
    }

    #[test]
    fn test_missing_fields_and_bad_origin() {
        let scale = UnitScale::default();
        let point = LoadDefinition {
            kind: "point".into(),
            x_coord: Some(1.0),
            ..LoadDefinition::default()
        };
        assert!(matches!(
            point.to_load(&scale),
            Err(ConfigError::MissingField { field: "force", .. })
        ));

        let distributed = LoadDefinition {
            kind: "distributed".into(),
            coeffs: Some(vec![1.0]),
            left: Some(0.0),
            right: Some(1.0),
            origin: Some("middle".into()),
            ..LoadDefinition::default()
        };
        assert!(matches!(
            distributed.to_load(&scale),
            Err(ConfigError::InvalidField { field: "origin", .. })
        ));

        let reversed = LoadDefinition {
            origin: None,
            left: Some(6.0),
            right: Some(2.0),
            ..distributed
        };
        assert!(matches!(
            reversed.to_load(&scale),
            Err(ConfigError::Beam(BeamError::InvalidInterval { .. }))
        ));
    }

    #[test]
    fn test_imperial_units_match_metric_beam() {
        // 30 ft span, 1 kip/ft uniform load over the whole span
        let imperial = BeamDefinition::from_json_str(
            r#"{
                "span": 30.0,
                "units": { "length": "ft", "force": "kip" },
                "loads": [
                    { "kind": "distributed", "coeffs": [-1.0], "left": 0.0, "right": 30.0 },
                    { "kind": "distributed", "expression": "-0.1*x", "left": 0.0, "right": 30.0 }
                ]
            }"#,
        )
        .unwrap();
        let beam = imperial.to_beam().unwrap();

        let ft = Length::new::<foot>(1.0).get::<meter>();
        let kip_kn = Force::new::<kip>(1.0).get::<kilonewton>();
        let total_kips = 30.0 + 0.1 * 30.0 * 30.0 / 2.0;
        let (_, f_ay, f_by) = beam.get_reaction_forces();
        assert_relative_eq!(beam.length(), 30.0 * ft, max_relative = 1e-12);
        assert_relative_eq!(f_ay + f_by, total_kips * kip_kn, max_relative = 1e-9);

        // Supports default to 0.2 and 0.8 of the span
        assert_relative_eq!(beam.fixed_support(), 6.0 * ft, max_relative = 1e-12);
        assert_relative_eq!(beam.rolling_support(), 24.0 * ft, max_relative = 1e-12);

        // Intensity at mid-span: 1 + 0.1 * 15 = 2.5 kip/ft
        let mid = beam.distributed_load_at(15.0 * ft).unwrap();
        assert_relative_eq!(mid, -2.5 * kip_kn / ft, max_relative = 1e-9);
    }

    #[test]
    fn test_single_support_keeps_the_other_default() {
        let definition = BeamDefinition::from_toml_str(
            r#"
            span = 10.0
            fixed_support = 10.0
            "#,
        )
        .unwrap();
        let beam = definition.to_beam().unwrap();
        assert_eq!(beam.fixed_support(), 10.0);
        assert_eq!(beam.rolling_support(), 8.0);

        let clash = BeamDefinition::from_toml_str("span = 10.0\nrolling_support = 2.0").unwrap();
        assert!(matches!(
            clash.to_beam(),
            Err(ConfigError::Beam(BeamError::DegenerateSupports(_)))
        ));
    }

    #[test]
    fn test_unknown_units_are_reported() {
        let mut definition = BeamDefinition::from_toml_str(TEXTBOOK).unwrap();
        definition.units.force = "tonnes".into();
        assert!(matches!(
            definition.to_beam(),
            Err(ConfigError::Beam(BeamError::Unit(_)))
        ));
    }

    #[test]
    fn test_from_file_picks_format_by_extension() {
        let mut toml_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        toml_file.write_all(TEXTBOOK.as_bytes()).unwrap();
        let from_toml = BeamDefinition::from_file(toml_file.path()).unwrap();

        let mut json_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        json_file
            .write_all(serde_json::to_string(&from_toml).unwrap().as_bytes())
            .unwrap();
        let from_json = BeamDefinition::from_file(json_file.path()).unwrap();
        assert_eq!(from_toml, from_json);

        let other = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(
            BeamDefinition::from_file(other.path()),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
