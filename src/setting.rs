//! Declarative rig description, as deserialized from JSON.
//!
//! These types mirror the external description shape one-to-one: a `Meta`
//! block with effective forces and element totals, then one entry per physics
//! setting carrying its normalization ranges, inputs, outputs, and vertices.
//! Field names map to the PascalCase keys of the source format; the runtime
//! representation is built from this by [`PhysicsRig::from_description`].
//!
//! [`PhysicsRig::from_description`]: crate::PhysicsRig::from_description

use serde::{Deserialize, Serialize};

use crate::rig::ParameterKind;

/// Top-level physics description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PhysicsDescription {
    /// Totals and global forces.
    pub meta: Meta,
    /// One entry per sub-rig, in declaration order.
    pub physics_settings: Vec<SettingDescription>,
}

/// Description header: element totals and the effective forces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Meta {
    /// Number of physics settings (sub-rigs).
    pub physics_setting_count: usize,
    /// Total input count across all settings.
    pub total_input_count: usize,
    /// Total output count across all settings.
    pub total_output_count: usize,
    /// Total vertex (particle) count across all settings.
    pub vertex_count: usize,
    /// Global gravity and wind.
    pub effective_forces: EffectiveForces,
}

/// Global forces applied to every chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EffectiveForces {
    /// Gravity direction.
    pub gravity: Point,
    /// Wind force.
    pub wind: Point,
}

/// A 2D point in the description.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Point {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

/// One physics setting: a particle chain with its inputs and outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SettingDescription {
    /// Optional setting identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Normalization ranges for position and angle.
    pub normalization: NormalizationDescription,
    /// Input rules.
    pub input: Vec<InputDescription>,
    /// Output rules.
    pub output: Vec<OutputDescription>,
    /// Particle chain vertices, anchor first.
    pub vertices: Vec<VertexDescription>,
}

/// Normalization ranges of one setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NormalizationDescription {
    /// Translation range.
    pub position: RangeDescription,
    /// Angle range, in degrees.
    pub angle: RangeDescription,
}

/// One axis of a normalized space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RangeDescription {
    /// Lower bound.
    pub minimum: f64,
    /// Upper bound.
    pub maximum: f64,
    /// Resting value.
    pub default: f64,
}

/// Reference to a rig parameter by its stable identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParameterRef {
    /// Parameter id.
    pub id: String,
}

/// An input rule: reads one parameter, accumulates translation or angle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InputDescription {
    /// Source parameter.
    pub source: ParameterRef,
    /// Contribution weight in percent (100 = full).
    pub weight: f64,
    /// Which accumulator the contribution feeds.
    #[serde(rename = "Type")]
    pub kind: ParameterKind,
    /// Flips the normalization polarity.
    #[serde(default)]
    pub reflect: bool,
}

/// An output rule: reads chain motion, writes one parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputDescription {
    /// Destination parameter.
    pub destination: ParameterRef,
    /// Particle whose segment drives this output; must be >= 1.
    pub vertex_index: usize,
    /// Output scale.
    pub scale: f64,
    /// Blend weight in percent (100 = full replace).
    pub weight: f64,
    /// Which component of the motion is read.
    #[serde(rename = "Type")]
    pub kind: ParameterKind,
    /// Negates the output value.
    #[serde(default)]
    pub reflect: bool,
}

/// One particle of a chain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VertexDescription {
    /// Authored position (informational; rest pose is rebuilt from radii).
    pub position: Point,
    /// Velocity retention factor.
    pub mobility: f64,
    /// Integration delay factor, relative to a 30 FPS reference frame.
    pub delay: f64,
    /// Gravity acceleration multiplier.
    pub acceleration: f64,
    /// Rest distance from the previous particle.
    pub radius: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTION: &str = r#"{
        "Meta": {
            "PhysicsSettingCount": 1,
            "TotalInputCount": 2,
            "TotalOutputCount": 1,
            "VertexCount": 2,
            "EffectiveForces": {
                "Gravity": { "X": 0.0, "Y": -1.0 },
                "Wind": { "X": 0.0, "Y": 0.0 }
            }
        },
        "PhysicsSettings": [
            {
                "Id": "PhysicsSetting1",
                "Normalization": {
                    "Position": { "Minimum": -10.0, "Maximum": 10.0, "Default": 0.0 },
                    "Angle": { "Minimum": -10.0, "Maximum": 10.0, "Default": 0.0 }
                },
                "Input": [
                    { "Source": { "Id": "ParamAngleX" }, "Weight": 60.0, "Type": "Angle", "Reflect": false },
                    { "Source": { "Id": "ParamBodyX" }, "Weight": 40.0, "Type": "X" }
                ],
                "Output": [
                    { "Destination": { "Id": "ParamHairFront" }, "VertexIndex": 1, "Scale": 1.0, "Weight": 100.0, "Type": "Angle", "Reflect": false }
                ],
                "Vertices": [
                    { "Position": { "X": 0.0, "Y": 0.0 }, "Mobility": 1.0, "Delay": 1.0, "Acceleration": 1.0, "Radius": 0.0 },
                    { "Position": { "X": 0.0, "Y": 10.0 }, "Mobility": 0.95, "Delay": 0.8, "Acceleration": 1.5, "Radius": 10.0 }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_deserialize_description() {
        let description: PhysicsDescription = serde_json::from_str(DESCRIPTION).unwrap();

        assert_eq!(description.meta.physics_setting_count, 1);
        assert_eq!(description.meta.effective_forces.gravity.y, -1.0);
        assert_eq!(description.physics_settings.len(), 1);

        let setting = &description.physics_settings[0];
        assert_eq!(setting.id.as_deref(), Some("PhysicsSetting1"));
        assert_eq!(setting.input.len(), 2);
        assert_eq!(setting.input[0].kind, ParameterKind::Angle);
        // Reflect is optional and defaults to false.
        assert!(!setting.input[1].reflect);
        assert_eq!(setting.output[0].vertex_index, 1);
        assert_eq!(setting.vertices[1].radius, 10.0);
    }

    #[test]
    fn test_description_round_trip() {
        let description: PhysicsDescription = serde_json::from_str(DESCRIPTION).unwrap();
        let json = serde_json::to_string(&description).unwrap();
        let again: PhysicsDescription = serde_json::from_str(&json).unwrap();

        assert_eq!(again.meta.vertex_count, description.meta.vertex_count);
        assert_eq!(
            again.physics_settings[0].vertices[1].mobility,
            description.physics_settings[0].vertices[1].mobility
        );
    }
}
