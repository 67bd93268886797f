//! Pendulum-chain secondary motion ("jiggle physics") for rigged 2D
//! characters.
//!
//! A rig is described declaratively (typically as JSON): sub-rigs of pinned
//! particle chains, input rules that map rig parameters (head angle, body
//! sway) into a normalized physics space, and output rules that map the
//! resulting chain motion back onto rig parameters (hair, clothing,
//! accessories). [`PhysicsEngine`] owns the flattened rig and advances it once
//! per animation tick against a host's [`ParameterModel`].
//!
//! ```
//! use sway2d::{ParameterBank, PhysicsEngine};
//!
//! # let json = r#"{
//! #     "Meta": {
//! #         "PhysicsSettingCount": 1, "TotalInputCount": 1,
//! #         "TotalOutputCount": 1, "VertexCount": 2,
//! #         "EffectiveForces": {
//! #             "Gravity": { "X": 0.0, "Y": -1.0 },
//! #             "Wind": { "X": 0.0, "Y": 0.0 }
//! #         }
//! #     },
//! #     "PhysicsSettings": [{
//! #         "Normalization": {
//! #             "Position": { "Minimum": -10.0, "Maximum": 10.0, "Default": 0.0 },
//! #             "Angle": { "Minimum": -10.0, "Maximum": 10.0, "Default": 0.0 }
//! #         },
//! #         "Input": [
//! #             { "Source": { "Id": "ParamAngleX" }, "Weight": 100.0, "Type": "Angle" }
//! #         ],
//! #         "Output": [
//! #             { "Destination": { "Id": "ParamHairFront" }, "VertexIndex": 1,
//! #               "Scale": 1.0, "Weight": 100.0, "Type": "Angle" }
//! #         ],
//! #         "Vertices": [
//! #             { "Position": { "X": 0.0, "Y": 0.0 }, "Mobility": 1.0,
//! #               "Delay": 1.0, "Acceleration": 1.0, "Radius": 0.0 },
//! #             { "Position": { "X": 0.0, "Y": 10.0 }, "Mobility": 0.95,
//! #               "Delay": 0.8, "Acceleration": 1.5, "Radius": 10.0 }
//! #         ]
//! #     }]
//! # }"#;
//! let mut engine = PhysicsEngine::from_json(json)?;
//!
//! let mut model = ParameterBank::new();
//! model.add("ParamAngleX", -30.0, 30.0, 0.0);
//! model.add("ParamHairFront", -1.0, 1.0, 0.0);
//!
//! model.set_value("ParamAngleX", 30.0);
//! engine.evaluate(&mut model, 1.0 / 60.0);
//! # Ok::<(), sway2d::ParseError>(())
//! ```
//!
//! Evaluation is deterministic and never fails: ids the model does not know
//! are skipped, and malformed descriptions are rejected at construction time
//! with a [`ParseError`].

mod engine;
mod error;
mod math;
mod model;
mod normalize;
mod rig;
mod setting;
mod vec2;

pub use engine::{PhysicsEngine, PhysicsOptions};
pub use error::ParseError;
pub use math::{
    cardano_cubic_root, clamp, degrees_to_radians, direction_to_radian, quadratic_equation,
    radian_to_direction, radians_to_degrees,
};
pub use model::{ParameterBank, ParameterModel};
pub use normalize::normalize_parameter_value;
pub use rig::{Input, NormalizationRange, Output, ParameterKind, Particle, PhysicsRig, SubRig};
pub use setting::{
    EffectiveForces, InputDescription, Meta, NormalizationDescription, OutputDescription,
    ParameterRef, PhysicsDescription, Point, RangeDescription, SettingDescription,
    VertexDescription,
};
pub use vec2::Vec2;
