//! The physics engine: per-frame particle-chain integration and the mapping
//! between rig parameters and chain motion.
//!
//! `evaluate` runs once per animation tick, on the thread that owns the
//! model's parameter buffer. For every sub-rig it gathers inputs, normalizes
//! them into physics space, advances the particle chain one step, and writes
//! the resulting motion back into the model's parameters. There is no
//! internal locking and no per-frame allocation; independent engines may be
//! stepped concurrently as long as each owns its model.
//!
//! # Numeric edge cases
//!
//! Evaluation never fails: unresolved parameter ids are skipped, an output
//! with an invalid vertex index aborts the remaining outputs of its sub-rig,
//! and zero divisors in normalization hold the result at the range default.
//! The one acknowledged gap is segment re-projection through
//! [`Vec2::normalize`] on a zero-length segment, which would produce `NaN`;
//! chains with positive radii never reach it.

use crate::error::ParseError;
use crate::math::{degrees_to_radians, direction_to_radian, radian_to_direction};
use crate::model::ParameterModel;
use crate::normalize::normalize_parameter_value;
use crate::rig::{Input, Output, ParameterKind, Particle, PhysicsRig, SubRig};
use crate::setting::PhysicsDescription;
use crate::vec2::Vec2;

/// Smoothing divisor for gravity-direction changes.
const AIR_RESISTANCE: f64 = 5.0;

/// Horizontal jitter snap threshold, scaled by the sub-rig's normalized
/// position maximum.
const MOVEMENT_THRESHOLD: f64 = 0.001;

/// Weights are authored in percent; 100 means full contribution.
const MAXIMUM_WEIGHT: f64 = 100.0;

/// Gravity and wind applied to every chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsOptions {
    /// Gravity direction.
    pub gravity: Vec2,
    /// Wind force.
    pub wind: Vec2,
}

impl Default for PhysicsOptions {
    fn default() -> Self {
        PhysicsOptions {
            gravity: Vec2::new(0.0, -1.0),
            wind: Vec2::ZERO,
        }
    }
}

/// Secondary-motion engine for one rig.
///
/// Owns the flattened [`PhysicsRig`] and drives it against a host
/// [`ParameterModel`]. Construct one per character; instances share no state.
///
/// # Example
///
/// ```
/// use sway2d::{ParameterBank, PhysicsEngine};
///
/// let json = r#"{
///     "Meta": {
///         "PhysicsSettingCount": 1,
///         "TotalInputCount": 1,
///         "TotalOutputCount": 1,
///         "VertexCount": 2,
///         "EffectiveForces": {
///             "Gravity": { "X": 0.0, "Y": -1.0 },
///             "Wind": { "X": 0.0, "Y": 0.0 }
///         }
///     },
///     "PhysicsSettings": [{
///         "Normalization": {
///             "Position": { "Minimum": -10.0, "Maximum": 10.0, "Default": 0.0 },
///             "Angle": { "Minimum": -10.0, "Maximum": 10.0, "Default": 0.0 }
///         },
///         "Input": [
///             { "Source": { "Id": "ParamAngleX" }, "Weight": 100.0, "Type": "Angle" }
///         ],
///         "Output": [
///             { "Destination": { "Id": "ParamHairFront" }, "VertexIndex": 1,
///               "Scale": 1.0, "Weight": 100.0, "Type": "Angle" }
///         ],
///         "Vertices": [
///             { "Position": { "X": 0.0, "Y": 0.0 }, "Mobility": 1.0,
///               "Delay": 1.0, "Acceleration": 1.0, "Radius": 0.0 },
///             { "Position": { "X": 0.0, "Y": 10.0 }, "Mobility": 0.95,
///               "Delay": 0.8, "Acceleration": 1.5, "Radius": 10.0 }
///         ]
///     }]
/// }"#;
///
/// let mut engine = PhysicsEngine::from_json(json).unwrap();
///
/// let mut model = ParameterBank::new();
/// model.add("ParamAngleX", -30.0, 30.0, 0.0);
/// model.add("ParamHairFront", -1.0, 1.0, 0.0);
///
/// model.set_value("ParamAngleX", 30.0);
/// for _ in 0..10 {
///     engine.evaluate(&mut model, 1.0 / 60.0);
/// }
///
/// let swing = model.value("ParamHairFront").unwrap();
/// assert!(swing.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct PhysicsEngine {
    rig: PhysicsRig,
    bound: bool,
}

impl PhysicsEngine {
    /// Builds an engine from a parsed description.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the description's `Meta` totals disagree
    /// with its arrays.
    pub fn new(description: &PhysicsDescription) -> Result<Self, ParseError> {
        Ok(PhysicsEngine {
            rig: PhysicsRig::from_description(description)?,
            bound: false,
        })
    }

    /// Builds an engine straight from the JSON description text.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for malformed JSON or inconsistent totals.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        let description: PhysicsDescription = serde_json::from_str(json)?;
        Self::new(&description)
    }

    /// Resolves parameter ids against the model.
    ///
    /// Called automatically by the first [`evaluate`](Self::evaluate); call it
    /// explicitly to re-bind after the model's parameter set changes.
    pub fn bind(&mut self, model: &dyn ParameterModel) {
        self.rig.bind(model);
        self.bound = true;
    }

    /// Advances every sub-rig by `delta_time` seconds and writes the results
    /// into the model.
    pub fn evaluate(&mut self, model: &mut dyn ParameterModel, delta_time: f64) {
        if !self.bound {
            self.bind(model);
        }

        let PhysicsRig {
            settings,
            inputs,
            outputs,
            particles,
            gravity,
            wind,
        } = &mut self.rig;

        for setting in settings.iter() {
            if setting.particle_count == 0 {
                continue;
            }

            let mut total_angle = 0.0;
            let mut total_translation = Vec2::ZERO;

            let setting_inputs =
                &inputs[setting.base_input_index..setting.base_input_index + setting.input_count];
            for input in setting_inputs {
                accumulate_input(
                    &mut total_translation,
                    &mut total_angle,
                    input,
                    setting,
                    model,
                );
            }

            // Rotate the accumulated translation into the chain's frame. The
            // in-place order matters: the freshly written x feeds the y term.
            let radian = degrees_to_radians(-total_angle);
            total_translation.x =
                total_translation.x * radian.cos() - total_translation.y * radian.sin();
            total_translation.y =
                total_translation.x * radian.sin() + total_translation.y * radian.cos();

            let strand = &mut particles
                [setting.base_particle_index..setting.base_particle_index + setting.particle_count];
            update_particles(
                strand,
                total_translation,
                total_angle,
                *wind,
                MOVEMENT_THRESHOLD * setting.normalization_position.maximum,
                delta_time,
                AIR_RESISTANCE,
            );

            let setting_outputs = &mut outputs
                [setting.base_output_index..setting.base_output_index + setting.output_count];
            for output in setting_outputs.iter_mut() {
                let particle_index = output.vertex_index;
                if particle_index < 1 || particle_index >= setting.particle_count {
                    // An invalid vertex aborts the remaining outputs of this
                    // sub-rig, it does not just skip one.
                    break;
                }

                let Some(destination) = output.parameter_index else {
                    continue;
                };
                if destination >= model.parameter_count() {
                    continue;
                }

                let translation =
                    strand[particle_index].position - strand[particle_index - 1].position;
                let value = output.value(translation, strand, particle_index, *gravity);

                let minimum = model.minimum_values()[destination];
                let maximum = model.maximum_values()[destination];
                let values = model.values_mut();
                update_output_parameter_value(
                    &mut values[destination],
                    minimum,
                    maximum,
                    value,
                    output,
                );
            }
        }
    }

    /// Replaces gravity and wind.
    pub fn set_options(&mut self, options: PhysicsOptions) {
        self.rig.gravity = options.gravity;
        self.rig.wind = options.wind;
    }

    /// Current gravity and wind.
    pub fn options(&self) -> PhysicsOptions {
        PhysicsOptions {
            gravity: self.rig.gravity,
            wind: self.rig.wind,
        }
    }

    /// Restores every chain to its rest pose. Parameter bindings survive.
    pub fn reset(&mut self) {
        self.rig.reset();
    }

    /// The flattened rig, for inspection.
    pub fn rig(&self) -> &PhysicsRig {
        &self.rig
    }
}

/// Adds one input's weighted, normalized contribution to the accumulators.
fn accumulate_input(
    total_translation: &mut Vec2,
    total_angle: &mut f64,
    input: &Input,
    setting: &SubRig,
    model: &dyn ParameterModel,
) {
    let Some(index) = input.parameter_index else {
        return;
    };
    if index >= model.parameter_count() {
        return;
    }

    let value = model.values()[index];
    let minimum = model.minimum_values()[index];
    let maximum = model.maximum_values()[index];
    let default = model.default_values()[index];
    let weight = input.weight / MAXIMUM_WEIGHT;

    match input.kind {
        ParameterKind::X => {
            total_translation.x += normalize_parameter_value(
                value,
                minimum,
                maximum,
                default,
                setting.normalization_position.minimum,
                setting.normalization_position.maximum,
                setting.normalization_position.default,
                input.reflect,
            ) * weight;
        }
        ParameterKind::Y => {
            total_translation.y += normalize_parameter_value(
                value,
                minimum,
                maximum,
                default,
                setting.normalization_position.minimum,
                setting.normalization_position.maximum,
                setting.normalization_position.default,
                input.reflect,
            ) * weight;
        }
        ParameterKind::Angle => {
            *total_angle += normalize_parameter_value(
                value,
                minimum,
                maximum,
                default,
                setting.normalization_angle.minimum,
                setting.normalization_angle.maximum,
                setting.normalization_angle.default,
                input.reflect,
            ) * weight;
        }
    }
}

/// Advances one chain by a single time step.
///
/// The anchor follows the accumulated translation exactly; every other
/// particle is pulled toward the instantaneous gravity direction implied by
/// the accumulated rotation, then re-projected onto its fixed radius so the
/// chain's segment lengths stay rigid. This sequence is order-dependent by
/// design (each particle reads its predecessor's position as updated this
/// frame, and the direction rotation reuses the freshly written x when
/// computing y); reordering it changes the simulated motion.
pub(crate) fn update_particles(
    strand: &mut [Particle],
    total_translation: Vec2,
    total_angle: f64,
    wind: Vec2,
    threshold: f64,
    delta_time: f64,
    air_resistance: f64,
) {
    strand[0].position = total_translation;

    let total_radian = degrees_to_radians(total_angle);
    let mut current_gravity = radian_to_direction(total_radian);
    current_gravity.normalize();

    for i in 1..strand.len() {
        strand[i].force = current_gravity * strand[i].acceleration + wind;
        strand[i].last_position = strand[i].position;

        // Delay is authored against a 30 FPS reference frame.
        let delay = strand[i].delay * delta_time * 30.0;

        let mut direction = strand[i].position - strand[i - 1].position;
        let radian = direction_to_radian(strand[i].last_gravity, current_gravity) / air_resistance;
        direction.x = radian.cos() * direction.x - direction.y * radian.sin();
        direction.y = radian.sin() * direction.x + direction.y * radian.cos();

        strand[i].position = strand[i - 1].position + direction;

        let velocity = strand[i].velocity * delay;
        let force = strand[i].force * delay * delay;
        strand[i].position = strand[i].position + velocity + force;

        // Keep the integrated direction, discard the integrated length.
        let mut new_direction = strand[i].position - strand[i - 1].position;
        new_direction.normalize();
        strand[i].position = strand[i - 1].position + new_direction * strand[i].radius;

        if strand[i].position.x.abs() < threshold {
            strand[i].position.x = 0.0;
        }

        if delay != 0.0 {
            strand[i].velocity =
                (strand[i].position - strand[i].last_position) / delay * strand[i].mobility;
        }

        strand[i].force = Vec2::ZERO;
        strand[i].last_gravity = current_gravity;
    }
}

/// Scales, clamps, and blends one output value into its destination
/// parameter, recording raw out-of-range excursions in the output's
/// high-water marks.
fn update_output_parameter_value(
    parameter_value: &mut f64,
    minimum: f64,
    maximum: f64,
    value: f64,
    output: &mut Output,
) {
    let mut value = value * output.scale();

    if value < minimum {
        if value < output.value_below_minimum {
            output.value_below_minimum = value;
        }
        value = minimum;
    } else if value > maximum {
        if value > output.value_exceeded_maximum {
            output.value_exceeded_maximum = value;
        }
        value = maximum;
    }

    let weight = output.weight / MAXIMUM_WEIGHT;
    if weight >= 1.0 {
        *parameter_value = value;
    } else {
        *parameter_value = *parameter_value * (1.0 - weight) + value * weight;
    }
}
