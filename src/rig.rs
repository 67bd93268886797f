//! Flattened runtime representation of one physics rig.
//!
//! The declarative description ([`crate::setting`]) is flattened into three
//! contiguous arrays (inputs, outputs, particles) addressed by each sub-rig's
//! base index plus a local offset. The evaluator walks those arrays once per
//! frame, so the layout mirrors the access pattern instead of nesting
//! containers per sub-rig.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::math::direction_to_radian;
use crate::model::ParameterModel;
use crate::setting::PhysicsDescription;
use crate::vec2::Vec2;

/// Which parameter component an input reads or an output writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterKind {
    /// Horizontal translation.
    X,
    /// Vertical translation.
    Y,
    /// Rotation, in degrees on the parameter side.
    Angle,
}

/// One axis (position or angle) of a sub-rig's normalized space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationRange {
    /// Lower bound.
    pub minimum: f64,
    /// Upper bound.
    pub maximum: f64,
    /// Resting value.
    pub default: f64,
}

/// An input rule: reads one rig parameter and accumulates a normalized
/// translation or angle contribution.
#[derive(Debug, Clone)]
pub struct Input {
    /// Source parameter id.
    pub parameter_id: String,
    /// Resolved parameter index; `None` until [`PhysicsRig::bind`] runs or
    /// when the id is absent from the model.
    pub parameter_index: Option<usize>,
    /// Contribution weight in percent.
    pub weight: f64,
    /// Which accumulator the contribution feeds.
    pub kind: ParameterKind,
    /// Flips the normalization polarity.
    pub reflect: bool,
}

/// An output rule: reads chain motion and writes it back into one rig
/// parameter.
#[derive(Debug, Clone)]
pub struct Output {
    /// Destination parameter id.
    pub parameter_id: String,
    /// Resolved parameter index; `None` until [`PhysicsRig::bind`] runs or
    /// when the id is absent from the model.
    pub parameter_index: Option<usize>,
    /// Particle whose segment drives this output.
    pub vertex_index: usize,
    /// Scale applied to angle outputs.
    pub angle_scale: f64,
    /// Scale applied to translation outputs.
    pub translation_scale: Vec2,
    /// Blend weight in percent (100 = full replace).
    pub weight: f64,
    /// Which component of the motion is read.
    pub kind: ParameterKind,
    /// Negates the output value.
    pub reflect: bool,
    /// Most negative raw value ever clamped away, before clamping.
    /// Monotone; never reset automatically.
    pub value_below_minimum: f64,
    /// Most positive raw value ever clamped away, before clamping.
    /// Monotone; never reset automatically.
    pub value_exceeded_maximum: f64,
}

impl Output {
    /// Reads the output scalar from the chain motion.
    ///
    /// `translation` is the segment from the particle below `particle_index`
    /// up to it. Angle outputs measure the signed angle between that segment
    /// and the parent segment (or the reversed global gravity when no parent
    /// segment exists).
    pub(crate) fn value(
        &self,
        translation: Vec2,
        strand: &[Particle],
        particle_index: usize,
        gravity: Vec2,
    ) -> f64 {
        match self.kind {
            ParameterKind::X => {
                if self.reflect {
                    -translation.x
                } else {
                    translation.x
                }
            }
            ParameterKind::Y => {
                if self.reflect {
                    -translation.y
                } else {
                    translation.y
                }
            }
            ParameterKind::Angle => {
                let parent_gravity = if particle_index >= 2 {
                    strand[particle_index - 1].position - strand[particle_index - 2].position
                } else {
                    gravity * -1.0
                };

                let value = direction_to_radian(parent_gravity, translation);
                if self.reflect {
                    -value
                } else {
                    value
                }
            }
        }
    }

    /// Scale factor for this output's component.
    pub(crate) fn scale(&self) -> f64 {
        match self.kind {
            ParameterKind::X => self.translation_scale.x,
            ParameterKind::Y => self.translation_scale.y,
            ParameterKind::Angle => self.angle_scale,
        }
    }
}

/// A point mass in a chain.
///
/// Particle 0 of every chain is the pinned anchor: its position is overwritten
/// every frame from the accumulated input translation and it carries no mass
/// dynamics of its own.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Rest position, built from the chain radii at construction time.
    pub initial_position: Vec2,
    /// Current position.
    pub position: Vec2,
    /// Position at the start of the current frame.
    pub last_position: Vec2,
    /// Gravity direction seen on the previous frame.
    pub last_gravity: Vec2,
    /// Per-frame force accumulator; zeroed after integration.
    pub force: Vec2,
    /// Current velocity.
    pub velocity: Vec2,
    /// Velocity retention factor.
    pub mobility: f64,
    /// Integration delay factor, relative to a 30 FPS reference frame.
    pub delay: f64,
    /// Gravity acceleration multiplier.
    pub acceleration: f64,
    /// Rest distance from the previous particle in the chain.
    pub radius: f64,
}

/// One sub-rig: counts and base offsets into the shared arrays, plus its
/// normalization ranges.
#[derive(Debug, Clone)]
pub struct SubRig {
    /// Number of inputs.
    pub input_count: usize,
    /// Offset of this sub-rig's first input in [`PhysicsRig::inputs`].
    pub base_input_index: usize,
    /// Number of outputs.
    pub output_count: usize,
    /// Offset of this sub-rig's first output in [`PhysicsRig::outputs`].
    pub base_output_index: usize,
    /// Number of particles, anchor included.
    pub particle_count: usize,
    /// Offset of this sub-rig's first particle in [`PhysicsRig::particles`].
    pub base_particle_index: usize,
    /// Normalized translation space.
    pub normalization_position: NormalizationRange,
    /// Normalized angle space, in degrees.
    pub normalization_angle: NormalizationRange,
}

/// The flattened rig: every sub-rig's elements in three contiguous arrays.
///
/// Built once from the description and kept for the engine's lifetime. Only
/// particle state (and the outputs' high-water marks) mutates per frame.
#[derive(Debug, Clone)]
pub struct PhysicsRig {
    /// Sub-rigs in declaration order.
    pub settings: Vec<SubRig>,
    /// All inputs, partitioned by sub-rig.
    pub inputs: Vec<Input>,
    /// All outputs, partitioned by sub-rig.
    pub outputs: Vec<Output>,
    /// All particles, partitioned by sub-rig.
    pub particles: Vec<Particle>,
    /// Gravity direction.
    pub gravity: Vec2,
    /// Wind force.
    pub wind: Vec2,
}

impl PhysicsRig {
    /// Builds the flattened rig from its declarative description.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the `Meta` totals disagree with the
    /// flattened arrays.
    pub fn from_description(description: &PhysicsDescription) -> Result<Self, ParseError> {
        let meta = &description.meta;
        if meta.physics_setting_count != description.physics_settings.len() {
            return Err(ParseError::SettingCount {
                declared: meta.physics_setting_count,
                found: description.physics_settings.len(),
            });
        }

        let mut settings = Vec::with_capacity(description.physics_settings.len());
        let mut inputs = Vec::with_capacity(meta.total_input_count);
        let mut outputs = Vec::with_capacity(meta.total_output_count);
        let mut particles = Vec::with_capacity(meta.vertex_count);

        for setting in &description.physics_settings {
            let sub_rig = SubRig {
                input_count: setting.input.len(),
                base_input_index: inputs.len(),
                output_count: setting.output.len(),
                base_output_index: outputs.len(),
                particle_count: setting.vertices.len(),
                base_particle_index: particles.len(),
                normalization_position: NormalizationRange {
                    minimum: setting.normalization.position.minimum,
                    maximum: setting.normalization.position.maximum,
                    default: setting.normalization.position.default,
                },
                normalization_angle: NormalizationRange {
                    minimum: setting.normalization.angle.minimum,
                    maximum: setting.normalization.angle.maximum,
                    default: setting.normalization.angle.default,
                },
            };

            for input in &setting.input {
                inputs.push(Input {
                    parameter_id: input.source.id.clone(),
                    parameter_index: None,
                    weight: input.weight,
                    kind: input.kind,
                    reflect: input.reflect,
                });
            }

            for output in &setting.output {
                outputs.push(Output {
                    parameter_id: output.destination.id.clone(),
                    parameter_index: None,
                    vertex_index: output.vertex_index,
                    angle_scale: output.scale,
                    translation_scale: Vec2::new(output.scale, output.scale),
                    weight: output.weight,
                    kind: output.kind,
                    reflect: output.reflect,
                    value_below_minimum: 0.0,
                    value_exceeded_maximum: 0.0,
                });
            }

            for vertex in &setting.vertices {
                particles.push(Particle {
                    initial_position: Vec2::ZERO,
                    position: Vec2::ZERO,
                    last_position: Vec2::ZERO,
                    last_gravity: Vec2::new(0.0, 1.0),
                    force: Vec2::ZERO,
                    velocity: Vec2::ZERO,
                    mobility: vertex.mobility,
                    delay: vertex.delay,
                    acceleration: vertex.acceleration,
                    radius: vertex.radius,
                });
            }

            settings.push(sub_rig);
        }

        if meta.total_input_count != inputs.len() {
            return Err(ParseError::InputCount {
                declared: meta.total_input_count,
                found: inputs.len(),
            });
        }
        if meta.total_output_count != outputs.len() {
            return Err(ParseError::OutputCount {
                declared: meta.total_output_count,
                found: outputs.len(),
            });
        }
        if meta.vertex_count != particles.len() {
            return Err(ParseError::VertexCount {
                declared: meta.vertex_count,
                found: particles.len(),
            });
        }

        let mut rig = PhysicsRig {
            settings,
            inputs,
            outputs,
            particles,
            gravity: Vec2::new(
                meta.effective_forces.gravity.x,
                meta.effective_forces.gravity.y,
            ),
            wind: Vec2::new(meta.effective_forces.wind.x, meta.effective_forces.wind.y),
        };
        rig.initialize_strands();

        Ok(rig)
    }

    /// Number of sub-rigs.
    pub fn sub_rig_count(&self) -> usize {
        self.settings.len()
    }

    /// Builds every chain's rest pose: the anchor at the origin and each
    /// particle offset from its predecessor by `(0, radius)`.
    fn initialize_strands(&mut self) {
        for setting in &self.settings {
            let base = setting.base_particle_index;
            let strand = &mut self.particles[base..base + setting.particle_count];
            if strand.is_empty() {
                continue;
            }

            strand[0].initial_position = Vec2::ZERO;
            strand[0].position = strand[0].initial_position;
            strand[0].last_position = strand[0].initial_position;
            strand[0].last_gravity = Vec2::new(0.0, 1.0);
            strand[0].velocity = Vec2::ZERO;
            strand[0].force = Vec2::ZERO;

            for i in 1..strand.len() {
                let radius = Vec2::new(0.0, strand[i].radius);
                strand[i].initial_position = strand[i - 1].initial_position + radius;
                strand[i].position = strand[i].initial_position;
                strand[i].last_position = strand[i].initial_position;
                strand[i].last_gravity = Vec2::new(0.0, 1.0);
                strand[i].velocity = Vec2::ZERO;
                strand[i].force = Vec2::ZERO;
            }
        }
    }

    /// Resolves every input and output parameter id against the model.
    ///
    /// Resolution happens once, outside the per-frame loop. Ids the model does
    /// not know stay `None` and their rules are skipped during evaluation; the
    /// model's "not found" sentinel (its parameter count) is never stored.
    pub fn bind(&mut self, model: &dyn ParameterModel) {
        let count = model.parameter_count();
        for input in &mut self.inputs {
            let index = model.parameter_index(&input.parameter_id);
            input.parameter_index = (index < count).then_some(index);
        }
        for output in &mut self.outputs {
            let index = model.parameter_index(&output.parameter_id);
            output.parameter_index = (index < count).then_some(index);
        }
    }

    /// Restores every chain to its rest pose and clears all velocities,
    /// forces, and gravity history. High-water marks are left untouched.
    pub fn reset(&mut self) {
        for particle in &mut self.particles {
            particle.position = particle.initial_position;
            particle.last_position = particle.initial_position;
            particle.last_gravity = Vec2::new(0.0, 1.0);
            particle.velocity = Vec2::ZERO;
            particle.force = Vec2::ZERO;
        }
    }
}
