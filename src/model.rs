//! Parameter-model collaborator: the live parameter buffer the engine reads
//! inputs from and writes outputs into.
//!
//! The engine does not own rig parameters; a host (typically the rig/model
//! store of a renderer) exposes them through [`ParameterModel`] as parallel
//! arrays addressed by a resolved index. [`ParameterBank`] is a minimal
//! self-contained implementation for tests and simple hosts.

/// Access to a rig's parameter buffer.
///
/// Lookups use a sentinel, not an error: [`parameter_index`] returns
/// [`parameter_count`] when an id is unknown. Callers must treat that value
/// as "not found" and never clamp it into range.
///
/// [`parameter_index`]: ParameterModel::parameter_index
/// [`parameter_count`]: ParameterModel::parameter_count
pub trait ParameterModel {
    /// Resolves a parameter id to its index, or returns
    /// [`parameter_count`](ParameterModel::parameter_count) if absent.
    fn parameter_index(&self, id: &str) -> usize;

    /// Number of parameters. Doubles as the "not found" sentinel.
    fn parameter_count(&self) -> usize;

    /// Current values, indexed by resolved index.
    fn values(&self) -> &[f64];

    /// Current values, mutable.
    fn values_mut(&mut self) -> &mut [f64];

    /// Per-parameter minimum bounds.
    fn minimum_values(&self) -> &[f64];

    /// Per-parameter maximum bounds.
    fn maximum_values(&self) -> &[f64];

    /// Per-parameter default values.
    fn default_values(&self) -> &[f64];
}

/// A self-contained parameter store.
#[derive(Debug, Clone, Default)]
pub struct ParameterBank {
    ids: Vec<String>,
    values: Vec<f64>,
    minimum_values: Vec<f64>,
    maximum_values: Vec<f64>,
    default_values: Vec<f64>,
}

impl ParameterBank {
    /// Creates an empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter and returns its index. The value starts at `default`.
    pub fn add(&mut self, id: &str, minimum: f64, maximum: f64, default: f64) -> usize {
        let index = self.ids.len();
        self.ids.push(id.to_string());
        self.values.push(default);
        self.minimum_values.push(minimum);
        self.maximum_values.push(maximum);
        self.default_values.push(default);
        index
    }

    /// Sets a parameter's value by id. Unknown ids are ignored.
    pub fn set_value(&mut self, id: &str, value: f64) {
        if let Some(index) = self.ids.iter().position(|known| known == id) {
            self.values[index] = value;
        }
    }

    /// Reads a parameter's value by id.
    pub fn value(&self, id: &str) -> Option<f64> {
        self.ids
            .iter()
            .position(|known| known == id)
            .map(|index| self.values[index])
    }
}

impl ParameterModel for ParameterBank {
    fn parameter_index(&self, id: &str) -> usize {
        self.ids
            .iter()
            .position(|known| known == id)
            .unwrap_or(self.ids.len())
    }

    fn parameter_count(&self) -> usize {
        self.ids.len()
    }

    fn values(&self) -> &[f64] {
        &self.values
    }

    fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    fn minimum_values(&self) -> &[f64] {
        &self.minimum_values
    }

    fn maximum_values(&self) -> &[f64] {
        &self.maximum_values
    }

    fn default_values(&self) -> &[f64] {
        &self.default_values
    }
}
