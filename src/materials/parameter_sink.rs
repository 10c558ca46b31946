use bevy_math::Vec3;

pub const WOBBLE_X: &str = "_WobbleX";
pub const WOBBLE_Z: &str = "_WobbleZ";
pub const FILL_AMOUNT: &str = "_FillAmount";

/// Anything that accepts named shader parameters.
pub trait ParameterSink {
    fn set_float(&mut self, name: &str, value: f32);
    fn set_vector(&mut self, name: &str, value: Vec3);
}

/// Records every write in order. Used to inspect what a tick pushed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedParameters {
    pub writes: Vec<ParameterWrite>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParameterWrite {
    Float(String, f32),
    Vector(String, Vec3),
}

impl RecordedParameters {
    pub fn last_float(&self, name: &str) -> Option<f32> {
        self.writes.iter().rev().find_map(|write| match write {
            ParameterWrite::Float(n, value) if *n == name => Some(*value),
            _ => None,
        })
    }

    pub fn last_vector(&self, name: &str) -> Option<Vec3> {
        self.writes.iter().rev().find_map(|write| match write {
            ParameterWrite::Vector(n, value) if *n == name => Some(*value),
            _ => None,
        })
    }
}

impl ParameterSink for RecordedParameters {
    fn set_float(&mut self, name: &str, value: f32) {
        self.writes.push(ParameterWrite::Float(name.to_string(), value));
    }

    fn set_vector(&mut self, name: &str, value: Vec3) {
        self.writes.push(ParameterWrite::Vector(name.to_string(), value));
    }
}
