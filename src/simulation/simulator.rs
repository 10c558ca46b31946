//! The per-frame liquid update: motion estimation, oscillation, fill placement.

use bevy::transform::components::Transform;
use bevy_math::{Quat, Vec3};

use crate::core::liquid_config::WobbleConfig;
use crate::core::liquid_error::InitError;
use crate::core::liquid_mesh::LiquidMesh;
use crate::materials::parameter_sink::{ParameterSink, FILL_AMOUNT, WOBBLE_X, WOBBLE_Z};
use crate::simulation::fill::fill_offset;
use crate::simulation::motion::{angular_velocity, linear_velocity};
use crate::simulation::oscillator::Oscillator;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    /// Seconds since the previous tick; exactly zero for a paused clock
    pub elapsed: f32,
    pub transform: Transform,
}

impl TickInput {
    pub fn new(elapsed: f32, transform: Transform) -> Self {
        TickInput { elapsed, transform }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput {
    pub wobble_x: f32,
    pub wobble_z: f32,
    pub fill_offset: Vec3,
}

impl TickOutput {
    /// Writes all three parameters, every time, in a fixed order.
    pub fn write_to(&self, sink: &mut impl ParameterSink) {
        sink.set_float(WOBBLE_X, self.wobble_x);
        sink.set_float(WOBBLE_Z, self.wobble_z);
        sink.set_vector(FILL_AMOUNT, self.fill_offset);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSample {
    pub position: Vec3,
    pub orientation: Quat,
}

impl From<&Transform> for TransformSample {
    fn from(transform: &Transform) -> Self {
        TransformSample {
            position: transform.translation,
            orientation: transform.rotation,
        }
    }
}

/// Everything that carries over from one tick to the next.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulatorState {
    /// `None` until the first tick seeds it
    pub last_sample: Option<TransformSample>,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub oscillator: Oscillator,
    pub shape_compensation: Vec3,
}

impl SimulatorState {
    pub fn is_running(&self) -> bool {
        self.last_sample.is_some()
    }
}

/// Advances `state` by one frame.
///
/// The first tick records the transform before estimating motion, so it sees
/// no velocity. A tick with `elapsed == 0` freezes velocities and wobble and
/// only recomputes the fill offset.
pub fn tick(state: &mut SimulatorState, config: &WobbleConfig, mesh: &LiquidMesh, input: TickInput) -> TickOutput {
    let current = TransformSample::from(&input.transform);
    let last = *state.last_sample.get_or_insert(current);
    let elapsed = input.elapsed;

    if elapsed != 0.0 {
        // the phase tracks with last tick's motion; this tick's motion only feeds the drive
        let motion = state.velocity.length() + state.angular_velocity.length();
        state.oscillator.advance(config, elapsed, motion);

        state.velocity = linear_velocity(last.position, current.position, elapsed);
        state.angular_velocity = angular_velocity(last.orientation, current.orientation, elapsed);
        state.oscillator.drive(config, state.velocity, state.angular_velocity);
    }

    let fill_offset = fill_offset(config, &input.transform, mesh, elapsed, &mut state.shape_compensation);
    state.last_sample = Some(current);

    TickOutput {
        wobble_x: state.oscillator.amplitude_x,
        wobble_z: state.oscillator.amplitude_z,
        fill_offset,
    }
}

/// An initialized simulator: validated configuration, cached mesh data and
/// the running state.
#[derive(Debug, Clone)]
pub struct WobbleSimulator {
    config: WobbleConfig,
    mesh: LiquidMesh,
    state: SimulatorState,
}

impl WobbleSimulator {
    pub fn initialize(config: WobbleConfig, mesh: Option<LiquidMesh>) -> Result<Self, InitError> {
        config.validate()?;
        let mesh = mesh.ok_or(InitError::MissingMesh)?;
        Ok(WobbleSimulator {
            config,
            mesh,
            state: SimulatorState::default(),
        })
    }

    pub fn tick(&mut self, input: TickInput) -> TickOutput {
        tick(&mut self.state, &self.config, &self.mesh, input)
    }

    pub fn tick_into(&mut self, input: TickInput, sink: &mut impl ParameterSink) -> TickOutput {
        let output = self.tick(input);
        output.write_to(sink);
        output
    }

    /// Swaps in an edited configuration; the running state is kept.
    pub fn reconfigure(&mut self, config: WobbleConfig) -> Result<(), InitError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn set_mesh(&mut self, mesh: LiquidMesh) {
        self.mesh = mesh;
    }

    pub fn config(&self) -> &WobbleConfig {
        &self.config
    }

    pub fn mesh(&self) -> &LiquidMesh {
        &self.mesh
    }

    pub fn state(&self) -> &SimulatorState {
        &self.state
    }
}

/// A simulator that owns the sink it writes to.
pub struct BoundSimulator<S: ParameterSink> {
    simulator: WobbleSimulator,
    sink: S,
}

impl<S: ParameterSink> BoundSimulator<S> {
    pub fn initialize(config: WobbleConfig, mesh: Option<LiquidMesh>, sink: Option<S>) -> Result<Self, InitError> {
        let simulator = WobbleSimulator::initialize(config, mesh)?;
        let sink = sink.ok_or(InitError::MissingMaterial)?;
        Ok(BoundSimulator { simulator, sink })
    }

    pub fn tick(&mut self, input: TickInput) -> TickOutput {
        self.simulator.tick_into(input, &mut self.sink)
    }

    pub fn simulator(&self) -> &WobbleSimulator {
        &self.simulator
    }

    pub fn simulator_mut(&mut self) -> &mut WobbleSimulator {
        &mut self.simulator
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::parameter_sink::{ParameterWrite, RecordedParameters};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn cube() -> LiquidMesh {
        let mut vertices = Vec::new();
        for x in [-0.5, 0.5] {
            for y in [-0.5, 0.5] {
                for z in [-0.5, 0.5] {
                    vertices.push(Vec3::new(x, y, z));
                }
            }
        }
        LiquidMesh::from_vertices(vertices)
    }

    fn at(x: f32, y: f32, z: f32) -> Transform {
        Transform::from_xyz(x, y, z)
    }

    #[test]
    fn test_first_tick_sees_no_motion() {
        let mut simulator = WobbleSimulator::initialize(WobbleConfig::default(), Some(cube())).unwrap();
        assert!(!simulator.state().is_running());

        simulator.tick(TickInput::new(0.1, at(5.0, 2.0, -3.0)));
        let state = simulator.state();
        assert!(state.is_running());
        assert_eq!(state.velocity, Vec3::ZERO);
        assert_eq!(state.angular_velocity, Vec3::ZERO);
        assert_eq!(state.oscillator.amplitude_to_add_x, 0.0);
        assert_eq!(state.oscillator.amplitude_to_add_z, 0.0);
    }

    #[test]
    fn test_move_one_unit_along_x() {
        let mut simulator = WobbleSimulator::initialize(WobbleConfig::default(), Some(cube())).unwrap();
        simulator.tick(TickInput::new(1.0, at(0.0, 0.0, 0.0)));
        simulator.tick(TickInput::new(1.0, at(1.0, 0.0, 0.0)));

        let state = simulator.state();
        assert_eq!(state.velocity.x, -1.0);
        assert!(state.oscillator.amplitude_to_add_x != 0.0);
        assert!(state.oscillator.amplitude_to_add_x.abs() <= 0.03);
        assert!((state.oscillator.amplitude_to_add_x + 0.03).abs() < 1e-7);
        assert_eq!(state.oscillator.amplitude_to_add_z, 0.0);
    }

    #[test]
    fn test_paused_tick_freezes_wobble_but_moves_fill() {
        let mut simulator = WobbleSimulator::initialize(WobbleConfig::default(), Some(cube())).unwrap();
        simulator.tick(TickInput::new(0.1, at(0.0, 0.0, 0.0)));
        simulator.tick(TickInput::new(0.1, at(0.3, 0.1, -0.2)));
        let before = simulator.state().clone();

        let output = simulator.tick(TickInput::new(0.0, at(4.0, 4.0, 4.0)));
        let after = simulator.state();

        assert_eq!(after.velocity, before.velocity);
        assert_eq!(after.angular_velocity, before.angular_velocity);
        assert_eq!(after.oscillator, before.oscillator);
        assert_eq!(output.wobble_x, before.oscillator.amplitude_x);
        assert_eq!(output.wobble_z, before.oscillator.amplitude_z);
        assert_eq!(output.fill_offset, Vec3::new(0.0, -0.5, 0.0));
        // the paused move is absorbed into the stored sample
        assert_eq!(after.last_sample.map(|s| s.position), Some(Vec3::splat(4.0)));
    }

    #[test]
    fn test_rest_decays_drive_monotonically() {
        let mut simulator = WobbleSimulator::initialize(WobbleConfig::default(), Some(cube())).unwrap();
        simulator.state.oscillator.amplitude_to_add_x = 0.02;
        simulator.state.oscillator.amplitude_to_add_z = 0.02;

        let mut history = Vec::new();
        for _ in 0..50 {
            simulator.tick(TickInput::new(0.1, Transform::IDENTITY));
            history.push(simulator.state().oscillator.amplitude_to_add_x);
        }
        assert!(history.windows(2).all(|w| w[1] < w[0]));
        assert!(history[49].abs() < history[9].abs());
        assert_eq!(history[49], simulator.state().oscillator.amplitude_to_add_z);
    }

    #[test]
    fn test_shape_compensation_converges_and_snaps() {
        let config = WobbleConfig {
            compensate_shape_amount: 1.0,
            ..Default::default()
        };
        let mut simulator = WobbleSimulator::initialize(config, Some(cube())).unwrap();
        for _ in 0..300 {
            simulator.tick(TickInput::new(0.016, Transform::IDENTITY));
        }
        assert!((simulator.state().shape_compensation.y - 0.5).abs() < 1e-4);

        let mut paused = WobbleSimulator::initialize(config, Some(cube())).unwrap();
        paused.tick(TickInput::new(0.0, Transform::IDENTITY));
        assert_eq!(paused.state().shape_compensation.y, 0.5);
    }

    #[test]
    fn test_sink_receives_three_writes_in_order() {
        let mut simulator = WobbleSimulator::initialize(WobbleConfig::default(), Some(cube())).unwrap();
        let mut sink = RecordedParameters::default();
        let output = simulator.tick_into(TickInput::new(0.0, Transform::IDENTITY), &mut sink);
        simulator.tick_into(TickInput::new(0.0, Transform::IDENTITY), &mut sink);

        assert_eq!(sink.writes.len(), 6);
        assert_eq!(sink.writes[0], ParameterWrite::Float(WOBBLE_X.to_string(), output.wobble_x));
        assert_eq!(sink.writes[1], ParameterWrite::Float(WOBBLE_Z.to_string(), output.wobble_z));
        assert_eq!(sink.writes[2], ParameterWrite::Vector(FILL_AMOUNT.to_string(), output.fill_offset));
        assert_eq!(sink.writes[3..], sink.writes[..3]);
    }

    #[test]
    fn test_initialize_requires_mesh_and_valid_config() {
        let missing = WobbleSimulator::initialize(WobbleConfig::default(), None);
        assert!(matches!(missing, Err(InitError::MissingMesh)));

        let invalid = WobbleConfig {
            compensate_shape_amount: -0.5,
            ..Default::default()
        };
        assert!(matches!(
            WobbleSimulator::initialize(invalid, Some(cube())),
            Err(InitError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_bound_simulator_requires_sink() {
        let missing = BoundSimulator::<RecordedParameters>::initialize(WobbleConfig::default(), Some(cube()), None);
        assert!(matches!(missing, Err(InitError::MissingMaterial)));

        let mut bound =
            BoundSimulator::initialize(WobbleConfig::default(), Some(cube()), Some(RecordedParameters::default()))
                .unwrap();
        bound.tick(TickInput::new(0.1, Transform::IDENTITY));
        assert_eq!(bound.sink().writes.len(), 3);
        assert_eq!(bound.sink().last_vector(FILL_AMOUNT), Some(Vec3::new(0.0, -0.5, 0.0)));
    }

    #[test]
    fn test_reconfigure_keeps_state() {
        let mut simulator = WobbleSimulator::initialize(WobbleConfig::default(), Some(cube())).unwrap();
        simulator.tick(TickInput::new(0.1, Transform::IDENTITY));
        simulator.tick(TickInput::new(0.1, at(0.5, 0.0, 0.0)));
        let before = simulator.state().clone();

        let edited = WobbleConfig {
            fill_amount: 0.2,
            ..Default::default()
        };
        simulator.reconfigure(edited).unwrap();
        assert_eq!(simulator.state(), &before);
        assert_eq!(simulator.config().fill_amount, 0.2);

        let rejected = WobbleConfig {
            max_wobble: f32::INFINITY,
            ..Default::default()
        };
        assert!(simulator.reconfigure(rejected).is_err());
        assert_eq!(simulator.config().fill_amount, 0.2);
    }

    #[test]
    fn test_random_motion_respects_bounds() {
        let config = WobbleConfig {
            compensate_shape_amount: 0.7,
            ..Default::default()
        };
        let mut simulator = WobbleSimulator::initialize(config, Some(cube())).unwrap();
        let mut rng = StdRng::seed_from_u64(132);

        for _ in 0..2000 {
            let elapsed = if rng.gen_bool(0.1) { 0.0 } else { rng.gen_range(0.0001..0.2) };
            let transform = Transform {
                translation: Vec3::new(
                    rng.gen_range(-5.0..5.0),
                    rng.gen_range(-5.0..5.0),
                    rng.gen_range(-5.0..5.0),
                ),
                rotation: Quat::from_euler(
                    bevy_math::EulerRot::XYZ,
                    rng.gen_range(-3.2..3.2),
                    rng.gen_range(-3.2..3.2),
                    rng.gen_range(-3.2..3.2),
                ),
                scale: Vec3::ONE,
            };
            let output = simulator.tick(TickInput::new(elapsed, transform));
            let state = simulator.state();

            assert!(state.oscillator.amplitude_to_add_x.abs() <= config.max_wobble);
            assert!(state.oscillator.amplitude_to_add_z.abs() <= config.max_wobble);
            assert!((-1.0..=1.0).contains(&state.oscillator.phase_signal));
            assert!(state.velocity.is_finite());
            assert!(state.angular_velocity.is_finite());
            assert!(output.wobble_x.is_finite() && output.wobble_z.is_finite());
            assert!(output.fill_offset.is_finite());
        }
    }
}
