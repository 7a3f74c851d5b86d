// drift_core/src/estimation/odometry.rs

use crate::error::OdomError;
use crate::estimation::config::{OdomSource, OdometryConfig, ODOM_COVARIANCE_DIAGONAL};
use crate::frames::{euler_vector, express_in_reference, yaw_rotation};
use crate::messages::Odometry;
use crate::noise::{GaussianSampler, NoiseSource, ZeroNoise};
use crate::types::PoseProvider;
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

/// Updates closer together than this (in seconds) are ignored.
pub const DELTA_TIME_EPSILON: f64 = 1e-9;

/// Running state of an initialised estimator.
///
/// `previous_true_transform` and `previous_noisy_transform` are expressed relative to
/// `initial_transform` and are only ever reset together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorState {
    /// Origin of the odometry frame in the world. Fixed until the next initialisation.
    pub initial_transform: Isometry3<f64>,
    /// Last observed ground truth, without noise.
    pub previous_true_transform: Isometry3<f64>,
    /// Last published estimate, before the root offset.
    pub previous_noisy_transform: Isometry3<f64>,
    pub last_update_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Lifecycle {
    #[default]
    Uninitialized,
    Initialized(EstimatorState),
}

/// Turns a ground-truth pose stream into drifting, noise-injected odometry.
///
/// Noise is added to the tick-to-tick increments rather than to the absolute pose, so the
/// estimate performs a random walk away from the truth over time.
#[derive(Debug, Clone)]
pub struct NoisyOdometry {
    config: OdometryConfig,
    position_noise: Box<dyn NoiseSource>,
    rotation_noise: Box<dyn NoiseSource>,
    lifecycle: Lifecycle,
    sample: Odometry,
}

impl NoisyOdometry {
    /// Creates an estimator that draws its noise from the given sources.
    pub fn new(
        config: OdometryConfig,
        position_noise: Box<dyn NoiseSource>,
        rotation_noise: Box<dyn NoiseSource>,
    ) -> Self {
        let sample = Odometry::new(config.frame_id.clone(), config.child_frame_id.clone());
        Self {
            config,
            position_noise,
            rotation_noise,
            lifecycle: Lifecycle::Uninitialized,
            sample,
        }
    }

    /// Creates an estimator with Gaussian samplers built from `config`, both driven by
    /// independent streams of a ChaCha generator seeded with `seed`.
    pub fn from_seed(config: OdometryConfig, seed: u64) -> Result<Self, OdomError> {
        let position_rng = ChaCha8Rng::seed_from_u64(seed);
        let mut rotation_rng = position_rng.clone();
        rotation_rng.set_stream(1);

        let position_noise = GaussianSampler::new(&config.position_noise, position_rng)?;
        let rotation_noise = GaussianSampler::new(&config.rotation_noise, rotation_rng)?;
        Ok(Self::new(
            config,
            Box::new(position_noise),
            Box::new(rotation_noise),
        ))
    }

    /// Creates an estimator whose noise terms are always zero, whatever `with_noise` says.
    pub fn noiseless(config: OdometryConfig) -> Self {
        Self::new(config, Box::new(ZeroNoise), Box::new(ZeroNoise))
    }

    pub fn config(&self) -> &OdometryConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Initialized(_))
    }

    pub fn last_update_time(&self) -> Option<f64> {
        match &self.lifecycle {
            Lifecycle::Initialized(state) => Some(state.last_update_time),
            Lifecycle::Uninitialized => None,
        }
    }

    /// The most recent odometry sample.
    pub fn sample(&self) -> &Odometry {
        &self.sample
    }

    /// Relabels the odometry and child frames, both in the configuration and in the
    /// current sample.
    pub fn set_frame_ids(
        &mut self,
        frame_id: impl Into<String>,
        child_frame_id: impl Into<String>,
    ) {
        self.config.frame_id = frame_id.into();
        self.config.child_frame_id = child_frame_id.into();
        self.sample.header.frame_id = self.config.frame_id.clone();
        self.sample.child_frame_id = self.config.child_frame_id.clone();
    }

    /// Anchors the odometry frame and resets all running state.
    ///
    /// Calling this on an initialised estimator starts over from `ground_truth`.
    pub fn initialize(&mut self, ground_truth: &Isometry3<f64>, current_time: f64) {
        let initial_transform = match self.config.source {
            OdomSource::Encoder => *ground_truth,
            OdomSource::World => Isometry3::identity(),
        };

        // The frame origin, expressed in the frame itself.
        let origin = Isometry3::identity();

        let mut sample = Odometry::new(
            self.config.frame_id.clone(),
            self.config.child_frame_id.clone(),
        );
        sample.pose.pose = origin;
        sample.set_covariance_diagonals(&ODOM_COVARIANCE_DIAGONAL);
        self.sample = sample;

        self.lifecycle = Lifecycle::Initialized(EstimatorState {
            initial_transform,
            previous_true_transform: origin,
            previous_noisy_transform: origin,
            last_update_time: current_time,
        });

        debug!(
            source = ?self.config.source,
            frame_id = %self.config.frame_id,
            child_frame_id = %self.config.child_frame_id,
            time = current_time,
            "odometry initialised"
        );
    }

    /// Integrates one ground-truth observation into the estimate.
    ///
    /// The first call only initialises. Calls less than [`DELTA_TIME_EPSILON`] after the
    /// previous update change nothing.
    pub fn update(&mut self, ground_truth: &Isometry3<f64>, current_time: f64) {
        if !self.is_initialized() {
            self.initialize(ground_truth, current_time);
        }
        let Lifecycle::Initialized(state) = &mut self.lifecycle else {
            return;
        };

        let dt = current_time - state.last_update_time;
        if dt < DELTA_TIME_EPSILON {
            trace!(dt, "skipping odometry update");
            return;
        }

        self.sample.header.stamp = current_time;

        let previous_noisy_position = state.previous_noisy_transform.translation.vector;
        let previous_noisy_rotation = state.previous_noisy_transform.rotation;
        let previous_true_position = state.previous_true_transform.translation.vector;
        let previous_true_rotation = state.previous_true_transform.rotation;

        let (true_position, true_rotation) =
            express_in_reference(&state.initial_transform, ground_truth);
        state.previous_true_transform =
            Isometry3::from_parts(Translation3::from(true_position), true_rotation);

        // --- Position: carry the accumulated error, then add a fresh planar increment ---
        let position_noise = if self.config.with_noise {
            Vector3::new(self.position_noise.sample(), self.position_noise.sample(), 0.0)
        } else {
            Vector3::zeros()
        };
        let noisy_position =
            true_position + (previous_noisy_position - previous_true_position) + position_noise;

        // --- Orientation: apply the true increment to the previous estimate, plus yaw noise ---
        let yaw_noise = if self.config.with_noise {
            self.rotation_noise.sample()
        } else {
            0.0
        };
        let noisy_rotation = UnitQuaternion::new_normalize(
            (yaw_rotation(yaw_noise)
                * previous_noisy_rotation
                * previous_true_rotation.inverse()
                * true_rotation)
                .into_inner(),
        );

        state.previous_noisy_transform =
            Isometry3::from_parts(Translation3::from(noisy_position), noisy_rotation);

        // --- Twist, from the estimate before the mount rotation is applied ---
        let twist = &mut self.sample.twist.twist;
        twist.linear = noisy_rotation
            .inverse_transform_vector(&(noisy_position - previous_noisy_position))
            / dt;
        twist.angular = euler_vector(&(noisy_rotation * previous_noisy_rotation.inverse())) / dt;

        let root_offset = &self.config.root_offset;
        self.sample.pose.pose = Isometry3::from_parts(
            Translation3::from(noisy_position + root_offset.translation.vector),
            noisy_rotation * root_offset.rotation,
        );

        state.last_update_time = current_time;
    }

    /// Same as [`NoisyOdometry::update`], reading the ground truth from `provider`.
    pub fn update_from(&mut self, provider: &dyn PoseProvider, current_time: f64) {
        let ground_truth = provider.ground_truth_pose();
        self.update(&ground_truth, current_time);
    }

    /// The published pose as a single transform from the odometry frame to the child frame.
    pub fn odom_transform(&self) -> Isometry3<f64> {
        self.sample.pose.pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::GaussianNoise;
    use approx::assert_relative_eq;
    use nalgebra::Vector6;
    use std::f64::consts::FRAC_PI_2;

    /// Replays a fixed list of values, repeating the last one once exhausted.
    #[derive(Debug, Clone)]
    struct ScriptedNoise {
        values: Vec<f64>,
        cursor: usize,
    }

    impl ScriptedNoise {
        fn boxed(values: &[f64]) -> Box<dyn NoiseSource> {
            Box::new(Self {
                values: values.to_vec(),
                cursor: 0,
            })
        }
    }

    impl NoiseSource for ScriptedNoise {
        fn sample(&mut self) -> f64 {
            let value = self.values[self.cursor.min(self.values.len() - 1)];
            self.cursor += 1;
            value
        }
    }

    fn pose(x: f64, y: f64, z: f64, yaw: f64) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::new(x, y, z), yaw_rotation(yaw))
    }

    fn config(source: OdomSource) -> OdometryConfig {
        OdometryConfig {
            source,
            ..Default::default()
        }
    }

    fn state(odom: &NoisyOdometry) -> EstimatorState {
        match odom.lifecycle() {
            Lifecycle::Initialized(state) => *state,
            Lifecycle::Uninitialized => panic!("estimator was never initialised"),
        }
    }

    #[test]
    fn first_update_initialises_without_integrating() {
        let mut odom = NoisyOdometry::noiseless(config(OdomSource::Encoder));
        assert!(!odom.is_initialized());
        assert_eq!(odom.last_update_time(), None);

        odom.update(&pose(3.0, 4.0, 0.0, 1.0), 2.0);

        assert!(odom.is_initialized());
        assert_eq!(odom.last_update_time(), Some(2.0));
        assert_eq!(odom.odom_transform(), Isometry3::identity());
    }

    #[test]
    fn encoder_source_starts_at_the_origin_wherever_the_body_is() {
        let start = pose(10.0, -3.0, 0.5, 0.7);
        let mut odom = NoisyOdometry::noiseless(config(OdomSource::Encoder));
        odom.initialize(&start, 0.0);

        let state = state(&odom);
        assert_eq!(state.initial_transform, start);
        assert_eq!(state.previous_true_transform, Isometry3::identity());
        assert_eq!(state.previous_noisy_transform, Isometry3::identity());

        let published = odom.odom_transform();
        assert_relative_eq!(published.translation.vector, Vector3::zeros());
        assert_eq!(published.rotation, UnitQuaternion::identity());
    }

    #[test]
    fn world_source_anchors_at_identity() {
        for start in [pose(0.0, 0.0, 0.0, 0.0), pose(-7.0, 2.0, 1.0, 2.5)] {
            let mut odom = NoisyOdometry::noiseless(config(OdomSource::World));
            odom.initialize(&start, 0.0);
            assert_eq!(state(&odom).initial_transform, Isometry3::identity());
        }
    }

    #[test]
    fn one_unit_forward_in_one_second() {
        let mut odom = NoisyOdometry::noiseless(config(OdomSource::Encoder));
        odom.update(&Isometry3::identity(), 0.0);
        odom.update(&pose(1.0, 0.0, 0.0, 0.0), 1.0);

        let sample = odom.sample();
        assert_eq!(sample.header.stamp, 1.0);
        assert_relative_eq!(
            sample.pose.pose.translation.vector,
            Vector3::new(1.0, 0.0, 0.0),
            epsilon = 1e-12,
        );
        assert_relative_eq!(
            sample.twist.twist.linear,
            Vector3::new(1.0, 0.0, 0.0),
            epsilon = 1e-12,
        );
        assert_relative_eq!(sample.twist.twist.angular, Vector3::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn noiseless_output_matches_ground_truth_in_the_odometry_frame() {
        let start = pose(2.0, 1.0, 0.0, 0.4);
        let mut odom = NoisyOdometry::noiseless(config(OdomSource::Encoder));
        odom.update(&start, 0.0);

        for step in 1..=50 {
            let t = step as f64 * 0.1;
            let truth = pose(2.0 + t.cos(), 1.0 + 0.5 * t, 0.1 * t, 0.4 + 0.3 * t);
            odom.update(&truth, t);

            let (expected_position, expected_rotation) = express_in_reference(&start, &truth);
            let published = odom.odom_transform();
            assert_relative_eq!(published.translation.vector, expected_position, epsilon = 1e-9);
            assert!(published.rotation.angle_to(&expected_rotation) < 1e-9);
        }
    }

    #[test]
    fn with_noise_disabled_the_noise_sources_are_never_consulted() {
        let mut odom = NoisyOdometry::new(
            config(OdomSource::World),
            ScriptedNoise::boxed(&[5.0]),
            ScriptedNoise::boxed(&[5.0]),
        );
        odom.update(&Isometry3::identity(), 0.0);
        odom.update(&pose(1.0, 2.0, 0.0, 0.0), 1.0);

        assert_relative_eq!(
            odom.odom_transform().translation.vector,
            Vector3::new(1.0, 2.0, 0.0),
            epsilon = 1e-12,
        );
    }

    #[test]
    fn root_offset_shifts_the_pose_but_not_the_twist() {
        let root_offset =
            Isometry3::from_parts(Translation3::new(0.0, 0.0, 0.3), yaw_rotation(FRAC_PI_2));
        let mut odom = NoisyOdometry::noiseless(OdometryConfig {
            root_offset,
            ..config(OdomSource::Encoder)
        });
        odom.update(&Isometry3::identity(), 0.0);
        odom.update(&pose(1.0, 0.0, 0.0, 0.0), 1.0);

        let sample = odom.sample();
        assert_relative_eq!(
            sample.pose.pose.translation.vector,
            Vector3::new(1.0, 0.0, 0.3),
            epsilon = 1e-12,
        );
        assert!(sample.pose.pose.rotation.angle_to(&yaw_rotation(FRAC_PI_2)) < 1e-12);
        assert_relative_eq!(
            sample.twist.twist.linear,
            Vector3::new(1.0, 0.0, 0.0),
            epsilon = 1e-12,
        );

        // The mount rotation must not leak into the stored estimate either.
        assert!(state(&odom).previous_noisy_transform.rotation.angle() < 1e-12);
    }

    #[test]
    fn twist_is_expressed_in_the_body_frame() {
        // Body faces +y in the world and drives forward at 2 m/s.
        let heading = FRAC_PI_2;
        let speed = 2.0;
        let dt = 0.01;
        let mut odom = NoisyOdometry::noiseless(config(OdomSource::World));
        odom.update(&pose(0.0, 0.0, 0.0, heading), 0.0);

        for step in 1..=20 {
            let t = step as f64 * dt;
            odom.update(&pose(0.0, speed * t, 0.0, heading), t);
            if step > 1 {
                assert_relative_eq!(
                    odom.sample().twist.twist.linear,
                    Vector3::new(speed, 0.0, 0.0),
                    epsilon = 1e-9,
                );
                assert_relative_eq!(
                    odom.sample().twist.twist.angular,
                    Vector3::zeros(),
                    epsilon = 1e-9,
                );
            }
        }
    }

    #[test]
    fn yaw_rate_is_recovered_for_small_steps() {
        let rate = 0.5;
        let dt = 0.01;
        let mut odom = NoisyOdometry::noiseless(config(OdomSource::Encoder));
        odom.update(&Isometry3::identity(), 0.0);
        for step in 1..=10 {
            let t = step as f64 * dt;
            odom.update(&pose(0.0, 0.0, 0.0, rate * t), t);
        }
        assert_relative_eq!(
            odom.sample().twist.twist.angular,
            Vector3::new(0.0, 0.0, rate),
            epsilon = 1e-9,
        );
    }

    #[test]
    fn non_positive_time_steps_leave_everything_untouched() {
        let mut odom = NoisyOdometry::from_seed(
            OdometryConfig {
                with_noise: true,
                position_noise: GaussianNoise::new(0.0, 0.01),
                rotation_noise: GaussianNoise::new(0.0, 0.001),
                ..config(OdomSource::Encoder)
            },
            9,
        )
        .unwrap();
        odom.update(&Isometry3::identity(), 0.0);
        odom.update(&pose(1.0, 0.0, 0.0, 0.1), 1.0);

        let before_sample = odom.sample().clone();
        let before_state = state(&odom);

        odom.update(&pose(5.0, 5.0, 0.0, 1.0), 1.0);
        odom.update(&pose(5.0, 5.0, 0.0, 1.0), 1.0 + 1e-10);
        odom.update(&pose(5.0, 5.0, 0.0, 1.0), 0.5);

        assert_eq!(odom.sample(), &before_sample);
        assert_eq!(state(&odom), before_state);
        assert_eq!(odom.last_update_time(), Some(1.0));
    }

    #[test]
    fn position_noise_accumulates_as_a_random_walk() {
        let mut odom = NoisyOdometry::new(
            OdometryConfig {
                with_noise: true,
                ..config(OdomSource::Encoder)
            },
            ScriptedNoise::boxed(&[0.1]),
            ScriptedNoise::boxed(&[0.0]),
        );
        odom.update(&Isometry3::identity(), 0.0);
        for step in 1..=5 {
            odom.update(&Isometry3::identity(), step as f64);
        }

        // A stationary body, yet each tick adds another 0.1 on x and y. z stays clean.
        assert_relative_eq!(
            odom.odom_transform().translation.vector,
            Vector3::new(0.5, 0.5, 0.0),
            epsilon = 1e-12,
        );
        assert_relative_eq!(
            odom.sample().twist.twist.linear,
            Vector3::new(0.1, 0.1, 0.0),
            epsilon = 1e-12,
        );
        assert_eq!(state(&odom).previous_true_transform, Isometry3::identity());
    }

    #[test]
    fn rotation_noise_only_touches_yaw_and_accumulates() {
        let mut odom = NoisyOdometry::new(
            OdometryConfig {
                with_noise: true,
                ..config(OdomSource::Encoder)
            },
            ScriptedNoise::boxed(&[0.0]),
            ScriptedNoise::boxed(&[0.02]),
        );
        odom.update(&Isometry3::identity(), 0.0);
        for step in 1..=4 {
            odom.update(&Isometry3::identity(), step as f64);
        }

        let (roll, pitch, yaw) = odom.odom_transform().rotation.euler_angles();
        assert_relative_eq!(roll, 0.0, epsilon = 1e-12);
        assert_relative_eq!(pitch, 0.0, epsilon = 1e-12);
        assert_relative_eq!(yaw, 0.08, epsilon = 1e-12);
        assert_relative_eq!(
            odom.sample().twist.twist.angular,
            Vector3::new(0.0, 0.0, 0.02),
            epsilon = 1e-12,
        );
    }

    #[test]
    fn orientation_stays_unit_norm_under_noise() {
        let mut odom = NoisyOdometry::from_seed(
            OdometryConfig {
                with_noise: true,
                position_noise: GaussianNoise::new(0.0, 1e-4),
                rotation_noise: GaussianNoise::new(0.001, 1e-3),
                ..config(OdomSource::Encoder)
            },
            1234,
        )
        .unwrap();

        for step in 0..2_000 {
            let t = step as f64 * 0.005;
            let truth = Isometry3::from_parts(
                Translation3::new(t.sin(), t.cos(), 0.0),
                UnitQuaternion::from_euler_angles(0.01 * t, -0.02 * t, 3.0 * t),
            );
            odom.update(&truth, t);
            let norm = odom.odom_transform().rotation.into_inner().norm();
            assert!((norm - 1.0).abs() < 1e-12, "norm drifted to {norm} at step {step}");
        }
    }

    #[test]
    fn covariance_is_fixed_for_every_sample() {
        let expected =
            nalgebra::Matrix6::from_diagonal(&Vector6::from_column_slice(&ODOM_COVARIANCE_DIAGONAL));
        let mut odom = NoisyOdometry::from_seed(
            OdometryConfig {
                with_noise: true,
                position_noise: GaussianNoise::new(0.3, 2.0),
                rotation_noise: GaussianNoise::new(0.0, 0.5),
                ..config(OdomSource::World)
            },
            5,
        )
        .unwrap();

        for step in 0..20 {
            let t = step as f64;
            odom.update(&pose(t * t, -t, 0.0, t), t);
            assert_eq!(odom.sample().pose.covariance, expected);
            assert_eq!(odom.sample().twist.covariance, expected);
        }
    }

    #[test]
    fn seeded_estimators_are_reproducible() {
        let cfg = OdometryConfig {
            with_noise: true,
            position_noise: GaussianNoise::new(0.0, 0.01),
            rotation_noise: GaussianNoise::new(0.0, 0.01),
            ..config(OdomSource::Encoder)
        };
        let mut a = NoisyOdometry::from_seed(cfg.clone(), 77).unwrap();
        let mut b = NoisyOdometry::from_seed(cfg, 77).unwrap();
        for step in 0..100 {
            let t = step as f64 * 0.1;
            let truth = pose(t, 0.0, 0.0, 0.0);
            a.update(&truth, t);
            b.update(&truth, t);
        }
        assert_eq!(a.sample(), b.sample());
    }

    #[test]
    fn invalid_noise_is_reported_at_construction() {
        let result = NoisyOdometry::from_seed(
            OdometryConfig {
                rotation_noise: GaussianNoise::new(0.0, -0.5),
                ..Default::default()
            },
            0,
        );
        assert!(matches!(result, Err(OdomError::InvalidNoise { .. })));
    }

    #[test]
    fn reinitialising_resets_the_frame_and_accumulated_error() {
        let mut odom = NoisyOdometry::new(
            OdometryConfig {
                with_noise: true,
                ..config(OdomSource::Encoder)
            },
            ScriptedNoise::boxed(&[0.2]),
            ScriptedNoise::boxed(&[0.0]),
        );
        odom.update(&Isometry3::identity(), 0.0);
        odom.update(&pose(1.0, 0.0, 0.0, 0.0), 1.0);
        assert!(odom.odom_transform().translation.vector.norm() > 1.0);

        let restart = pose(4.0, 4.0, 0.0, 0.0);
        odom.initialize(&restart, 2.0);

        let state = state(&odom);
        assert_eq!(state.initial_transform, restart);
        assert_eq!(state.previous_true_transform, state.previous_noisy_transform);
        assert_eq!(state.last_update_time, 2.0);
        assert_eq!(odom.odom_transform(), Isometry3::identity());
    }

    #[test]
    fn frame_ids_are_relabelled_everywhere() {
        let mut odom = NoisyOdometry::noiseless(OdometryConfig::default());
        odom.set_frame_ids("map", "robot_base");
        assert_eq!(odom.config().frame_id, "map");
        assert_eq!(odom.sample().header.frame_id, "map");
        assert_eq!(odom.sample().child_frame_id, "robot_base");

        // Labels survive initialisation.
        odom.update(&Isometry3::identity(), 0.0);
        assert_eq!(odom.sample().header.frame_id, "map");
        assert_eq!(odom.sample().child_frame_id, "robot_base");
    }

    #[test]
    fn pose_providers_feed_the_same_update() {
        let mut direct = NoisyOdometry::noiseless(config(OdomSource::Encoder));
        let mut provided = direct.clone();
        let truth = pose(0.5, 0.25, 0.0, 0.1);

        direct.update(&Isometry3::identity(), 0.0);
        direct.update(&truth, 0.5);
        provided.update_from(&Isometry3::<f64>::identity(), 0.0);
        provided.update_from(&truth, 0.5);

        assert_eq!(direct.sample(), provided.sample());
    }

    #[test]
    fn nan_ground_truth_propagates_into_the_pose() {
        let mut odom = NoisyOdometry::noiseless(config(OdomSource::World));
        odom.update(&Isometry3::identity(), 0.0);

        odom.update(&pose(f64::NAN, 1.0, 0.0, 0.0), 1.0);
        let published = odom.odom_transform();
        assert!(published.translation.x.is_nan());
        assert_eq!(odom.last_update_time(), Some(1.0));

        let nan_rotation =
            UnitQuaternion::new_unchecked(nalgebra::Quaternion::new(f64::NAN, 0.0, 0.0, 0.0));
        odom.update(
            &Isometry3::from_parts(Translation3::new(1.0, 0.0, 0.0), nan_rotation),
            2.0,
        );
        let published = odom.odom_transform();
        assert!(published.rotation.coords.iter().any(|c| c.is_nan()));
        assert!(odom.sample().twist.twist.angular.iter().any(|c| c.is_nan()));
    }

    #[test]
    fn nan_time_is_not_caught_by_the_time_step_guard() {
        let mut odom = NoisyOdometry::noiseless(config(OdomSource::Encoder));
        odom.update(&Isometry3::identity(), 0.0);

        odom.update(&pose(1.0, 0.0, 0.0, 0.0), f64::NAN);

        assert!(odom.last_update_time().is_some_and(f64::is_nan));
        assert!(odom.sample().header.stamp.is_nan());
        assert!(odom.sample().twist.twist.linear.iter().all(|c| c.is_nan()));
        // The pose itself does not depend on the time step.
        assert_relative_eq!(
            odom.odom_transform().translation.vector,
            Vector3::new(1.0, 0.0, 0.0),
            epsilon = 1e-12
        );

        // Every later step is measured from NaN, so it is never skipped either.
        odom.update(&pose(2.0, 0.0, 0.0, 0.0), 2.0);
        assert_eq!(odom.sample().header.stamp, 2.0);
        assert!(odom.sample().twist.twist.linear.iter().all(|c| c.is_nan()));
    }
}
