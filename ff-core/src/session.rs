//! Simulation session: the state owned by the frame loop.
//!
//! A `Session` ties the stages together and enforces the lifecycle. Each call
//! to `frame` runs them in a fixed order:
//!
//! ```text
//! playback → bounce → camera → object sync → overlay → render
//! ```
//!
//! so the pose is fully resolved before the camera and the surface read it.
//! Only the stage matching the current lifecycle writes the pose: playback
//! while `Playing`, the bounce integrator while `Bouncing`.

use std::collections::HashMap;

use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bounce::{BounceIntegrator, BounceOutcome, BounceParams, BounceState};
use crate::camera::{CameraAnimState, CameraDirector, CameraPose, CameraUpdate};
use crate::config::{check_altitude, check_playback_speed, SimulationConfig};
use crate::engine::{EngineRequest, EngineStatus, PhysicsEngine};
use crate::error::{SessionError, TrajectoryError};
use crate::lifecycle::{RunLifecycle, Status};
use crate::playback::{PlaybackDriver, PlaybackStep};
use crate::render::RenderSurface;
use crate::trajectory::Trajectory;
use crate::types::{Pose, Telemetry, Vec3};
use crate::vehicles::{VehicleKind, VehicleProfile};

/// Summary of one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// 1-based frame counter since the session was created
    pub frame: u64,
    pub previous: RunLifecycle,
    pub lifecycle: RunLifecycle,
    pub camera: CameraUpdate,
    /// Bounce state as seeded on the impact frame, before the integrator's
    /// first step. `None` on every other frame.
    pub impact: Option<BounceState>,
}

impl FrameReport {
    pub fn transitioned(&self) -> bool {
        self.previous != self.lifecycle
    }
}

pub struct Session<E: PhysicsEngine> {
    engine: E,
    config: SimulationConfig,
    profiles: HashMap<VehicleKind, VehicleProfile>,
    profile: VehicleProfile,

    lifecycle: RunLifecycle,
    status: Status,
    pose: Pose,
    telemetry: Telemetry,

    playback: Option<PlaybackDriver>,
    bounce: Option<BounceState>,
    integrator: BounceIntegrator,
    camera: CameraDirector,

    rng: StdRng,
    frame: u64,
}

impl<E: PhysicsEngine> Session<E> {
    /// Create an idle session seeded from the OS random source.
    pub fn new(engine: E, config: SimulationConfig) -> Result<Self, SessionError> {
        Self::with_rng(engine, config, StdRng::from_os_rng())
    }

    /// Create an idle session with a fixed seed for the tumble randomness.
    pub fn with_seed(engine: E, config: SimulationConfig, seed: u64) -> Result<Self, SessionError> {
        Self::with_rng(engine, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(engine: E, config: SimulationConfig, rng: StdRng) -> Result<Self, SessionError> {
        config.validate()?;

        let profiles: HashMap<VehicleKind, VehicleProfile> = VehicleKind::ALL
            .iter()
            .map(|kind| (*kind, kind.profile()))
            .collect();
        let profile = config.vehicle.profile();
        let pose = Pose::at_altitude(config.altitude_m);
        let camera = CameraDirector::new(&profile, &pose);

        let status = match engine.status() {
            EngineStatus::Loading => Status::Loading,
            EngineStatus::Ready => Status::Ready,
            EngineStatus::Failed(msg) => {
                error!("simulation engine failed to load: {}", msg);
                Status::Error(msg)
            }
        };

        Ok(Self {
            engine,
            config,
            profiles,
            profile,
            lifecycle: RunLifecycle::Idle,
            status,
            telemetry: idle_telemetry(&pose),
            pose,
            playback: None,
            bounce: None,
            integrator: BounceIntegrator::default(),
            camera,
            rng,
            frame: 0,
        })
    }

    /// Replace vehicle profiles (e.g. loaded from YAML). Resets the session.
    pub fn with_profiles<I>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = VehicleProfile>,
    {
        for profile in profiles {
            self.profiles.insert(profile.kind, profile);
        }
        self.profile = self.profile_for(self.config.vehicle);
        self.reset();
        self
    }

    pub fn with_bounce_params(mut self, params: BounceParams) -> Self {
        self.integrator = BounceIntegrator::new(params);
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn lifecycle(&self) -> RunLifecycle {
        self.lifecycle
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub fn camera(&self) -> CameraPose {
        self.camera.pose()
    }

    pub fn camera_animation(&self) -> Option<&CameraAnimState> {
        self.camera.animation()
    }

    pub fn bounce(&self) -> Option<&BounceState> {
        self.bounce.as_ref()
    }

    pub fn bounce_count(&self) -> u32 {
        self.bounce.map_or(0, |b| b.bounce_count)
    }

    pub fn playback(&self) -> Option<&PlaybackDriver> {
        self.playback.as_ref()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn profile(&self) -> &VehicleProfile {
        &self.profile
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// False once the engine has failed to load; the start control should be
    /// disabled.
    pub fn can_start(&self) -> bool {
        !matches!(self.engine.status(), EngineStatus::Failed(_))
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Run the engine and begin playback.
    ///
    /// Blocks for the duration of the engine run. If the engine is not ready
    /// nothing is changed and the caller may retry later.
    pub fn start(&mut self) -> Result<(), SessionError> {
        match self.engine.status() {
            EngineStatus::Loading => {
                warn!("start requested before the simulation engine finished loading");
                return Err(SessionError::EngineNotReady);
            }
            EngineStatus::Failed(msg) => return Err(SessionError::EngineUnavailable(msg)),
            EngineStatus::Ready => {}
        }
        self.config.validate()?;

        self.reset();
        self.status = Status::Running;

        let request = EngineRequest {
            vehicle: self.config.vehicle,
            altitude_m: self.config.altitude_m,
            initial_orientation: Vec3::ZERO,
            initial_angular_velocity: self.profile.initial_angular_velocity,
            initial_velocity: EngineRequest::RELEASE_VELOCITY,
            duration_s: self.config.duration_s,
            time_step_s: self.config.time_step_s,
        };
        info!(
            "running {} from {:.0} m for {:.0} s (dt {} s)",
            self.profile.display_name, request.altitude_m, request.duration_s, request.time_step_s
        );

        if let Err(err) = self.engine.run_simulation(&request) {
            return Err(self.fail_start(err.into()));
        }

        let trajectory = match self.collect_trajectory() {
            Ok(trajectory) => trajectory,
            Err(err) => return Err(self.fail_start(err.into())),
        };
        if trajectory.is_empty() {
            return Err(self.fail_start(SessionError::EmptyTrajectory));
        }
        info!("simulation complete: {} samples", trajectory.len());

        self.playback = Some(PlaybackDriver::new(trajectory, self.config.playback_speed));
        self.transition(RunLifecycle::Playing);
        self.status = Status::Playing;
        Ok(())
    }

    /// Return to `Idle`, discarding the run.
    pub fn reset(&mut self) {
        self.playback = None;
        self.bounce = None;
        self.pose = Pose::at_altitude(self.config.altitude_m);
        self.telemetry = idle_telemetry(&self.pose);
        self.camera.reset(&self.profile, &self.pose);
        self.transition(RunLifecycle::Idle);
        self.status = self.idle_status();
    }

    /// Switch vehicle. Discards any run in progress.
    pub fn set_vehicle(&mut self, kind: VehicleKind) {
        self.config.vehicle = kind;
        self.profile = self.profile_for(kind);
        self.reset();
    }

    /// Change the release altitude for the next run. While idle the object
    /// moves to the new altitude immediately.
    pub fn set_altitude(&mut self, altitude_m: f64) -> Result<(), SessionError> {
        check_altitude(altitude_m)?;
        self.config.altitude_m = altitude_m;
        if self.lifecycle == RunLifecycle::Idle {
            self.pose.position.y = altitude_m;
            self.telemetry = idle_telemetry(&self.pose);
        }
        Ok(())
    }

    /// Change the playback speed for the next run.
    pub fn set_playback_speed(&mut self, speed: u32) -> Result<(), SessionError> {
        check_playback_speed(speed)?;
        self.config.playback_speed = speed;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Frame loop
    // -------------------------------------------------------------------------

    /// Advance one rendered frame and push the result into `surface`.
    ///
    /// Never fails: errors are logged and shown in the status line while the
    /// last valid pose keeps rendering.
    pub fn frame<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> FrameReport {
        self.frame += 1;
        let previous = self.lifecycle;

        self.poll_engine();
        let impact = self.step_playback();
        self.step_bounce();
        let camera = self.camera.update(self.lifecycle, &self.pose);

        self.telemetry.altitude = self.pose.position.y.max(0.0);
        surface.set_object_transform(&self.pose);
        surface.set_camera(&self.camera.pose());
        surface.refresh_overlay(&self.telemetry, &self.status);
        surface.render();

        FrameReport {
            frame: self.frame,
            previous,
            lifecycle: self.lifecycle,
            camera,
            impact,
        }
    }

    /// Returns the freshly seeded bounce state on the impact frame.
    fn step_playback(&mut self) -> Option<BounceState> {
        let driver = self.playback.as_mut()?;

        match driver.advance(self.lifecycle, &mut self.pose, &mut self.telemetry) {
            Ok(PlaybackStep::Inactive) | Ok(PlaybackStep::Advanced { .. }) => None,
            Ok(PlaybackStep::Exhausted) => {
                self.transition(RunLifecycle::Complete);
                self.status = Status::Complete;
                None
            }
            Ok(PlaybackStep::Impact(impact)) => {
                debug_assert!(self.bounce.is_none(), "bounce state created twice in one run");
                let seeded = BounceState::from_impact(
                    impact.linear_velocity,
                    &self.integrator.params,
                    &mut self.rng,
                );
                self.bounce = Some(seeded);
                self.camera.begin_transition(&self.pose);
                self.transition(RunLifecycle::Bouncing);
                self.status = Status::Impact;
                Some(seeded)
            }
            Err(err) => {
                error!("playback stopped: {}", err);
                self.status = Status::Error(err.to_string());
                self.transition(RunLifecycle::Complete);
                None
            }
        }
    }

    fn step_bounce(&mut self) {
        if self.lifecycle != RunLifecycle::Bouncing {
            return;
        }
        let Some(state) = self.bounce.as_mut() else {
            return;
        };

        let floor = self.profile.rest_height();
        if self.integrator.step(state, &mut self.pose, floor, &mut self.rng)
            == BounceOutcome::Settled
        {
            self.transition(RunLifecycle::Settled);
            self.status = Status::Settled;
        }
    }

    fn transition(&mut self, next: RunLifecycle) {
        debug_assert!(
            self.lifecycle.can_transition_to(next),
            "illegal transition {} -> {}",
            self.lifecycle,
            next
        );
        if self.lifecycle != next {
            info!("{} -> {}", self.lifecycle, next);
        }
        self.lifecycle = next;
    }

    /// Pick up an engine that finished loading since the last frame.
    fn poll_engine(&mut self) {
        if self.status == Status::Loading {
            self.status = self.idle_status();
            if self.status == Status::Ready {
                info!("simulation engine ready");
            }
        }
    }

    fn profile_for(&self, kind: VehicleKind) -> VehicleProfile {
        self.profiles
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| kind.profile())
    }

    fn idle_status(&self) -> Status {
        match self.engine.status() {
            EngineStatus::Loading => Status::Loading,
            EngineStatus::Ready => Status::Ready,
            EngineStatus::Failed(msg) => Status::Error(msg),
        }
    }

    fn collect_trajectory(&self) -> Result<Trajectory, TrajectoryError> {
        let len = self.engine.result_len();
        let samples = (0..len)
            .map(|index| {
                self.engine
                    .sample(index)
                    .ok_or(TrajectoryError::InvalidSampleIndex { index, len })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Trajectory::new(samples))
    }

    fn fail_start(&mut self, err: SessionError) -> SessionError {
        error!("start failed: {}", err);
        self.status = Status::Error(err.to_string());
        err
    }
}

fn idle_telemetry(pose: &Pose) -> Telemetry {
    Telemetry {
        altitude: pose.position.y.max(0.0),
        ..Telemetry::default()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineStatus;
    use crate::error::EngineError;
    use crate::render::NullSurface;
    use crate::trajectory::TrajectorySample;

    /// Engine that replays a fixed list of samples.
    struct ScriptedEngine {
        status: EngineStatus,
        samples: Vec<TrajectorySample>,
        loaded: Vec<TrajectorySample>,
        runs: usize,
        fail_with: Option<EngineError>,
    }

    impl ScriptedEngine {
        fn ready(samples: Vec<TrajectorySample>) -> Self {
            Self {
                status: EngineStatus::Ready,
                samples,
                loaded: Vec::new(),
                runs: 0,
                fail_with: None,
            }
        }
    }

    impl PhysicsEngine for ScriptedEngine {
        fn status(&self) -> EngineStatus {
            self.status.clone()
        }

        fn run_simulation(&mut self, _request: &EngineRequest) -> Result<(), EngineError> {
            self.runs += 1;
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            self.loaded = self.samples.clone();
            Ok(())
        }

        fn result_len(&self) -> usize {
            self.loaded.len()
        }

        fn sample(&self, index: usize) -> Option<TrajectorySample> {
            self.loaded.get(index).copied()
        }
    }

    /// Straight drop from `height`, `rate` meters per sample, 60 m/s.
    fn drop_samples(height: f64, rate: f64, n: usize) -> Vec<TrajectorySample> {
        (0..n)
            .map(|i| TrajectorySample {
                time_s: i as f64 * 0.01,
                position: Vec3::new(0.1 * i as f64, height - rate * i as f64, 0.0),
                roll: 0.01 * i as f64,
                pitch: 0.02 * i as f64,
                yaw: 0.03 * i as f64,
                speed: 60.0,
                mach: 0.18,
            })
            .collect()
    }

    fn session(samples: Vec<TrajectorySample>) -> Session<ScriptedEngine> {
        Session::with_seed(ScriptedEngine::ready(samples), SimulationConfig::default(), 3)
            .unwrap()
    }

    /// Run frames until a terminal state, recording every lifecycle seen.
    fn run_to_end<E: PhysicsEngine>(session: &mut Session<E>) -> Vec<RunLifecycle> {
        let mut seen = vec![session.lifecycle()];
        for _ in 0..20_000 {
            let report = session.frame(&mut NullSurface);
            if report.transitioned() {
                seen.push(report.lifecycle);
            }
            if report.lifecycle.is_terminal() {
                break;
            }
        }
        seen
    }

    #[test]
    fn test_start_before_engine_ready_changes_nothing() {
        let mut engine = ScriptedEngine::ready(drop_samples(100.0, 1.0, 200));
        engine.status = EngineStatus::Loading;
        let mut session = Session::with_seed(engine, SimulationConfig::default(), 1).unwrap();
        assert_eq!(session.status(), &Status::Loading);

        let err = session.start().unwrap_err();
        assert!(matches!(err, SessionError::EngineNotReady));
        assert_eq!(session.lifecycle(), RunLifecycle::Idle);
        assert_eq!(session.status(), &Status::Loading);
        assert_eq!(session.engine().runs, 0);
        assert!(session.can_start());

        // Engine finishes loading; the next frame notices and start succeeds
        session.engine_mut().status = EngineStatus::Ready;
        session.frame(&mut NullSurface);
        assert_eq!(session.status(), &Status::Ready);
        session.start().unwrap();
        assert_eq!(session.lifecycle(), RunLifecycle::Playing);
    }

    #[test]
    fn test_failed_engine_disables_start() {
        let mut engine = ScriptedEngine::ready(Vec::new());
        engine.status = EngineStatus::Failed("module missing".into());
        let mut session = Session::with_seed(engine, SimulationConfig::default(), 1).unwrap();

        assert!(!session.can_start());
        assert!(matches!(
            session.start(),
            Err(SessionError::EngineUnavailable(_))
        ));
        assert_eq!(session.lifecycle(), RunLifecycle::Idle);
    }

    #[test]
    fn test_engine_error_reports_status() {
        let mut engine = ScriptedEngine::ready(Vec::new());
        engine.fail_with = Some(EngineError::InvalidRequest("bad".into()));
        let mut session = Session::with_seed(engine, SimulationConfig::default(), 1).unwrap();

        assert!(matches!(session.start(), Err(SessionError::Engine(_))));
        assert_eq!(session.lifecycle(), RunLifecycle::Idle);
        assert!(matches!(session.status(), Status::Error(_)));
        assert!(session.playback().is_none());
    }

    #[test]
    fn test_empty_trajectory_rejected() {
        let mut session = session(Vec::new());
        assert!(matches!(session.start(), Err(SessionError::EmptyTrajectory)));
        assert_eq!(session.lifecycle(), RunLifecycle::Idle);
    }

    #[test]
    fn test_impact_then_bounce_then_settle() {
        let mut session = session(drop_samples(30.0, 1.0, 100));
        session.start().unwrap();

        let mut seen = vec![session.lifecycle()];
        let mut bounce_created = 0;
        let mut last_count = 0;
        for _ in 0..20_000 {
            let report = session.frame(&mut NullSurface);
            if let Some(seeded) = report.impact {
                bounce_created += 1;
                assert_eq!(seeded.bounce_count, 0, "count must start at 0");
                assert!(seeded.active);
                assert_eq!(report.previous, RunLifecycle::Playing);
                assert_eq!(report.lifecycle, RunLifecycle::Bouncing);
            }
            assert!(session.bounce_count() >= last_count);
            last_count = session.bounce_count();
            if report.transitioned() {
                seen.push(report.lifecycle);
            }
            if report.lifecycle.is_terminal() {
                break;
            }
        }

        assert_eq!(
            seen,
            vec![
                RunLifecycle::Playing,
                RunLifecycle::Bouncing,
                RunLifecycle::Settled
            ]
        );
        assert_eq!(bounce_created, 1);
        assert_eq!(session.status(), &Status::Settled);
        assert!(session.pose().position.y >= session.profile().rest_height());
        assert!(session.camera_animation().is_some());
    }

    #[test]
    fn test_impact_frame_starts_bounce_same_frame() {
        let mut session = session(drop_samples(2.0, 1.0, 10));
        session.start().unwrap();

        session.frame(&mut NullSurface); // y = 2
        session.frame(&mut NullSurface); // y = 1
        let report = session.frame(&mut NullSurface); // y = 0, impact
        assert_eq!(report.lifecycle, RunLifecycle::Bouncing);
        // Seeded with a count of 0; the first integrator step in the same
        // frame already rebounds off the floor
        assert_eq!(report.impact.map(|b| b.bounce_count), Some(0));
        assert_eq!(session.bounce_count(), 1);
        // v.y = -speed * 0.3
        let seeded = report.impact.unwrap();
        assert!((seeded.linear_velocity.y + 18.0).abs() < 1e-12);
        assert_eq!(session.playback().unwrap().cursor(), 2);
        assert!(matches!(report.camera, CameraUpdate::Transition { .. }));
        // The integrator already moved the object off the raw sample
        assert_eq!(session.pose().position.y, session.profile().rest_height());
    }

    #[test]
    fn test_complete_when_ground_never_reached() {
        let mut session = session(drop_samples(500.0, 1.0, 50));
        session.start().unwrap();

        let seen = run_to_end(&mut session);
        assert_eq!(seen, vec![RunLifecycle::Playing, RunLifecycle::Complete]);
        assert_eq!(session.status(), &Status::Complete);
        assert!(session.bounce().is_none());
        assert!(session.camera_animation().is_none());

        // Complete is terminal; the camera is left where it was
        let camera = session.camera();
        let report = session.frame(&mut NullSurface);
        assert_eq!(report.lifecycle, RunLifecycle::Complete);
        assert_eq!(report.camera, CameraUpdate::Unchanged);
        assert_eq!(session.camera(), camera);
    }

    #[test]
    fn test_settled_pose_is_frozen() {
        let mut session = session(drop_samples(30.0, 1.0, 100));
        session.start().unwrap();
        run_to_end(&mut session);
        assert_eq!(session.lifecycle(), RunLifecycle::Settled);

        let pose = *session.pose();
        let count = session.bounce_count();
        for _ in 0..30 {
            session.frame(&mut NullSurface);
        }
        assert_eq!(*session.pose(), pose);
        assert_eq!(session.bounce_count(), count);
    }

    #[test]
    fn test_reset_from_every_state() {
        let mut session = session(drop_samples(30.0, 1.0, 100));
        session.set_altitude(1200.0).unwrap();

        let expected = Pose::at_altitude(1200.0);
        let check = |session: &Session<ScriptedEngine>| {
            assert_eq!(session.lifecycle(), RunLifecycle::Idle);
            assert_eq!(*session.pose(), expected);
            assert_eq!(session.bounce_count(), 0);
            assert!(session.playback().is_none());
            assert!(session.camera_animation().is_none());
            assert_eq!(session.status(), &Status::Ready);
        };

        session.reset();
        check(&session);

        for stop_at in [
            RunLifecycle::Playing,
            RunLifecycle::Bouncing,
            RunLifecycle::Settled,
        ] {
            session.start().unwrap();
            for _ in 0..20_000 {
                if session.lifecycle() == stop_at {
                    break;
                }
                session.frame(&mut NullSurface);
            }
            assert_eq!(session.lifecycle(), stop_at);
            session.reset();
            check(&session);
        }
    }

    #[test]
    fn test_restart_allocates_fresh_run() {
        let mut session = session(drop_samples(30.0, 1.0, 100));
        session.start().unwrap();
        run_to_end(&mut session);
        assert!(session.bounce_count() > 0);

        session.start().unwrap();
        assert_eq!(session.lifecycle(), RunLifecycle::Playing);
        assert_eq!(session.bounce_count(), 0);
        assert!(session.bounce().is_none());
        assert_eq!(session.playback().unwrap().cursor(), 0);
        assert_eq!(session.engine().runs, 2);
    }

    #[test]
    fn test_playback_speed_is_fixed_for_the_run() {
        let mut session = session(drop_samples(500.0, 1.0, 100));
        session.start().unwrap();
        session.set_playback_speed(10).unwrap();
        session.frame(&mut NullSurface);
        assert_eq!(session.playback().unwrap().cursor(), 1);

        session.start().unwrap();
        session.frame(&mut NullSurface);
        assert_eq!(session.playback().unwrap().cursor(), 10);
    }

    #[test]
    fn test_config_setters_validate() {
        let mut session = session(Vec::new());
        assert!(matches!(
            session.set_altitude(10.0),
            Err(SessionError::InvalidConfig(_))
        ));
        assert!(matches!(
            session.set_playback_speed(0),
            Err(SessionError::InvalidConfig(_))
        ));
        assert_eq!(session.config().altitude_m, 9000.0);

        session.set_altitude(4000.0).unwrap();
        assert_eq!(session.pose().position.y, 4000.0);
        assert_eq!(session.telemetry().altitude, 4000.0);
    }

    #[test]
    fn test_altitude_change_mid_run_waits_for_next_run() {
        let mut session = session(drop_samples(500.0, 1.0, 100));
        session.start().unwrap();
        session.frame(&mut NullSurface);
        session.set_altitude(2000.0).unwrap();
        assert_eq!(session.pose().position.y, 500.0);
        session.reset();
        assert_eq!(session.pose().position.y, 2000.0);
    }

    #[test]
    fn test_set_vehicle_resets() {
        let mut session = session(drop_samples(500.0, 1.0, 100));
        session.start().unwrap();
        session.frame(&mut NullSurface);

        session.set_vehicle(VehicleKind::Blueberry);
        assert_eq!(session.lifecycle(), RunLifecycle::Idle);
        assert_eq!(session.profile().kind, VehicleKind::Blueberry);
        assert_eq!(session.config().vehicle, VehicleKind::Blueberry);
        // Blueberry chase distance is 0.1 m
        let camera = session.camera().position;
        assert!((camera.x + 0.1).abs() < 1e-12);
        assert!((camera.y - 9000.05).abs() < 1e-9);
    }

    #[test]
    fn test_custom_profile_changes_rest_height() {
        let mut tall = VehicleProfile::brick();
        tall.visual_size.y = 0.5;
        let mut session = session(drop_samples(30.0, 1.0, 100)).with_profiles([tall]);
        session.start().unwrap();
        run_to_end(&mut session);
        assert_eq!(session.lifecycle(), RunLifecycle::Settled);
        assert_eq!(session.pose().position.y, 0.25);
    }

    /// Surface recording what it was handed each frame.
    #[derive(Default)]
    struct RecordingSurface {
        poses: Vec<Pose>,
        cameras: Vec<CameraPose>,
        statuses: Vec<Status>,
        renders: usize,
    }

    impl RenderSurface for RecordingSurface {
        fn set_object_transform(&mut self, pose: &Pose) {
            self.poses.push(*pose);
        }

        fn set_camera(&mut self, camera: &CameraPose) {
            self.cameras.push(*camera);
        }

        fn refresh_overlay(&mut self, _telemetry: &Telemetry, status: &Status) {
            self.statuses.push(status.clone());
        }

        fn render(&mut self) {
            self.renders += 1;
        }
    }

    #[test]
    fn test_surface_sees_resolved_pose_every_frame() {
        let mut session = session(drop_samples(30.0, 1.0, 100));
        let mut surface = RecordingSurface::default();

        session.frame(&mut surface);
        session.start().unwrap();
        for _ in 0..40 {
            session.frame(&mut surface);
        }

        assert_eq!(surface.renders, 41);
        assert_eq!(surface.poses.len(), 41);
        // Idle frame: object at the configured altitude, chase camera above it
        assert_eq!(surface.poses[0], Pose::at_altitude(9000.0));
        assert_eq!(surface.cameras[0].look_at, surface.poses[0].position);
        // Every frame the camera looks at the pose handed to the surface
        for (pose, camera) in surface.poses.iter().zip(&surface.cameras) {
            assert_eq!(camera.look_at, pose.position);
        }
        assert!(surface.statuses.contains(&Status::Impact));
        assert_eq!(surface.poses[1].position.y, 30.0);
    }
}
