//! The step-driven fingerprint generator.
use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::field::{Falloff, FlowField, Pole, PoleField};
use crate::noise::hash::{seed_for_stream, Stream};
use crate::noise::{GradientNoise, SeedSequence, SimplexNoise};
use crate::pen::Pen;
use crate::sampling::{uniform_in_box, RejectionGrid};
use crate::trace::walker::Walker;

/// Range of the derived potential frequency.
const FREQUENCY_RANGE: (f64, f64) = (2.0, 4.0);

/// Range of the derived vertical gradient.
const Y_GRADIENT_RANGE: (f64, f64) = (0.02, 0.07);

/// What a single step did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// A segment was drawn to `to`.
    Traced { to: DVec2 },
    /// The path was abandoned and the pen jumped to `at`.
    Restarted { at: DVec2, tries: usize },
    /// No free spot was found within the try budget. The run is complete.
    Exhausted,
}

impl StepOutcome {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, StepOutcome::Exhausted)
    }
}

/// Owns the potential, the flow field and the rejection grid of one run.
///
/// Drive it by calling [`FingerprintGenerator::step`] with the same walker
/// until it returns `false`.
#[derive(Debug)]
pub struct FingerprintGenerator {
    config: GeneratorConfig,
    sequence: SeedSequence,
    flow: FlowField,
    grid: RejectionGrid,
    restart_rng: StdRng,
    steps: usize,
    segments: usize,
    restarts: usize,
    exhausted: bool,
}

impl FingerprintGenerator {
    /// Validates `config` and derives the frequency and vertical gradient from its seed.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;

        let mut sequence = SeedSequence::new(config.seed);
        let frequency = sequence.range(FREQUENCY_RANGE.0, FREQUENCY_RANGE.1);
        let y_gradient = sequence.range(Y_GRADIENT_RANGE.0, Y_GRADIENT_RANGE.1);

        let potential = PoleField::new(
            SimplexNoise::new(config.seed),
            config.pole_distance_cutoff,
            frequency,
            y_gradient,
        );
        let flow = FlowField::new(
            potential,
            GradientNoise::new(config.seed),
            config.global_flow_strength,
            config.global_flow_scale,
            config.radius,
        );

        debug!(
            "Generator seed {}: frequency {:.4}, y gradient {:.4}, radius {}.",
            config.seed, frequency, y_gradient, config.radius
        );

        Ok(Self {
            grid: RejectionGrid::new(config.radius),
            restart_rng: StdRng::seed_from_u64(seed_for_stream(config.seed, Stream::Restarts)),
            config,
            sequence,
            flow,
            steps: 0,
            segments: 0,
            restarts: 0,
            exhausted: false,
        })
    }

    pub fn add_pole(&mut self, x: f64, y: f64, strength: f64, falloff: Falloff) {
        self.flow
            .potential_mut()
            .push(Pole::new(x, y, strength, falloff));
    }

    /// Like [`FingerprintGenerator::add_pole`], with the falloff given by name.
    pub fn add_pole_named(&mut self, x: f64, y: f64, strength: f64, falloff: &str) -> Result<()> {
        let falloff: Falloff = falloff.parse()?;
        self.add_pole(x, y, strength, falloff);
        Ok(())
    }

    /// Scatters `count` poles over the central fifth of the canvas.
    ///
    /// Each pole consumes three draws of the seed sequence: x, y, then strength.
    pub fn add_random_poles(
        &mut self,
        count: usize,
        min_strength: f64,
        max_strength: f64,
        falloff: Falloff,
    ) {
        let half = self.config.pole_half_extent();
        for _ in 0..count {
            let x = self.sequence.range(-half.x, half.x);
            let y = self.sequence.range(-half.y, half.y);
            let strength = self.sequence.range(min_strength, max_strength);
            self.add_pole(x, y, strength, falloff);
        }
        debug!(
            "Scattered {} {} poles, strengths {}..{}.",
            count, falloff, min_strength, max_strength
        );
    }

    /// Advances the walker by one step. Returns `false` once the run is complete.
    pub fn step<P: Pen>(&mut self, walker: &mut Walker<P>) -> bool {
        !self.step_outcome(walker).is_exhausted()
    }

    /// Advances the walker by one step and reports what happened.
    ///
    /// Once [`StepOutcome::Exhausted`] has been returned, every later call
    /// returns it again without touching the walker.
    pub fn step_outcome<P: Pen>(&mut self, walker: &mut Walker<P>) -> StepOutcome {
        if self.exhausted {
            return StepOutcome::Exhausted;
        }
        self.steps += 1;

        let from = walker.position();
        let delta = self.flow.direction(from);
        let dest = from + delta;

        if walker.traveled() < self.config.max_path_length && self.grid.insert(dest) {
            walker.advance(dest, delta.length());
            self.segments += 1;
            return StepOutcome::Traced { to: dest };
        }

        walker.reset_traveled();
        let half = self.config.restart_half_extent();
        for tries in 1..=self.config.max_tries {
            let candidate = uniform_in_box(half, &mut self.restart_rng);
            if self.grid.insert(candidate) {
                walker.relocate(candidate);
                self.restarts += 1;
                trace!(
                    "Restart {} at ({:.2}, {:.2}) after {} tries.",
                    self.restarts,
                    candidate.x,
                    candidate.y,
                    tries
                );
                return StepOutcome::Restarted {
                    at: candidate,
                    tries,
                };
            }
        }

        self.exhausted = true;
        info!(
            "Fingerprint complete after {} steps | segments: {}, restarts: {}, points: {}.",
            self.steps,
            self.segments,
            self.restarts,
            self.grid.len()
        );
        StepOutcome::Exhausted
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn frequency(&self) -> f64 {
        self.flow.potential().frequency()
    }

    pub fn y_gradient(&self) -> f64 {
        self.flow.potential().y_gradient()
    }

    pub fn poles(&self) -> &[Pole] {
        self.flow.potential().poles()
    }

    pub fn grid(&self) -> &RejectionGrid {
        &self.grid
    }

    /// Number of successful restarts so far.
    pub fn restarts(&self) -> usize {
        self.restarts
    }

    /// Number of steps taken, including the final exhausted one.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of segments drawn.
    pub fn segments(&self) -> usize {
        self.segments
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn flow_field_mut(&mut self) -> &mut FlowField {
        &mut self.flow
    }

    /// Value of the scalar potential at `(x, y)`.
    pub fn potential(&self, x: f64, y: f64) -> f64 {
        self.flow.potential().value(x, y)
    }

    /// File name stem describing this run, without extension.
    pub fn file_stem(&self) -> String {
        format!(
            "fingerprint_seed{}_poles{}_radius{:.2}",
            self.config.seed,
            self.poles().len(),
            self.config.radius
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::pen::{PenCommand, RecordingPen};

    fn small_config() -> GeneratorConfig {
        GeneratorConfig::new(DVec2::new(200.0, 200.0))
            .with_seed(11)
            .with_radius(4.0)
            .with_max_tries(50)
    }

    fn run(generator: &mut FingerprintGenerator, cap: usize) -> Walker<RecordingPen> {
        let mut walker = Walker::new(RecordingPen::new().with_max_segment(None));
        for _ in 0..cap {
            if !generator.step(&mut walker) {
                return walker;
            }
        }
        panic!("run did not finish within {cap} steps");
    }

    #[test]
    fn derived_fields_match_seed_sequence() {
        let generator = FingerprintGenerator::new(GeneratorConfig::default()).unwrap();
        assert_eq!(generator.frequency(), 3.5625457763671875);
        assert!((generator.y_gradient() - 0.047237081527709966).abs() < 1e-12);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = FingerprintGenerator::new(GeneratorConfig::default().with_radius(0.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn random_poles_follow_seed_sequence() {
        let config = GeneratorConfig::new(DVec2::new(1000.0, 500.0));
        let mut generator = FingerprintGenerator::new(config).unwrap();
        generator.add_random_poles(1, 0.0, 50.0, Falloff::Logistic);
        let pole = generator.poles()[0];
        assert!((pole.position.x - 181.025_314_331_054_69).abs() < 1e-9);
        assert!((pole.position.y - -11.918_830_871_582_04).abs() < 1e-9);
        assert_eq!(pole.falloff, Falloff::Logistic);
    }

    #[test]
    fn random_poles_stay_in_bounds() {
        let config = GeneratorConfig::new(DVec2::new(1000.0, 500.0)).with_seed(77);
        let mut generator = FingerprintGenerator::new(config).unwrap();
        generator.add_random_poles(200, 5.0, 50.0, Falloff::Quadratic);
        assert_eq!(generator.poles().len(), 200);
        for pole in generator.poles() {
            assert!(pole.position.x.abs() <= 200.0);
            assert!(pole.position.y.abs() <= 100.0);
            assert!((5.0..=50.0).contains(&pole.strength));
        }
    }

    #[test]
    fn named_poles_are_parsed() {
        let mut generator = FingerprintGenerator::new(GeneratorConfig::default()).unwrap();
        generator.add_pole_named(1.0, 2.0, 10.0, "Logistic").unwrap();
        assert_eq!(generator.poles()[0].falloff, Falloff::Logistic);

        let err = generator.add_pole_named(0.0, 0.0, 1.0, "cubic").unwrap_err();
        assert!(matches!(err, Error::UnknownFalloff { ref name } if name == "cubic"));
        assert_eq!(generator.poles().len(), 1);
    }

    #[test]
    fn file_stem_names_the_run() {
        let mut generator = FingerprintGenerator::new(GeneratorConfig::default()).unwrap();
        generator.add_random_poles(20, 0.0, 50.0, Falloff::Logistic);
        assert_eq!(generator.file_stem(), "fingerprint_seed3_poles20_radius1.60");
    }

    #[test]
    fn same_seed_draws_same_texture() {
        let mut a = FingerprintGenerator::new(small_config()).unwrap();
        let mut b = FingerprintGenerator::new(small_config()).unwrap();
        a.add_random_poles(5, 0.0, 50.0, Falloff::Logistic);
        b.add_random_poles(5, 0.0, 50.0, Falloff::Logistic);
        let walk_a = run(&mut a, 200_000);
        let walk_b = run(&mut b, 200_000);
        assert!(walk_a.pen().line_count() > 0);
        assert_eq!(walk_a.pen().commands(), walk_b.pen().commands());
        assert_eq!(a.restarts(), b.restarts());
    }

    #[test]
    fn different_seeds_draw_different_textures() {
        let mut a = FingerprintGenerator::new(small_config()).unwrap();
        let mut b = FingerprintGenerator::new(small_config().with_seed(12)).unwrap();
        let walk_a = run(&mut a, 200_000);
        let walk_b = run(&mut b, 200_000);
        assert_ne!(walk_a.pen().commands(), walk_b.pen().commands());
    }

    #[test]
    fn accepted_points_keep_their_distance() {
        let mut generator = FingerprintGenerator::new(small_config()).unwrap();
        generator.add_pole(0.0, 0.0, 30.0, Falloff::Logistic);
        run(&mut generator, 200_000);

        let points: Vec<DVec2> = generator.grid().points().collect();
        assert!(points.len() > 100);
        let r2 = 4.0 * 4.0;
        for (i, p) in points.iter().enumerate() {
            for q in &points[i + 1..] {
                assert!(p.distance_squared(*q) >= r2, "{p} too close to {q}");
            }
        }
    }

    #[test]
    fn segments_have_step_length() {
        let mut generator = FingerprintGenerator::new(small_config()).unwrap();
        let walker = run(&mut generator, 200_000);

        let mut last = DVec2::ZERO;
        for command in walker.pen().commands() {
            match *command {
                PenCommand::Line(p) => {
                    assert!((p.distance(last) - 0.99 * 4.0).abs() < 1e-9);
                    last = p;
                }
                PenCommand::Jump(p) => last = p,
            }
        }
        assert_eq!(walker.pen().line_count(), generator.segments());
    }

    #[test]
    fn paths_respect_max_length() {
        let config = small_config().with_max_path_length(20.0);
        let mut generator = FingerprintGenerator::new(config).unwrap();
        let mut walker = Walker::new(RecordingPen::new());
        while generator.step(&mut walker) {
            // Traveled is only checked before a step, so it may overshoot by one step.
            assert!(walker.traveled() < 20.0 + 0.99 * 4.0 + 1e-9);
        }
    }

    #[test]
    fn exhausted_generator_stays_exhausted() {
        let mut generator = FingerprintGenerator::new(small_config()).unwrap();
        let mut walker = run(&mut generator, 200_000);
        assert!(generator.is_exhausted());
        let commands = walker.pen().commands().len();
        assert_eq!(generator.step_outcome(&mut walker), StepOutcome::Exhausted);
        assert!(!generator.step(&mut walker));
        assert_eq!(walker.pen().commands().len(), commands);
    }

    #[test]
    fn default_scenario_traces_once_then_only_restarts() {
        // Steps are 0.99 * radius long, so once the walker stands on an
        // accepted point every destination conflicts with it.
        let mut generator = FingerprintGenerator::new(GeneratorConfig::default()).unwrap();
        let mut walker = Walker::new(RecordingPen::new());

        let StepOutcome::Traced { to } = generator.step_outcome(&mut walker) else {
            panic!("first call must trace from the origin");
        };
        assert!((to - DVec2::new(1.575_012_605_080_052_8, 0.168_497_162_702_955_67)).length() < 1e-9);

        let outcome = generator.step_outcome(&mut walker);
        let StepOutcome::Restarted { at, tries } = outcome else {
            panic!("second call must restart, got {outcome:?}");
        };
        assert_eq!(tries, 1);
        assert!((at - DVec2::new(-169.223_221_941_883_71, -166.776_100_900_343_12)).length() < 1e-9);
        assert_eq!(walker.traveled(), 0.0);

        let mut calls = 2usize;
        while generator.step(&mut walker) {
            calls += 1;
            assert!(calls < 100_000, "run did not terminate");
        }
        calls += 1;

        assert_eq!(calls, 37_047);
        assert_eq!(generator.steps(), 37_047);
        assert_eq!(generator.segments(), 1);
        assert_eq!(generator.restarts(), 37_045);
        assert_eq!(generator.grid().len(), 37_046);
        assert_eq!(walker.pen().line_count(), 1);
    }
}
