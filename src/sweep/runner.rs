//! Grid search over PSO coefficients.

use super::config::{SweepConfig, SweepPoint};
use crate::error::PsoError;
use crate::problem::ProblemData;
use crate::pso::{log_failure, Comparator, Listener, ProblemResults, PsoConfig, PsoRunner};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, instrument};

/// Best single trial of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepBest {
    /// Configuration the trial ran with, including its seed.
    pub config: PsoConfig,
    pub results: ProblemResults,
}

/// Summary of a completed sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    /// Grid points visited.
    pub points: usize,
    /// Runs performed.
    pub trials: usize,
    /// Best trial under the problem's objective direction.
    pub best: Option<SweepBest>,
}

/// Executes the coefficient sweep.
pub struct SweepRunner;

impl SweepRunner {
    /// Runs every grid point of `sweep` for `sweep.trials_per_point` trials.
    ///
    /// Each trial runs on its own snapshot of `base` with the point's
    /// coefficients and a fresh seed; `base` itself is never modified. Before
    /// a trial the listener receives `handle_algorithm`, after it
    /// `handle_results`. Progress is logged after every grid point.
    ///
    /// With `sweep.parallel` (and the `parallel` feature) the trials of one
    /// grid point run concurrently: their `handle_algorithm` calls are all
    /// made before the block and their `handle_results` calls after it, in
    /// trial order.
    ///
    /// # Errors
    ///
    /// Invalid `base` or `sweep` configuration. A failing trial stops the
    /// sweep; no partial report is returned.
    #[instrument(skip_all, fields(problem = problem.name()))]
    pub fn run<L: Listener + ?Sized>(
        problem: &ProblemData,
        base: &PsoConfig,
        sweep: &SweepConfig,
        listener: &L,
    ) -> Result<SweepReport, PsoError> {
        base.validate()?;
        sweep.validate()?;

        let comparator = Comparator::new(problem.objective_type());
        let mut seeder = match sweep.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        };

        let total = sweep.total_trials();
        let mut done = 0usize;
        let mut points = 0usize;
        let mut best: Option<SweepBest> = None;

        for point in sweep.points() {
            let configs: Vec<PsoConfig> = (0..sweep.trials_per_point)
                .map(|_| point.apply(base).with_seed(seeder.random()))
                .collect();

            let block = run_block(problem, &configs, listener, sweep.parallel)?;

            for (config, results) in configs.into_iter().zip(block) {
                let improved = match &best {
                    None => true,
                    Some(b) => comparator.prefers(results.fitness, b.results.fitness),
                };
                if improved {
                    best = Some(SweepBest { config, results });
                }
            }

            done += sweep.trials_per_point;
            points += 1;
            log_progress(&point, done, total, best.as_ref());
        }

        Ok(SweepReport {
            points,
            trials: done,
            best,
        })
    }
}

fn log_progress(point: &SweepPoint, done: usize, total: usize, best: Option<&SweepBest>) {
    info!(
        done,
        total,
        inertia = point.inertia,
        cognitive = point.cognitive,
        social = point.social,
        best = best.map(|b| b.results.fitness),
        "sweep progress"
    );
}

/// Runs the trials of one grid point.
fn run_block<L: Listener + ?Sized>(
    problem: &ProblemData,
    configs: &[PsoConfig],
    listener: &L,
    parallel: bool,
) -> Result<Vec<ProblemResults>, PsoError> {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            for config in configs {
                announce(problem, config, listener);
            }
            let block: Vec<ProblemResults> = configs
                .par_iter()
                .map(|config| PsoRunner::run_with_listener(problem, config, listener))
                .collect::<Result<_, _>>()?;
            for results in &block {
                log_failure("results", listener.handle_results(results));
            }
            return Ok(block);
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    let mut block = Vec::with_capacity(configs.len());
    for config in configs {
        announce(problem, config, listener);
        let results = PsoRunner::run_with_listener(problem, config, listener)?;
        log_failure("results", listener.handle_results(&results));
        block.push(results);
    }
    Ok(block)
}

fn announce<L: Listener + ?Sized>(problem: &ProblemData, config: &PsoConfig, listener: &L) {
    log_failure(
        "algorithm",
        listener.handle_algorithm(
            config,
            problem.name(),
            problem.problem_type(),
            problem.objective_type(),
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ListenerError;
    use crate::problem::{ObjectiveType, ProblemType};
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn problem(objective: ObjectiveType) -> ProblemData {
        let costs = vec![
            vec![0.0, 2.0, 6.0, 9.0],
            vec![2.0, 0.0, 4.0, 7.0],
            vec![6.0, 4.0, 0.0, 3.0],
            vec![9.0, 7.0, 3.0, 0.0],
        ];
        ProblemData::new("sweep", costs, 2, ProblemType::Median, objective).unwrap()
    }

    fn small_base() -> PsoConfig {
        PsoConfig::default()
            .with_swarm_size(3)
            .with_max_iterations(2)
    }

    /// Key for a coefficient triple; grid values are exact literals.
    fn key(config: &PsoConfig) -> (u64, u64, u64) {
        (
            config.inertia.to_bits(),
            config.cognitive.to_bits(),
            config.social.to_bits(),
        )
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<&'static str>>,
        configs: Mutex<Vec<PsoConfig>>,
        fitnesses: Mutex<Vec<f64>>,
    }

    impl Listener for Recorder {
        fn handle_algorithm(
            &self,
            config: &PsoConfig,
            problem_name: &str,
            _problem_type: ProblemType,
            _objective_type: ObjectiveType,
        ) -> Result<(), ListenerError> {
            assert_eq!(problem_name, "sweep");
            self.events.lock().unwrap().push("algorithm");
            self.configs.lock().unwrap().push(config.clone());
            Ok(())
        }

        fn handle_results(&self, results: &ProblemResults) -> Result<(), ListenerError> {
            self.events.lock().unwrap().push("results");
            self.fitnesses.lock().unwrap().push(results.fitness);
            Ok(())
        }
    }

    struct BrokenListener;

    impl Listener for BrokenListener {
        fn handle_algorithm(
            &self,
            _config: &PsoConfig,
            _problem_name: &str,
            _problem_type: ProblemType,
            _objective_type: ObjectiveType,
        ) -> Result<(), ListenerError> {
            Err(ListenerError::new("closed"))
        }

        fn handle_results(&self, _results: &ProblemResults) -> Result<(), ListenerError> {
            Err(ListenerError::new("closed"))
        }
    }

    #[test]
    fn test_full_sweep_coverage() {
        let problem = problem(ObjectiveType::Minimize);
        let recorder = Recorder::default();
        let sweep = SweepConfig::default().with_seed(1);

        let report = SweepRunner::run(&problem, &small_base(), &sweep, &recorder).unwrap();

        assert_eq!(report.points, 125);
        assert_eq!(report.trials, 1250);

        let configs = recorder.configs.lock().unwrap();
        assert_eq!(configs.len(), 1250);
        assert_eq!(recorder.fitnesses.lock().unwrap().len(), 1250);

        let mut per_point: HashMap<(u64, u64, u64), usize> = HashMap::new();
        for config in configs.iter() {
            *per_point.entry(key(config)).or_default() += 1;
        }
        assert_eq!(per_point.len(), 125);
        assert!(per_point.values().all(|&n| n == 10));

        // each point's 10 trials are consecutive
        for block in configs.chunks(10) {
            assert!(block.iter().all(|c| key(c) == key(&block[0])));
        }
    }

    #[test]
    fn test_algorithm_precedes_results() {
        let problem = problem(ObjectiveType::Minimize);
        let recorder = Recorder::default();
        let sweep = SweepConfig::default()
            .with_values(vec![0.1, 0.9])
            .with_trials_per_point(3)
            .with_seed(2);

        SweepRunner::run(&problem, &small_base(), &sweep, &recorder).unwrap();

        let events = recorder.events.lock().unwrap();
        assert_eq!(events.len(), 2 * 8 * 3);
        for pair in events.chunks(2) {
            assert_eq!(pair, ["algorithm", "results"]);
        }
    }

    #[test]
    fn test_trials_get_distinct_seeds_and_base_untouched() {
        let problem = problem(ObjectiveType::Minimize);
        let recorder = Recorder::default();
        let base = small_base();
        let sweep = SweepConfig::default()
            .with_values(vec![0.5])
            .with_trials_per_point(10)
            .with_seed(3);

        SweepRunner::run(&problem, &base, &sweep, &recorder).unwrap();

        let configs = recorder.configs.lock().unwrap();
        let mut seeds: Vec<u64> = configs.iter().filter_map(|c| c.seed).collect();
        assert_eq!(seeds.len(), 10);
        seeds.sort_unstable();
        seeds.dedup();
        assert_eq!(seeds.len(), 10);
        assert_eq!(base, small_base());
    }

    #[test]
    fn test_seeded_sweep_is_reproducible() {
        let problem = problem(ObjectiveType::Maximize);
        let sweep = SweepConfig::default()
            .with_values(vec![0.3, 0.7])
            .with_trials_per_point(2)
            .with_seed(11);
        let a = SweepRunner::run(&problem, &small_base(), &sweep, &Recorder::default()).unwrap();
        let b = SweepRunner::run(&problem, &small_base(), &sweep, &Recorder::default()).unwrap();
        let (a, b) = (a.best.unwrap(), b.best.unwrap());
        assert_eq!(a.config, b.config);
        assert_eq!(a.results.position, b.results.position);
    }

    #[test]
    fn test_best_follows_objective() {
        for objective in [ObjectiveType::Minimize, ObjectiveType::Maximize] {
            let problem = problem(objective);
            let recorder = Recorder::default();
            let sweep = SweepConfig::default()
                .with_values(vec![0.1, 0.5])
                .with_trials_per_point(4)
                .with_seed(5);

            let report = SweepRunner::run(&problem, &small_base(), &sweep, &recorder).unwrap();
            let best = report.best.unwrap();

            let cmp = Comparator::new(objective);
            for &f in recorder.fitnesses.lock().unwrap().iter() {
                assert!(!cmp.prefers(f, best.results.fitness));
            }
        }
    }

    #[test]
    fn test_listener_failures_do_not_stop_sweep() {
        let problem = problem(ObjectiveType::Minimize);
        let sweep = SweepConfig::default()
            .with_values(vec![0.1, 0.9])
            .with_trials_per_point(2)
            .with_seed(6);
        let report = SweepRunner::run(&problem, &small_base(), &sweep, &BrokenListener).unwrap();
        assert_eq!(report.trials, 16);
    }

    #[test]
    fn test_invalid_base_config_rejected() {
        let problem = problem(ObjectiveType::Minimize);
        let base = small_base().with_swarm_size(0);
        let err = SweepRunner::run(&problem, &base, &SweepConfig::default(), &BrokenListener);
        assert!(matches!(err, Err(PsoError::InvalidConfig(_))));
    }

    #[test]
    fn test_parallel_sweep_reports_every_trial() {
        let problem = problem(ObjectiveType::Minimize);
        let recorder = Recorder::default();
        let sweep = SweepConfig::default()
            .with_values(vec![0.1, 0.9])
            .with_trials_per_point(5)
            .with_seed(7)
            .with_parallel(true);

        let report = SweepRunner::run(&problem, &small_base(), &sweep, &recorder).unwrap();

        assert_eq!(report.trials, 40);
        assert_eq!(recorder.configs.lock().unwrap().len(), 40);
        assert_eq!(recorder.fitnesses.lock().unwrap().len(), 40);
    }
}
