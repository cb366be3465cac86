use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::color::{checker, CheckerResult, ColoringInstance};
use crate::search::greedy_sweep::{greedy_sweep, SweepColoring};
use crate::search::vertex_order::{order_vertices, UnknownVertexOrder, VertexOrder};


/// runs the given number of attempts with a vertex order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialStep {
    /// ordering strategy
    pub order: VertexOrder,
    /// number of attempts
    pub repetitions: usize,
}

/** sequence of steps run against an instance.
textual form: comma separated `order:repetitions` (repetitions defaults to 1, must be positive),
for instance `none,asc,desc,desc-shuffle:100`.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialSchedule {
    steps: Vec<TrialStep>,
}

impl Default for TrialSchedule {
    /// one attempt per deterministic order, then 100 desc-shuffle, 70 asc-shuffle, 100 shuffle
    fn default() -> Self {
        Self::new(vec![
            TrialStep { order: VertexOrder::Natural, repetitions: 1 },
            TrialStep { order: VertexOrder::Ascending, repetitions: 1 },
            TrialStep { order: VertexOrder::Descending, repetitions: 1 },
            TrialStep { order: VertexOrder::DescShuffle, repetitions: 100 },
            TrialStep { order: VertexOrder::AscShuffle, repetitions: 70 },
            TrialStep { order: VertexOrder::Shuffle, repetitions: 100 },
        ])
    }
}

impl TrialSchedule {
    /// schedule from a list of steps
    pub fn new(steps:Vec<TrialStep>) -> Self { Self { steps } }

    /// steps of the schedule
    pub fn steps(&self) -> &[TrialStep] { &self.steps }

    /// total number of attempts
    pub fn nb_attempts(&self) -> usize { self.steps.iter().map(|s| s.repetitions).sum() }
}

/// error returned when parsing a schedule
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// unknown strategy name
    #[error(transparent)]
    UnknownOrder(#[from] UnknownVertexOrder),
    /// repetition count that is not a positive integer
    #[error("invalid repetition count {0:?}")]
    InvalidRepetitions(String),
    /// empty step (for instance "asc,,desc")
    #[error("empty schedule step")]
    EmptyStep,
}

impl FromStr for TrialSchedule {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut steps = Vec::new();
        for token in s.split(',') {
            let token = token.trim();
            if token.is_empty() { return Err(ScheduleError::EmptyStep); }
            let (order, repetitions) = match token.find(':') {
                None => (token, 1),
                Some(i) => {
                    let count = token[i+1..].trim();
                    let repetitions = count.parse::<usize>().ok()
                        .filter(|r| *r > 0)
                        .ok_or_else(|| ScheduleError::InvalidRepetitions(count.to_string()))?;
                    (&token[..i], repetitions)
                }
            };
            steps.push(TrialStep { order: order.parse()?, repetitions });
        }
        Ok(Self::new(steps))
    }
}

impl fmt::Display for TrialSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let steps:Vec<String> = self.steps.iter()
            .map(|s| format!("{}:{}", s.order, s.repetitions))
            .collect();
        f.write_str(&steps.join(","))
    }
}


/// runs f and returns its result together with the elapsed time (in seconds)
pub fn timed<T, F:FnOnce() -> T>(f:F) -> (T, f64) {
    let t_start = Instant::now();
    let res = f();
    (res, t_start.elapsed().as_secs_f64())
}

/** one coloring attempt: resets the coloring, orders the vertices and runs the greedy sweep.
returns the time spent (ordering included).
*/
pub fn run_attempt<R:Rng + ?Sized>(
    inst:&dyn ColoringInstance,
    order:VertexOrder,
    rng:&mut R,
    coloring:&mut SweepColoring
) -> f64 {
    coloring.reset();
    let (_, time) = timed(|| {
        let permutation = order_vertices(inst, order, rng);
        greedy_sweep(inst, &permutation, coloring);
    });
    time
}


/// a finished coloring attempt
#[derive(Debug, Clone)]
pub struct Attempt {
    /// order used
    pub order: VertexOrder,
    /// coloring found
    pub coloring: SweepColoring,
    /// time spent (seconds)
    pub time: f64,
}

/** best result over all the attempts on an instance.
The number of colors starts at n+1 and only decreases.
*/
#[derive(Debug, Clone)]
pub struct BestOfRun {
    /// number of colors of the best attempt (n+1 before any attempt)
    nb_colors: usize,
    /// best attempt so far
    best: Option<Attempt>,
    /// sum of the attempt times
    total_time: f64,
    /// number of attempts recorded
    nb_attempts: usize,
    /// history[i]: best number of colors after attempt i
    history: Vec<usize>,
}

impl BestOfRun {
    /// empty accumulator for an instance of n vertices
    pub fn new(n:usize) -> Self {
        Self { nb_colors: n+1, best: None, total_time: 0., nb_attempts: 0, history: Vec::new() }
    }

    /** records an attempt. Returns true if it improves the best number of colors
    (the coloring is then copied). */
    pub fn record(&mut self, order:VertexOrder, coloring:&SweepColoring, time:f64) -> bool {
        self.total_time += time;
        self.nb_attempts += 1;
        let improved = coloring.nb_colors() < self.nb_colors;
        if improved {
            self.nb_colors = coloring.nb_colors();
            self.best = Some(Attempt { order, coloring: coloring.clone(), time });
        }
        self.history.push(self.nb_colors);
        improved
    }

    /// best number of colors
    pub fn nb_colors(&self) -> usize { self.nb_colors }

    /// best attempt (None if nothing was recorded)
    pub fn best(&self) -> Option<&Attempt> { self.best.as_ref() }

    /// total time of the attempts (seconds)
    pub fn total_time(&self) -> f64 { self.total_time }

    /// number of attempts
    pub fn nb_attempts(&self) -> usize { self.nb_attempts }

    /// best number of colors after each attempt
    pub fn history(&self) -> &[usize] { &self.history }
}


/** runs a schedule of coloring attempts on an instance and keeps the best one.
Each attempt gets its own random number generator, seeded from the runner generator:
two runners with the same seed find the same colorings, in sequential or parallel mode.
*/
#[derive(Debug)]
pub struct TrialRunner {
    /// instance object
    inst: Arc<dyn ColoringInstance>,
    /// steps to run
    schedule: TrialSchedule,
    /// generates the seed of each attempt
    rng: StdRng,
    /// if true, the attempts of a step run on the rayon thread pool
    parallel: bool,
}

impl TrialRunner {
    /// creates a sequential runner seeded from the system entropy
    pub fn new(inst:Arc<dyn ColoringInstance>, schedule:TrialSchedule) -> Self {
        Self { inst, schedule, rng: StdRng::from_entropy(), parallel: false }
    }

    /// uses a fixed seed (reproducible runs)
    pub fn with_seed(mut self, seed:u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// runs the attempts of each step in parallel
    pub fn with_parallel(mut self, parallel:bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// runs the whole schedule
    pub fn run(&mut self) -> BestOfRun {
        let inst:&dyn ColoringInstance = &*self.inst;
        let n = inst.nb_vertices();
        let rng = &mut self.rng;
        let mut res = BestOfRun::new(n);
        for step in self.schedule.steps() {
            debug!(order = %step.order, repetitions = step.repetitions, "running step");
            let seeds:Vec<u64> = (0..step.repetitions).map(|_| rng.gen()).collect();
            if self.parallel {
                let attempts:Vec<(SweepColoring, f64)> = seeds.par_iter().map(|seed| {
                    let mut coloring = SweepColoring::new(n);
                    let time = run_attempt(inst, step.order, &mut StdRng::seed_from_u64(*seed), &mut coloring);
                    (coloring, time)
                }).collect();
                for (coloring, time) in attempts.iter() {
                    record_attempt(inst, &mut res, step.order, coloring, *time);
                }
            } else {
                let mut coloring = SweepColoring::new(n);
                for seed in seeds {
                    let time = run_attempt(inst, step.order, &mut StdRng::seed_from_u64(seed), &mut coloring);
                    record_attempt(inst, &mut res, step.order, &coloring, time);
                }
            }
        }
        info!(
            nb_colors = res.nb_colors(),
            attempts = res.nb_attempts(),
            time = res.total_time(),
            "schedule finished"
        );
        res
    }
}

/// adds an attempt to the accumulator (and checks it in debug builds)
fn record_attempt(
    inst:&dyn ColoringInstance,
    res:&mut BestOfRun,
    order:VertexOrder,
    coloring:&SweepColoring,
    time:f64
) {
    debug_assert!(coloring.is_complete());
    debug_assert_eq!(
        checker(inst, &coloring.to_solution()),
        CheckerResult::Ok(coloring.nb_colors())
    );
    if res.record(order, coloring, time) {
        debug!(nb_colors = res.nb_colors(), order = %order, attempt = res.nb_attempts(), "new best coloring");
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::dimacs::read_from_file;
    use crate::test_utils::{complete, cycle, edgeless};

    fn small_schedule() -> TrialSchedule {
        "none,asc,desc,desc-shuffle:10,asc-shuffle:10,shuffle:10".parse().unwrap()
    }

    #[test]
    fn test_default_schedule() {
        let schedule = TrialSchedule::default();
        assert_eq!(schedule.nb_attempts(), 273);
        assert_eq!(
            schedule.to_string(),
            "none:1,asc:1,desc:1,desc-shuffle:100,asc-shuffle:70,shuffle:100"
        );
        assert_eq!(schedule.to_string().parse::<TrialSchedule>(), Ok(schedule));
    }

    #[test]
    fn test_parse_schedule() {
        let schedule:TrialSchedule = " desc , shuffle: 3".parse().unwrap();
        assert_eq!(schedule.steps(), &[
            TrialStep { order: VertexOrder::Descending, repetitions: 1 },
            TrialStep { order: VertexOrder::Shuffle, repetitions: 3 },
        ]);
        assert_eq!("asc,,desc".parse::<TrialSchedule>(), Err(ScheduleError::EmptyStep));
        assert_eq!(
            "asc:x".parse::<TrialSchedule>(),
            Err(ScheduleError::InvalidRepetitions("x".to_string()))
        );
        assert!(matches!("dsatur".parse::<TrialSchedule>(), Err(ScheduleError::UnknownOrder(_))));
    }

    #[test]
    fn test_zero_repetitions_rejected() {
        assert_eq!(
            "none:0".parse::<TrialSchedule>(),
            Err(ScheduleError::InvalidRepetitions("0".to_string()))
        );
        assert_eq!(
            "asc,shuffle:0".parse::<TrialSchedule>(),
            Err(ScheduleError::InvalidRepetitions("0".to_string()))
        );
        // every parsed schedule runs at least one attempt: the best count never exceeds n
        let schedule:TrialSchedule = "none:1".parse().unwrap();
        let res = TrialRunner::new(Arc::new(edgeless(3)), schedule).with_seed(1).run();
        assert_eq!(res.nb_colors(), 1);
        assert!(res.best().is_some());
    }

    #[test]
    fn test_best_of_run_is_monotone() {
        let inst = read_from_file("insts/instances-dimacs1/myciel3.col").unwrap();
        let mut runner = TrialRunner::new(Arc::new(inst), small_schedule());
        let res = runner.run();
        assert_eq!(res.nb_attempts(), 33);
        assert_eq!(res.history().len(), 33);
        assert!(res.history().windows(2).all(|w| w[1] <= w[0]));
        assert!(res.history().iter().all(|c| *c <= 11));
        assert_eq!(res.history().last(), Some(&res.nb_colors()));
        assert!(res.nb_colors() >= 4);
        let best = res.best().unwrap();
        assert_eq!(best.coloring.nb_colors(), res.nb_colors());
        assert!(res.total_time() >= best.time);
    }

    #[test]
    fn test_small_graphs() {
        let mut runner = TrialRunner::new(Arc::new(cycle(4)), small_schedule()).with_seed(1);
        let res = runner.run();
        assert_eq!(res.nb_colors(), 2);
        // the natural order comes first and already reaches 2 colors
        assert_eq!(res.best().unwrap().order, VertexOrder::Natural);
        assert_eq!(res.best().unwrap().coloring.colors(), &[1,2,1,2]);
        assert_eq!(TrialRunner::new(Arc::new(complete(3)), small_schedule()).run().nb_colors(), 3);
        assert_eq!(TrialRunner::new(Arc::new(edgeless(5)), small_schedule()).run().nb_colors(), 1);
    }

    #[test]
    fn test_empty_schedule() {
        let res = TrialRunner::new(Arc::new(cycle(4)), TrialSchedule::new(vec![])).run();
        assert_eq!(res.nb_colors(), 5);
        assert!(res.best().is_none());
        assert_eq!(res.nb_attempts(), 0);
    }

    #[test]
    fn test_seeded_runs_agree() {
        let inst:Arc<dyn ColoringInstance> = Arc::new(
            read_from_file("insts/instances-dimacs1/myciel3.col").unwrap()
        );
        let sequential = TrialRunner::new(inst.clone(), small_schedule()).with_seed(7).run();
        let again = TrialRunner::new(inst.clone(), small_schedule()).with_seed(7).run();
        let parallel = TrialRunner::new(inst, small_schedule()).with_seed(7).with_parallel(true).run();
        assert_eq!(sequential.history(), again.history());
        assert_eq!(sequential.history(), parallel.history());
        assert_eq!(
            sequential.best().unwrap().coloring,
            parallel.best().unwrap().coloring
        );
    }

    #[test]
    fn test_deterministic_orders_repeat() {
        let inst = read_from_file("insts/instances-dimacs1/myciel3.col").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        for order in [VertexOrder::Natural, VertexOrder::Ascending, VertexOrder::Descending].iter() {
            let mut first = SweepColoring::new(inst.nb_vertices());
            let mut second = SweepColoring::new(inst.nb_vertices());
            run_attempt(&inst, *order, &mut rng, &mut first);
            run_attempt(&inst, *order, &mut rng, &mut second);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_record() {
        let inst = cycle(4);
        let mut best = BestOfRun::new(4);
        assert_eq!(best.nb_colors(), 5);
        let mut coloring = SweepColoring::new(4);
        greedy_sweep(&inst, &[0,1,2,3], &mut coloring);
        assert!(best.record(VertexOrder::Natural, &coloring, 0.5));
        assert!(!best.record(VertexOrder::Shuffle, &coloring, 0.25));
        assert_eq!(best.nb_colors(), 2);
        assert_eq!(best.best().unwrap().order, VertexOrder::Natural);
        assert!((best.total_time() - 0.75).abs() < 1e-9);
    }
}
