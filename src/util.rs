use std::error::Error;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use clap::ArgMatches;
use serde_json::{json, Value};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::{
    color::{ColoringInstance, Solution, checker, CheckerResult},
    dimacs::read_from_file,
    error::InstanceError,
    search::trials::{BestOfRun, TrialRunner, TrialSchedule},
};

/// header of the report file
pub const REPORT_HEADER:&str = "Problem name;Number of colors;Time";

/** parameters shared by the executables */
#[derive(Debug, Clone)]
pub struct SolverParams {
    /// instance files
    pub instances: Vec<String>,
    /// schedule run on each instance
    pub schedule: TrialSchedule,
    /// seed of the runs (None: system entropy)
    pub seed: Option<u64>,
    /// run the attempts of a step in parallel
    pub parallel: bool,
    /// check the best coloring before exporting it
    pub check: bool,
}

/// installs the log subscriber (filter read from RUST_LOG, "info" by default)
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // a subscriber may already be installed (tests, embedding programs)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/** reads command line input (instances, schedule, seed, parallel, check)

# Errors
 - if the schedule or the seed cannot be parsed
*/
pub fn read_params(main_args:&ArgMatches) -> Result<SolverParams, Box<dyn Error>> {
    let instances:Vec<String> = main_args.values_of("instance")
        .map(|values| values.map(|s| s.to_string()).collect())
        .unwrap_or_default();
    let schedule = match main_args.value_of("schedule") {
        None => TrialSchedule::default(),
        Some(s) => s.parse::<TrialSchedule>()?,
    };
    let seed = match main_args.value_of("seed") {
        None => None,
        Some(s) => Some(s.parse::<u64>().map_err(|e| format!("unable to parse the seed {:?}: {}", s, e))?),
    };
    let params = SolverParams {
        instances,
        schedule,
        seed,
        parallel: main_args.is_present("parallel"),
        check: main_args.is_present("check"),
    };
    info!(
        schedule = %params.schedule,
        attempts = params.schedule.nb_attempts(),
        seed = ?params.seed,
        parallel = params.parallel,
        "parameters"
    );
    Ok(params)
}

/** reads an instance and runs the schedule on it */
pub fn solve_instance(
    inst_filename:&str,
    params:&SolverParams
) -> Result<(Arc<dyn ColoringInstance>, BestOfRun), InstanceError> {
    info!(instance = inst_filename, "reading instance");
    let instance:Arc<dyn ColoringInstance> = Arc::new(read_from_file(inst_filename)?);
    instance.display_statistics();
    let mut runner = TrialRunner::new(instance.clone(), params.schedule.clone())
        .with_parallel(params.parallel);
    if let Some(seed) = params.seed {
        runner = runner.with_seed(seed);
    }
    let best = runner.run();
    Ok((instance, best))
}

/// best solution found (partition form, 0-based vertex ids)
pub fn best_solution(best:&BestOfRun) -> Solution {
    best.best().map(|attempt| attempt.coloring.to_solution()).unwrap_or_default()
}

/// report line: `instance;nb_colors;total_time`
pub fn report_line(inst_name:&str, best:&BestOfRun) -> String {
    format!("{};{};{}", inst_name, best.nb_colors(), best.total_time())
}

/** detail line of the best attempt: `instance;nb_colors;time;[[..],..]` where the i-th list
holds the (1-based) vertices of color i */
pub fn detail_line(inst_name:&str, best:&BestOfRun) -> String {
    let time = best.best().map(|attempt| attempt.time).unwrap_or(0.);
    let classes:Vec<String> = best_solution(best).iter()
        .map(|class| {
            let vertices:Vec<String> = class.iter().map(|v| (v+1).to_string()).collect();
            format!("[{}]", vertices.join(","))
        })
        .collect();
    format!("{};{};{};[{}]", inst_name, best.nb_colors(), time, classes.join(","))
}

/** encodes a solution: one line per color, (1-based) vertices separated by spaces */
pub fn solution_to_string(solution:&[Vec<usize>]) -> String {
    let mut res = String::default();
    for e in solution {
        let vertices:Vec<String> = e.iter().map(|v| (v+1).to_string()).collect();
        res += vertices.join(" ").as_str();
        res += "\n";
    }
    res
}

/// statistics of a run (exported as JSON)
pub fn run_stats(inst_name:&str, schedule:&TrialSchedule, best:&BestOfRun) -> Value {
    json!({
        "inst_name": inst_name,
        "nb_colors": best.nb_colors(),
        "primal_list": best.history(),
        "time_searched": best.total_time(),
        "nb_attempts": best.nb_attempts(),
        "best_order": best.best().map(|attempt| attempt.order),
        "schedule": schedule.steps(),
    })
}

/// creates (truncates) a file and writes a first line in it
pub fn create_with_line<P:AsRef<Path>>(filename:P, line:&str) -> std::io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "{}", line)
}

/// appends a line to a file (created if needed)
pub fn append_line<P:AsRef<Path>>(filename:P, line:&str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(filename)?;
    writeln!(file, "{}", line)
}

/** checks the solution (if asked to) and logs the violation found.
returns false if the solution is invalid.
*/
pub fn check_solution(instance:&dyn ColoringInstance, solution:&[Vec<usize>]) -> bool {
    match checker(instance, solution) {
        CheckerResult::Ok(_) => true,
        res => {
            error!(reason = ?res, "invalid solution");
            false
        }
    }
}

/// exports search results to files
pub fn export_results(
    instance:&dyn ColoringInstance,
    solution:&[Vec<usize>],
    stats:&Value,
    perf_file:Option<&str>,
    sol_file:Option<&str>,
    check_result:bool,
) -> std::io::Result<()> {
    // export statistics
    if let Some(filename) = perf_file {
        std::fs::write(filename, serde_json::to_string(stats)?)?;
        info!(file = filename, "statistics exported");
    }
    // export solution
    if let Some(filename) = sol_file {
        if check_result {
            check_solution(instance, solution);
        }
        std::fs::write(filename, solution_to_string(solution))?;
        info!(file = filename, "solution exported");
    }
    Ok(())
}
