use std::error::Error;

use clap::{App, load_yaml};

use sweep_color::util::{
    init_logging, read_params, solve_instance, best_solution, run_stats, export_results
};


/** colors an instance using the greedy sweep over a schedule of vertex orders */
pub fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    // parse arguments
    let yaml = load_yaml!("greedy_sweep.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let params = read_params(&main_args)?;
    let inst_filename = params.instances.first().ok_or("no instance given")?;

    // solve it
    let (instance, best) = solve_instance(inst_filename, &params)?;
    println!(
        "greedy sweep took {:.3} seconds ({} attempts). Nb colors: {}",
        best.total_time(), best.nb_attempts(), best.nb_colors()
    );
    if let Some(attempt) = best.best() {
        println!("best order: {}", attempt.order);
    }

    // export results
    let stats = run_stats(inst_filename, &params.schedule, &best);
    export_results(
        &*instance,
        &best_solution(&best),
        &stats,
        main_args.value_of("perf"),
        main_args.value_of("solution"),
        params.check,
    )?;
    Ok(())
}
