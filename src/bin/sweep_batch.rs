use std::error::Error;
use std::fs;
use std::path::Path;

use clap::{App, load_yaml};
use tracing::error;

use sweep_color::util::{
    init_logging, read_params, solve_instance, best_solution, check_solution,
    report_line, detail_line, create_with_line, append_line, REPORT_HEADER
};


/** runs the greedy sweep schedule on every instance given and writes one report line per
instance. Instances that cannot be read are skipped. */
pub fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    // parse arguments
    let yaml = load_yaml!("sweep_batch.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let params = read_params(&main_args)?;
    let report_file = main_args.value_of("output").unwrap_or("results/res.csv");
    let details_file = main_args.value_of("details");
    if let Some(dir) = Path::new(report_file).parent() {
        if !dir.as_os_str().is_empty() { fs::create_dir_all(dir)?; }
    }
    create_with_line(report_file, REPORT_HEADER)?;

    let mut nb_failed = 0;
    for inst_filename in params.instances.iter() {
        let (instance, best) = match solve_instance(inst_filename, &params) {
            Ok(res) => res,
            Err(e) => {
                error!(instance = inst_filename.as_str(), error = %e, "instance skipped");
                nb_failed += 1;
                continue;
            }
        };
        if params.check && !check_solution(&*instance, &best_solution(&best)) {
            nb_failed += 1;
            continue;
        }
        let inst_name = Path::new(inst_filename).file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| inst_filename.clone());
        let line = report_line(&inst_name, &best);
        println!("{}", line);
        append_line(report_file, &line)?;
        if let Some(filename) = details_file {
            append_line(filename, &detail_line(&inst_name, &best))?;
        }
    }
    if nb_failed > 0 {
        return Err(format!("{} / {} instances failed", nb_failed, params.instances.len()).into());
    }
    Ok(())
}
