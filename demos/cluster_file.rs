use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use env_logger::Env;
use gridload::{read_dataset, ClusterAlgorithm, Kmeans, ResultWriter};

fn run(path: &str, k: usize) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = read_dataset(File::open(path)?)?;
    log::info!(
        "{path}: {} points, {} dims",
        dataset.n_points(),
        dataset.n_dims()
    );

    let kmeans = Kmeans::new(k).with_seed(42);

    // Build with `--features cluster,snapshot` to also get one file pair per iteration.
    #[cfg(feature = "snapshot")]
    let clustering = {
        let mut snapshots = gridload::SnapshotWriter::new(".");
        kmeans.fit_with_observer(&dataset, &mut snapshots)?
    };
    #[cfg(not(feature = "snapshot"))]
    let clustering = kmeans.fit(&dataset)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    ResultWriter::new().write(&mut out, &dataset, &clustering)?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("usage: {} <points.txt> <n_clusters>", args[0]);
        return ExitCode::FAILURE;
    }
    let k = match args[2].parse::<usize>() {
        Ok(k) => k,
        Err(e) => {
            eprintln!("FATAL: invalid cluster count {:?}: {e}", args[2]);
            return ExitCode::FAILURE;
        }
    };

    match run(&args[1], k) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("FATAL: {e}");
            ExitCode::FAILURE
        }
    }
}
