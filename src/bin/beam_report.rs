use std::path::PathBuf;
use std::process::ExitCode;

use beam_bending::config::BeamDefinition;
use beam_bending::export::{BeamReport, DiagramSamples};

struct Options {
    definition: PathBuf,
    csv: Option<PathBuf>,
    samples: Option<usize>,
}

fn usage() {
    eprintln!("usage: beam_report <definition.toml|definition.json> [--csv <path>] [--samples <n>]");
}

fn parse_args(args: &[String]) -> Option<Options> {
    let mut definition = None;
    let mut csv = None;
    let mut samples = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--csv" => csv = Some(PathBuf::from(iter.next()?)),
            "--samples" => samples = Some(iter.next()?.parse().ok()?),
            "-h" | "--help" => return None,
            other if definition.is_none() && !other.starts_with("--") => {
                definition = Some(PathBuf::from(other));
            }
            _ => return None,
        }
    }

    Some(Options {
        definition: definition?,
        csv,
        samples,
    })
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(options) = parse_args(&args) else {
        usage();
        return ExitCode::from(2);
    };

    let beam = match BeamDefinition::from_file(&options.definition).and_then(|d| d.to_beam()) {
        Ok(beam) => beam,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(1);
        }
    };

    let samples = match options.samples {
        Some(count) => DiagramSamples::from_beam(&beam, count),
        None => DiagramSamples::with_default_resolution(&beam),
    };
    print!("{}", BeamReport::new(&beam, &samples).summary());

    if let Some(path) = options.csv {
        if let Err(err) = samples.write_csv(&path) {
            eprintln!("error: failed to write {}: {err}", path.display());
            return ExitCode::from(1);
        }
        println!("\nDiagram samples written to {}", path.display());
    }

    ExitCode::SUCCESS
}
