use std::{fs, process, time::Duration};

use clap::Parser;
use pato::{CompileOptions, compile_with};

/// pato compiles form-describing programs into form definitions and React
/// components.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells pato to read the program from a file instead of the argument.
    #[arg(short, long)]
    file: bool,

    /// Prints the extracted forms as JSON instead of generated components.
    #[arg(short, long)]
    json: bool,

    /// Maximum number of loop iterations before evaluation is aborted.
    #[arg(long, value_name = "N")]
    max_iterations: Option<u64>,

    /// Wall-clock limit for evaluation, in milliseconds.
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    contents: String,
}

/// Installs a stderr subscriber when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)
                                                        .with_target(true)
                                                        .with_level(true))
                                      .with(EnvFilter::from_default_env())
                                      .init();
    }
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            process::exit(1);
        })
    } else {
        args.contents
    };

    let mut options = CompileOptions::default();
    if let Some(max_iterations) = args.max_iterations {
        options = options.with_max_iterations(max_iterations);
    }
    if let Some(timeout_ms) = args.timeout_ms {
        options = options.with_timeout(Duration::from_millis(timeout_ms));
    }

    let compilation = compile_with(&script, &options).unwrap_or_else(|e| {
        eprintln!("{}: {e}", e.kind());
        process::exit(1);
    });

    for line in &compilation.output {
        println!("{line}");
    }

    if args.json {
        match serde_json::to_string_pretty(&compilation.forms) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize the forms: {e}");
                process::exit(1);
            },
        }
    } else {
        for component in &compilation.generated {
            println!("{component}");
        }
    }
}
