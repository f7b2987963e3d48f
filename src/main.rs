use std::{fs, process::ExitCode};

use clap::Parser;
use evalon::{
    config::{Config, DEFAULT_MAX_CALL_DEPTH},
    interpreter::{evaluator::core::Context, value::core::Value},
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// evalon runs JavaScript-subset programs with direct and indirect `eval`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat CONTENTS as a path to a script file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Print the completion value of the program when it is not `undefined`.
    #[arg(short, long)]
    print_result: bool,

    /// How many calls and evaluations may nest before a `RangeError`.
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// Log filter used when `RUST_LOG` is not set (e.g. `debug`,
    /// `evalon=trace`).
    #[arg(long, default_value = "warn")]
    log_level: String,

    contents: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .init();

    let script = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Failed to read the input file '{}': {e}", &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents
    };

    let config = Config { max_call_depth: args.max_call_depth,
                          print_result:   args.print_result, };
    debug!(?config, "starting");

    let mut context = Context::new(config);
    match context.run(&script) {
        Ok(value) => {
            if context.config().print_result && !matches!(value, Value::Undefined) {
                println!("{value}");
            }
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
