use chrono::NaiveDate;
use clap::Parser;
use datecompare::clock::FixedClock;
use datecompare::script::Runner;
use datecompare::{DateCompareError, PickerOptions, RangeController};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "datecompare",
    version,
    about = "Drive a date-range comparison picker from commands"
)]
struct Cli {
    /// Command script to execute
    file: Option<PathBuf>,

    /// Execute inline commands, separated by `;`
    #[arg(short = 'e', long = "eval")]
    eval: Option<String>,

    /// Picker options (TOML)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Pin "today" instead of reading the clock
    #[arg(long = "today")]
    today: Option<NaiveDate>,
}

fn build_runner(cli: &Cli) -> Result<Runner, DateCompareError> {
    let options = match &cli.config {
        Some(path) => PickerOptions::from_file(path)?,
        None => PickerOptions::default(),
    };
    let controller = match cli.today {
        Some(today) => RangeController::new(options, Box::new(FixedClock(today)))?,
        None => RangeController::from_options(options)?,
    };
    Ok(Runner::new(controller)?)
}

fn execute_code(runner: &mut Runner, code: &str) -> ExitCode {
    match runner.run(code) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn run_file(runner: &mut Runner, path: &Path) -> ExitCode {
    match runner.run_file(path) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(DateCompareError::Io(e)) => {
            eprintln!("Error reading {}: {e}", path.display());
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn run_repl(runner: &mut Runner) -> ExitCode {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("datecompare v{}", env!("CARGO_PKG_VERSION"));
    println!("Type picker commands. Press Ctrl-D to exit.");

    loop {
        print!("> ");
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        let read_result = stdin.lock().read_line(&mut line);

        match read_result {
            Ok(0) => break,
            Ok(_) => match runner.run_line(&line) {
                Ok(out) => {
                    for l in out {
                        println!("{l}");
                    }
                }
                Err(e) => eprintln!("{}", e.message),
            },
            Err(e) => {
                eprintln!("Read error: {e}");
                return ExitCode::from(1);
            }
        }
    }

    println!();
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut runner = match build_runner(&cli) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    if let Some(code) = &cli.eval {
        return execute_code(&mut runner, &code.replace(';', "\n"));
    }

    if let Some(path) = &cli.file {
        return run_file(&mut runner, path);
    }

    run_repl(&mut runner)
}
