// algostep: step-through visualizer for data-structure and algorithm exercises

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use algostep::algorithms::Inputs;
use algostep::config::{self, Config, StepperConfig};
use algostep::engine::{Mode, Stepper};
use algostep::exercise::{practice, Catalog, Category, Exercise, RawInputs};
use algostep::ui::App;

#[derive(Parser)]
#[command(name = "algostep")]
#[command(about = "Step through classic data-structure and algorithm exercises")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to config.toml in the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file (the TUI logs to the platform data dir otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every exercise, grouped by category
    List,

    /// Open an exercise in the terminal UI
    Show {
        /// Exercise id (e.g. BUBBLE_SORT)
        id: String,

        #[command(flatten)]
        inputs: InputArgs,

        /// Initial auto-play speed multiplier
        #[arg(long)]
        speed: Option<f64>,
    },

    /// Run an exercise without delays and print its log, metrics and result
    Trace {
        /// Exercise id (e.g. BUBBLE_SORT)
        id: String,

        #[command(flatten)]
        inputs: InputArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Drive the run through single steps
        #[arg(long)]
        stepwise: bool,
    },

    /// Check an exercise against its practice cases
    Practice {
        /// Exercise id (e.g. KMP_PATTERN)
        id: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Comma-separated integers
    #[arg(long, allow_hyphen_values = true)]
    array: Option<String>,

    /// Element to insert
    #[arg(long, allow_hyphen_values = true)]
    element: Option<String>,

    /// Position (index for arrays, 1-indexed for lists)
    #[arg(long, allow_hyphen_values = true)]
    position: Option<String>,

    /// Search target
    #[arg(long, allow_hyphen_values = true)]
    target: Option<String>,

    /// Text to search in
    #[arg(long)]
    text: Option<String>,

    /// Pattern to search for
    #[arg(long)]
    pattern: Option<String>,

    /// Fill missing inputs from a preset (best, average, worst)
    #[arg(long)]
    preset: Option<String>,
}

impl InputArgs {
    fn parse_for(self, exercise: &Exercise) -> Result<Inputs> {
        let mut raw = RawInputs {
            array: self.array,
            element: self.element,
            position: self.position,
            target: self.target,
            text: self.text,
            pattern: self.pattern,
        };
        if let Some(preset) = &self.preset {
            raw.apply_preset(exercise, preset)?;
        }
        Ok(raw.parse(exercise)?)
    }
}

/// Where log output goes
enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
}

fn init_logging(target: LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_env("ALGOSTEP_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating log directory {}", parent.display()))?;
            }
            let file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
    }
    Ok(())
}

fn lookup(catalog: &Catalog, id: &str) -> Result<&'static Exercise> {
    match catalog.get(id) {
        Some(exercise) => Ok(exercise),
        None => bail!("unknown exercise '{}' (try `algostep list`)", id),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let tui_log = match (&cli.command, &cli.log_file) {
        (_, Some(path)) => Some(path.clone()),
        (Commands::Show { .. }, None) => config::data_dir().map(|dir| dir.join("algostep.log")),
        _ => None,
    };
    match &tui_log {
        Some(path) => init_logging(LogTarget::File(path))?,
        // The TUI owns the terminal, so without a log file it stays silent
        None if matches!(cli.command, Commands::Show { .. }) => {}
        None => init_logging(LogTarget::Stderr)?,
    }

    let config = config::load(cli.config.as_deref()).context("loading configuration")?;
    let catalog = Catalog::new();

    match cli.command {
        Commands::List => {
            list(&catalog);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Show { id, inputs, speed } => {
            let exercise = lookup(&catalog, &id)?;
            let inputs = inputs.parse_for(exercise)?;
            show(exercise, inputs, speed, &config)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Trace {
            id,
            inputs,
            json,
            stepwise,
        } => {
            let exercise = lookup(&catalog, &id)?;
            let inputs = inputs.parse_for(exercise)?;
            trace(exercise, inputs, json, stepwise, &config)
        }
        Commands::Practice { id, json } => {
            let exercise = lookup(&catalog, &id)?;
            practice_cases(exercise, json)
        }
    }
}

fn list(catalog: &Catalog) {
    for category in Category::ALL {
        println!("{}", category);
        for exercise in catalog.by_category(category) {
            println!(
                "  {:<18} {:<32} {}",
                exercise.id, exercise.title, exercise.difficulty
            );
        }
        println!();
    }
}

fn show(
    exercise: &'static Exercise,
    inputs: Inputs,
    speed: Option<f64>,
    config: &Config,
) -> Result<()> {
    let stepper = Stepper::new(
        exercise.binding(inputs),
        Some(exercise.visualizer()),
        config.stepper.clone(),
    );
    let speed = speed.unwrap_or(config.ui.default_speed);
    let mut app = App::new(
        stepper,
        exercise,
        speed,
        Duration::from_millis(config.ui.tick_ms),
    );

    tracing::info!(exercise = exercise.id, speed, "opening terminal ui");

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal ui failed")
}

fn trace(
    exercise: &'static Exercise,
    inputs: Inputs,
    json: bool,
    stepwise: bool,
    config: &Config,
) -> Result<ExitCode> {
    let instant = StepperConfig {
        history_limit_bytes: config.stepper.history_limit_bytes,
        ..StepperConfig::instant()
    };
    let mut stepper = Stepper::new(exercise.binding(inputs), Some(exercise.visualizer()), instant);

    let outcome = if stepwise {
        stepper.step()?;
        while stepper.settle() != Mode::Idle {
            stepper.step()?;
        }
        stepper.wait_idle()
    } else {
        Some(stepper.run())
    };
    let snapshot = stepper.snapshot();

    if json {
        let (result, error) = match &outcome {
            Some(Ok(output)) => (Some(serde_json::to_value(output)?), None),
            Some(Err(err)) => (None, Some(err.to_string())),
            None => (None, None),
        };
        let report = serde_json::json!({
            "exercise": exercise.id,
            "log": snapshot.log.get_output(),
            "metrics": snapshot.metrics,
            "steps": snapshot.recorded,
            "result": result,
            "error": error,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in snapshot.log.get_output() {
            println!("{}", line);
        }
        println!();
        println!(
            "Steps: {}  Comparisons: {}  Swaps: {}",
            snapshot.metrics.steps, snapshot.metrics.comparisons, snapshot.metrics.swaps
        );
        match &outcome {
            Some(Ok(output)) => println!("Result: {}", output),
            Some(Err(err)) => println!("Failed: {}", err),
            None => println!("Interrupted"),
        }
    }

    Ok(match outcome {
        Some(Ok(_)) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

fn practice_cases(exercise: &'static Exercise, json: bool) -> Result<ExitCode> {
    let reports = practice::run_all(exercise);
    if reports.is_empty() {
        bail!("no practice cases for {}", exercise.id);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for (i, report) in reports.iter().enumerate() {
            let verdict = if report.passed { "PASS" } else { "FAIL" };
            println!("Case {}: {}", i + 1, verdict);
            println!("  expected: {}", report.expected);
            match (&report.output, &report.error) {
                (Some(output), _) => println!("  got:      {}", output),
                (None, Some(error)) => println!("  error:    {}", error),
                (None, None) => {}
            }
        }
    }

    let failed = reports.iter().filter(|r| !r.passed).count();
    tracing::info!(exercise = exercise.id, failed, total = reports.len(), "practice finished");
    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
