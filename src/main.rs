//! motor-fuzzy CLI - predict DC motor speed from voltage and torque.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use motor_fuzzy::{presets, FuzzySystem, InferenceError, Inputs, Outputs, SystemConfig};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const EXAMPLE_CONFIG: &str = include_str!("../config/motor_triangular.toml");

#[derive(Parser)]
#[command(name = "motor-fuzzy")]
#[command(version)]
#[command(about = "Fuzzy logic DC motor speed prediction")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Fuzzy system description (TOML); overrides --preset
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Built-in system to use when no config file is given
    #[arg(short, long, global = true, value_enum, default_value_t = Preset::Triangular)]
    preset: Preset,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// Triangular terms, five diagonal rules
    Triangular,
    /// Gaussian terms, five diagonal rules
    Gaussian,
    /// Triangular terms, 25 rules with inverted torque direction
    Combinatorial,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict motor speed
    Predict {
        /// Voltage (V)
        #[arg(long)]
        voltage: f64,

        /// Torque (Nm)
        #[arg(long)]
        torque: f64,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run an inference with arbitrary named inputs
    Infer {
        /// Crisp input as name=value; repeatable
        #[arg(short, long = "input", value_parser = parse_input, required = true)]
        inputs: Vec<(String, f64)>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print sampled membership curves of a variable
    Curve {
        variable: String,

        /// Only this label
        label: Option<String>,
    },

    /// Validate a configuration file
    Validate,

    /// Show example configuration
    Example,
}

fn parse_input(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{s}'"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value for '{name}': {e}"))?;

    Ok((name.trim().to_owned(), value))
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")
}

fn load_system(cli: &Cli) -> Result<FuzzySystem> {
    if let Some(path) = &cli.config {
        return FuzzySystem::from_file(path).with_context(|| format!("Failed to load config from {path:?}"));
    }

    let system = match cli.preset {
        Preset::Triangular => presets::triangular(),
        Preset::Gaussian => presets::gaussian(),
        Preset::Combinatorial => presets::combinatorial(),
    };

    system.context("Failed to build preset")
}

/// User-facing message for a rejected inference call.
fn failure_message(err: &InferenceError) -> String {
    match err {
        InferenceError::OutOfDomain { variable, low, high, .. } => {
            format!("Input values should be between {low} and {high} (got an out of range value for '{variable}').")
        },
        InferenceError::MissingInput(_) => err.to_string(),
        InferenceError::NoRuleFired(_) => {
            "Crisp output cannot be calculated. Please check the input values and rules.".to_owned()
        },
    }
}

fn run(system: &FuzzySystem, inputs: &Inputs, json: bool) -> Result<()> {
    let outputs = match system.infer(inputs) {
        Ok(outputs) => outputs,
        Err(e) => bail!(failure_message(&e)),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outputs)?);
    } else {
        print_crisp(system, &outputs);
    }

    Ok(())
}

fn print_crisp(system: &FuzzySystem, outputs: &Outputs) {
    for var in system.variables() {
        if let Some(value) = outputs.crisp(&var.name) {
            println!("Calculated {} output: {:.2}", var.name, value);
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    match &cli.command {
        Commands::Example => {
            println!("{EXAMPLE_CONFIG}");
        },

        Commands::Validate => {
            let Some(path) = &cli.config else {
                bail!("validate requires --config");
            };
            let config =
                SystemConfig::from_file(path).with_context(|| format!("Failed to load config from {path:?}"))?;
            let n_rules = config.rules.len();
            let system = config.build().context("Invalid fuzzy system")?;

            info!("Configuration is valid");
            for var in system.variables() {
                info!(
                    "  {} ({}): [{}, {}] step {}, {} terms",
                    var.name,
                    var.role.as_str(),
                    var.universe.low,
                    var.universe.high,
                    var.universe.step,
                    var.terms.len()
                );
            }
            info!("  Rules: {n_rules}");
        },

        Commands::Predict { voltage, torque, json } => {
            let system = load_system(&cli)?;
            let inputs = Inputs::new()
                .with(presets::VOLTAGE, *voltage)
                .with(presets::TORQUE, *torque);

            run(&system, &inputs, *json)?;
        },

        Commands::Infer { inputs, json } => {
            let system = load_system(&cli)?;
            let inputs: Inputs = inputs.iter().cloned().collect();

            run(&system, &inputs, *json)?;
        },

        Commands::Curve { variable, label } => {
            let system = load_system(&cli)?;
            let Some(var) = system.variable(variable) else {
                bail!("Unknown variable '{variable}'");
            };

            let curves = match label {
                Some(label) => match var.sample(label) {
                    Some(curve) => vec![(label.as_str(), curve)],
                    None => bail!("Variable '{variable}' has no label '{label}'"),
                },
                None => var.sample_all(),
            };

            for (label, curve) in curves {
                println!("# {variable} is {label}");
                for (point, degree) in curve {
                    println!("{point}\t{degree:.6}");
                }
            }
        },
    }

    Ok(())
}
