//! # Pavement CLI Application
//!
//! Command-line front end for the AASHTO 1993 flexible pavement
//! calculator.
//!
//! ```text
//! pave_cli design --w18 5 --reliability 95 --mr 7500 --json
//! pave_cli design --input project.json --settings solver.json
//! pave_cli zr 97.5
//! pave_cli coefficients
//! pave_cli equations
//! ```
//!
//! Values resolve in order: command-line flags, then the input and settings
//! JSON files, then the built-in defaults.

mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use pave_core::calculations::{run_design, DesignInputs, PavementSection};
use pave_core::errors::{CalcError, CalcResult};
use pave_core::reliability::{ReliabilityPolicy, AASHTO_RELIABILITY};
use pave_core::settings::DesignSettings;
use pave_core::solver::SolverMethod;

#[derive(Parser, Debug)]
#[command(name = "pave_cli", version, about = "AASHTO 1993 flexible pavement design")]
struct Cli {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve for the required SN and check a pavement section
    Design(DesignArgs),
    /// Look up the standard normal deviate for a reliability level
    Zr {
        /// Reliability (%)
        reliability: f64,

        /// Treatment of levels between table rows
        #[arg(long, value_enum, default_value_t = PolicyArg::Interpolate)]
        policy: PolicyArg,
    },
    /// Print the typical layer coefficient table
    Coefficients,
    /// Print the design equations with references
    Equations,
}

#[derive(Args, Debug, Default)]
struct DesignArgs {
    /// Design traffic (millions of 18-kip ESALs)
    #[arg(long)]
    w18: Option<f64>,
    /// Reliability (%)
    #[arg(long)]
    reliability: Option<f64>,
    /// Overall standard deviation
    #[arg(long)]
    so: Option<f64>,
    /// Initial serviceability
    #[arg(long)]
    pi: Option<f64>,
    /// Terminal serviceability
    #[arg(long)]
    pt: Option<f64>,
    /// Subgrade resilient modulus (psi)
    #[arg(long)]
    mr: Option<f64>,

    /// Surface layer coefficient
    #[arg(long)]
    a1: Option<f64>,
    /// Surface thickness (in)
    #[arg(long)]
    d1: Option<f64>,
    /// Base layer coefficient
    #[arg(long)]
    a2: Option<f64>,
    /// Base thickness (in)
    #[arg(long)]
    d2: Option<f64>,
    /// Base drainage coefficient
    #[arg(long)]
    m2: Option<f64>,
    /// Subbase layer coefficient
    #[arg(long)]
    a3: Option<f64>,
    /// Subbase thickness (in)
    #[arg(long)]
    d3: Option<f64>,
    /// Subbase drainage coefficient
    #[arg(long)]
    m3: Option<f64>,

    /// JSON file with `inputs` and `section`
    #[arg(long)]
    input: Option<PathBuf>,
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Root-finding method
    #[arg(long, value_enum)]
    method: Option<MethodArg>,
    /// Relative convergence tolerance on W18
    #[arg(long)]
    tolerance: Option<f64>,
    /// Iteration cap
    #[arg(long)]
    max_iterations: Option<usize>,
    /// Treatment of reliability levels between table rows
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,
    /// Accept a best-effort SN when the iteration cap is hit
    #[arg(long)]
    best_effort: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum MethodArg {
    Bisection,
    Newton,
}

impl From<MethodArg> for SolverMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Bisection => SolverMethod::Bisection,
            MethodArg::Newton => SolverMethod::Newton,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum PolicyArg {
    Exact,
    Interpolate,
}

impl From<PolicyArg> for ReliabilityPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Exact => ReliabilityPolicy::ExactMatch,
            PolicyArg::Interpolate => ReliabilityPolicy::Interpolate,
        }
    }
}

/// Contents of a `--input` file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DesignFile {
    #[serde(default)]
    inputs: DesignInputs,
    #[serde(default)]
    section: PavementSection,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(command: Commands) -> CalcResult<()> {
    match command {
        Commands::Design(args) => design(&args),
        Commands::Zr { reliability, policy } => {
            let zr = AASHTO_RELIABILITY.resolve(reliability, policy.into())?;
            println!("ZR({}%) = {:.4}", reliability, zr);
            Ok(())
        }
        Commands::Coefficients => {
            report::print_coefficients();
            Ok(())
        }
        Commands::Equations => {
            report::print_equations();
            Ok(())
        }
    }
}

fn design(args: &DesignArgs) -> CalcResult<()> {
    let (inputs, section) = resolve_design(args)?;
    let settings = resolve_settings(args)?;
    log::debug!("Design inputs: {:?}", inputs);
    log::debug!("Settings: {:?}", settings);

    let report = run_design(&inputs, &section, &settings)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report::print_design(&report, &section);
    }
    Ok(())
}

fn resolve_design(args: &DesignArgs) -> CalcResult<(DesignInputs, PavementSection)> {
    let file = match &args.input {
        Some(path) => serde_json::from_str::<DesignFile>(&read_file(path)?)?,
        None => DesignFile::default(),
    };
    let mut inputs = file.inputs;
    let mut section = file.section;

    override_with(&mut inputs.w18_millions, args.w18);
    override_with(&mut inputs.reliability_pct, args.reliability);
    override_with(&mut inputs.standard_deviation, args.so);
    override_with(&mut inputs.initial_serviceability, args.pi);
    override_with(&mut inputs.terminal_serviceability, args.pt);
    override_with(&mut inputs.subgrade_modulus_psi, args.mr);

    override_with(&mut section.surface.coefficient, args.a1);
    override_with(&mut section.surface.thickness_in, args.d1);
    override_with(&mut section.base.coefficient, args.a2);
    override_with(&mut section.base.thickness_in, args.d2);
    override_with(&mut section.base.drainage_factor, args.m2);
    override_with(&mut section.subbase.coefficient, args.a3);
    override_with(&mut section.subbase.thickness_in, args.d3);
    override_with(&mut section.subbase.drainage_factor, args.m3);

    Ok((inputs, section))
}

fn resolve_settings(args: &DesignArgs) -> CalcResult<DesignSettings> {
    let mut settings = match &args.settings {
        Some(path) => DesignSettings::from_json(&read_file(path)?)?,
        None => DesignSettings::default(),
    };

    if let Some(method) = args.method {
        settings.solver = settings.solver.with_method(method.into());
    }
    if let Some(tolerance) = args.tolerance {
        settings.solver = settings.solver.with_tolerance(tolerance)?;
    }
    if let Some(max_iterations) = args.max_iterations {
        settings.solver = settings.solver.with_max_iterations(max_iterations)?;
    }
    if let Some(policy) = args.policy {
        settings.reliability_policy = policy.into();
    }
    if args.best_effort {
        settings.accept_best_effort = true;
    }

    Ok(settings)
}

fn override_with(field: &mut f64, value: Option<f64>) {
    if let Some(v) = value {
        *field = v;
    }
}

fn read_file(path: &Path) -> CalcResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_design_flags() {
        let cli = Cli::try_parse_from([
            "pave_cli", "-v", "design", "--w18", "10", "--method", "newton", "--policy", "exact", "--json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Design(args) => {
                assert_eq!(args.w18, Some(10.0));
                assert_eq!(args.method, Some(MethodArg::Newton));
                assert_eq!(args.policy, Some(PolicyArg::Exact));
                assert!(args.json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = DesignArgs {
            w18: Some(12.0),
            mr: Some(5000.0),
            d1: Some(6.0),
            m2: Some(0.8),
            ..DesignArgs::default()
        };
        let (inputs, section) = resolve_design(&args).unwrap();
        assert_eq!(inputs.w18_millions, 12.0);
        assert_eq!(inputs.subgrade_modulus_psi, 5000.0);
        assert_eq!(inputs.reliability_pct, 95.0);
        assert_eq!(section.surface.thickness_in, 6.0);
        assert_eq!(section.base.drainage_factor, 0.8);
        assert_eq!(section.subbase.thickness_in, 8.0);
    }

    #[test]
    fn test_settings_overrides() {
        let args = DesignArgs {
            method: Some(MethodArg::Newton),
            max_iterations: Some(25),
            policy: Some(PolicyArg::Exact),
            best_effort: true,
            ..DesignArgs::default()
        };
        let settings = resolve_settings(&args).unwrap();
        assert_eq!(settings.solver.method(), SolverMethod::Newton);
        assert_eq!(settings.solver.max_iterations(), 25);
        assert_eq!(settings.reliability_policy, ReliabilityPolicy::ExactMatch);
        assert!(settings.accept_best_effort);
    }

    #[test]
    fn test_invalid_tolerance_flag_rejected() {
        let args = DesignArgs {
            tolerance: Some(-1.0),
            ..DesignArgs::default()
        };
        let err = resolve_settings(&args).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_missing_input_file_is_file_error() {
        let args = DesignArgs {
            input: Some(PathBuf::from("/nonexistent/pave_cli_input.json")),
            ..DesignArgs::default()
        };
        let err = resolve_design(&args).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_design_file_sections_optional() {
        let file: DesignFile = serde_json::from_str(r#"{ "section": {
            "surface": { "coefficient": 0.44, "thickness_in": 5.0 },
            "base": { "coefficient": 0.14, "thickness_in": 8.0, "drainage_factor": 1.0 },
            "subbase": { "coefficient": 0.11, "thickness_in": 10.0 }
        } }"#)
        .unwrap();
        assert_eq!(file.inputs, DesignInputs::default());
        assert_eq!(file.section.surface.coefficient, 0.44);
        assert_eq!(file.section.subbase.drainage_factor, 1.0);
    }
}
