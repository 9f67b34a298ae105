use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use fibro_calc::config::Config;
use fibro_calc::output::{self, OutputFormat};
use fibro_calc::scoring::{self, DiseaseId, Evaluation, Field, RawInputs, DEFAULT_AST_ULN};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INVALID_INPUT: i32 = 1;
const EXIT_INCOMPLETE: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Args, Debug)]
struct CalcArgs {
    /// Age in years
    #[arg(long, default_value = "")]
    age: String,

    /// AST in U/L
    #[arg(long, default_value = "")]
    ast: String,

    /// ALT in U/L
    #[arg(long, default_value = "")]
    alt: String,

    /// Platelet count per µL (e.g. 150000 or 150,000)
    #[arg(long, default_value = "")]
    platelet: String,

    /// AST upper limit of normal in U/L (defaults to config, then 35)
    #[arg(long)]
    ast_uln: Option<String>,

    /// Disease context: HCV, HBV or NAFLD
    #[arg(short, long)]
    disease: Option<DiseaseId>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate APRI and FIB-4 from lab values
    Calc(CalcArgs),
    /// Show interpretation tables for a disease
    Guide {
        /// Disease context: HCV, HBV or NAFLD
        #[arg(short, long)]
        disease: Option<DiseaseId>,
    },
    /// List supported diseases and their cutoffs
    Diseases,
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "fibro-calc")]
#[command(about = "APRI and FIB-4 liver fibrosis calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/fibro-calc/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Where the config came from, for verbose output.
fn describe_config_source(explicit: Option<&Path>) -> String {
    let resolved = match explicit {
        Some(p) => p.to_path_buf(),
        None => match fibro_calc::config::get_config_path() {
            Ok(p) => p,
            Err(_) => return "No config path available, using built-in defaults".to_string(),
        },
    };
    if resolved.exists() {
        format!("Loaded config from {}", resolved.display())
    } else {
        format!(
            "No config found at {}, using built-in defaults",
            resolved.display()
        )
    }
}

/// Load and validate the config, exiting with EXIT_CONFIG on failure.
fn load_config_or_exit(config_path: Option<PathBuf>, verbose: bool) -> Config {
    let config = match fibro_calc::config::load_config(config_path.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = fibro_calc::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if verbose {
        eprintln!("{}", describe_config_source(config_path.as_deref()));
    }

    config
}

fn run_calc(args: CalcArgs, config: &Config, verbose: bool) -> i32 {
    let use_colors = config.color.unwrap_or(true) && output::should_use_colors();
    let disease = args.disease.or(config.disease).unwrap_or_default();
    let format = args.format.or(config.format).unwrap_or_default();
    let ast_uln = args
        .ast_uln
        .unwrap_or_else(|| config.ast_uln.unwrap_or(DEFAULT_AST_ULN).to_string());

    let raw = RawInputs {
        age: args.age,
        ast: args.ast,
        alt: args.alt,
        platelet: args.platelet,
        ast_uln,
    };

    if verbose {
        let profile = disease.profile();
        eprintln!("Disease: {} ({})", profile.name, profile.id);
        eprintln!("AST ULN: {} U/L", raw.ast_uln);
    }

    let assessment = match scoring::evaluate(&raw, disease) {
        Evaluation::Incomplete { missing } => {
            eprintln!("{}", output::format_missing_fields(&missing));
            return EXIT_INCOMPLETE;
        }
        Evaluation::Invalid { errors } => {
            eprintln!("Invalid input:");
            eprintln!("{}", output::format_field_errors(&errors));
            return EXIT_INVALID_INPUT;
        }
        Evaluation::Ready(assessment) => assessment,
    };

    if verbose {
        eprintln!(
            "Platelets converted: {} /µL -> {} x10^9/L",
            raw.value(Field::Platelet),
            assessment.inputs.platelet
        );
        if let Some(fib4) = &assessment.fib4_interpretation {
            eprintln!(
                "FIB-4 cutoffs applied: {:.2} / {:.2}{}",
                fib4.cutoffs.low,
                fib4.cutoffs.high,
                if fib4.age_adjusted { " (age-adjusted)" } else { "" }
            );
        }
    }

    match format {
        OutputFormat::Text => println!("{}", output::format_report(&assessment, use_colors)),
        OutputFormat::Tsv => println!("{}", output::format_tsv(&assessment)),
        OutputFormat::Json => match output::format_json(&assessment) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Output error: {:#}", e);
                return EXIT_INVALID_INPUT;
            }
        },
    }

    // Scores print as N/A, but scripts still need to know
    if assessment.apri.is_undefined() || assessment.fib4.is_undefined() {
        return EXIT_INCOMPLETE;
    }
    EXIT_SUCCESS
}

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.map(PathBuf::from);

    let code = match cli.command {
        Commands::Init => match fibro_calc::config::init::run_init_wizard(config_path) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                eprintln!("Init failed: {:#}", e);
                EXIT_CONFIG
            }
        },
        Commands::Calc(args) => {
            let config = load_config_or_exit(config_path, cli.verbose);
            run_calc(args, &config, cli.verbose)
        }
        Commands::Guide { disease } => {
            let config = load_config_or_exit(config_path, cli.verbose);
            let use_colors = config.color.unwrap_or(true) && output::should_use_colors();
            let disease = disease.or(config.disease).unwrap_or_default();
            println!("{}", output::format_guide(disease, use_colors));
            EXIT_SUCCESS
        }
        Commands::Diseases => {
            let config = load_config_or_exit(config_path, cli.verbose);
            let use_colors = config.color.unwrap_or(true) && output::should_use_colors();
            println!("{}", output::format_disease_list(use_colors));
            EXIT_SUCCESS
        }
    };

    std::process::exit(code);
}
