use anyhow::{Context, Result};
use clap::ValueEnum;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, save_config, Config};
use crate::output::OutputFormat;
use crate::scoring::{validation::validate_input, DiseaseId, Field};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Parse a local AST ULN entry with the same rules as the calculator field.
fn parse_ast_uln(input: &str) -> Result<f64, String> {
    let validation = validate_input(Field::AstUln, input);
    if let Some(message) = validation.message {
        return Err(message);
    }
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| "must be a number".to_string())
}

/// Parse an output format the same way `--format` does.
fn parse_format(input: &str) -> Result<OutputFormat, String> {
    <OutputFormat as ValueEnum>::from_str(input.trim(), true)
        .map_err(|_| format!("unknown format '{}' (text, json or tsv)", input.trim()))
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("fibro-calc configuration");
    println!("========================");
    println!();

    println!("Default disease context. Selects the FIB-4 cutoffs and whether APRI is shown.");
    println!("  HCV    1.45 / 3.25");
    println!("  HBV    1.30 / 2.67");
    println!("  NAFLD  1.30 / 2.67 (2.00 low cutoff at age 65 and over)");
    let disease = loop {
        let input = prompt_with_default("Disease", DiseaseId::default().as_str())?;
        match input.parse::<DiseaseId>() {
            Ok(d) => break d,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    println!();
    println!("AST upper limit of normal used by APRI. Use your laboratory's reference value.");
    let ast_uln = loop {
        let input = prompt_with_default("AST ULN (U/L)", "35")?;
        match parse_ast_uln(&input) {
            Ok(v) => break v,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    println!();
    let format = loop {
        let input = prompt_with_default("Output format (text, json, tsv)", "text")?;
        match parse_format(&input) {
            Ok(f) => break f,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    let color = prompt_yes_no("Colorize terminal output?", true)?;

    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    let config = Config {
        disease: Some(disease),
        ast_uln: Some(ast_uln),
        format: Some(format),
        color: Some(color),
    };
    save_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `fibro-calc calc --help` to get started.");

    Ok(())
}
