mod demo;
mod render;

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use form_prompt::{Choices, PromptOptions, Shell, StdioPrompter};
use form_spec::{
    FormDefinition, FormSpec, ValidationReport, definition_schema, result_schema, validate,
};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const LOG_ENV: &str = "TERMFORM_LOG";
const MAX_ATTEMPTS_ENV: &str = "TERMFORM_MAX_ATTEMPTS";

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Interactive terminal forms",
    long_about = "Runs declarative forms and confirmations on the terminal, validates collected answers and prints the schemas involved"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Cbor,
}

#[derive(Subcommand)]
enum Command {
    /// Prompt for every field of a form and print the collected answers.
    Form {
        /// Path to the form definition JSON.
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
        /// Encoding of the printed answers; CBOR is printed as hex.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        /// Handlebars template rendered over the answers instead of the raw output.
        #[arg(long, value_name = "TEMPLATE")]
        template: Option<PathBuf>,
        #[command(flatten)]
        prompting: PromptArgs,
    },
    /// Ask a single question and print the value of the chosen answer.
    Confirm {
        #[arg(long)]
        question: String,
        /// Answer as `label=value`; repeat for each answer. Defaults to y=true, n=false.
        #[arg(long = "choice", value_name = "LABEL=VALUE", value_parser = parse_choice)]
        choices: Vec<(String, String)>,
        /// Do not treat an empty reply as the first answer.
        #[arg(long)]
        no_default: bool,
        #[command(flatten)]
        prompting: PromptArgs,
    },
    /// Validate an answers file against a form.
    Validate {
        /// Path to the form definition JSON.
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
        /// Path to the answers JSON file.
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
    },
    /// Print the JSON schema of form definitions, or of one form's answers.
    Schema {
        #[arg(long, value_name = "SPEC")]
        spec: Option<PathBuf>,
    },
    /// Walk through the prompting helpers interactively.
    Demo,
}

#[derive(clap::Args)]
struct PromptArgs {
    /// Give up after this many rejected answers to one prompt (0 never gives up).
    /// Falls back to TERMFORM_MAX_ATTEMPTS.
    #[arg(long, value_name = "N")]
    max_attempts: Option<usize>,
    /// Say why an answer was rejected before asking again.
    #[arg(long)]
    explain: bool,
}

fn main() -> CliResult<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Form {
            spec,
            format,
            template,
            prompting,
        } => run_form(&spec, format, template.as_deref(), &prompting),
        Command::Confirm {
            question,
            choices,
            no_default,
            prompting,
        } => run_confirm(&question, choices, !no_default, &prompting),
        Command::Validate { spec, answers } => run_validate(&spec, &answers),
        Command::Schema { spec } => run_schema(spec.as_deref()),
        Command::Demo => run_demo(),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_spec(path: &Path) -> CliResult<FormSpec> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read form '{}': {}", path.display(), err))?;
    let definition: FormDefinition = serde_json::from_str(&contents)?;
    let spec = FormSpec::try_from(definition)?;
    debug!(path = %path.display(), fields = spec.fields().count(), "form loaded");
    Ok(spec)
}

fn prompt_options(args: &PromptArgs) -> CliResult<PromptOptions> {
    let max_attempts = match args.max_attempts {
        Some(attempts) => attempts,
        None => match env::var(MAX_ATTEMPTS_ENV) {
            Ok(value) => value.trim().parse().map_err(|_| {
                format!("{} must be a non-negative integer, got '{}'", MAX_ATTEMPTS_ENV, value)
            })?,
            Err(_) => 0,
        },
    };
    Ok(PromptOptions::default()
        .with_max_attempts(max_attempts)
        .with_explanations(args.explain))
}

fn run_form(
    spec_path: &Path,
    format: OutputFormat,
    template: Option<&Path>,
    prompting: &PromptArgs,
) -> CliResult<()> {
    let spec = load_spec(spec_path)?;
    let template = template.map(fs::read_to_string).transpose()?;
    let mut prompter = StdioPrompter::stdio().with_options(prompt_options(prompting)?);
    let result = prompter.read_form(&spec)?;

    let output = match (template, format) {
        (Some(template), _) => render::template(&template, &spec, &result)?,
        (None, OutputFormat::Json) => result.to_json_pretty()?,
        (None, OutputFormat::Cbor) => render::encode_hex(&result.to_cbor()?),
    };
    prompter.write_line("")?;
    prompter.write_line(&output)?;
    Ok(())
}

fn parse_choice(raw: &str) -> Result<(String, String), String> {
    let (label, value) = raw.split_once('=').unwrap_or((raw, raw));
    if label.trim().is_empty() {
        return Err(format!("choice '{}' has an empty label", raw));
    }
    Ok((label.trim().to_string(), value.to_string()))
}

fn run_confirm(
    question: &str,
    choices: Vec<(String, String)>,
    first_is_default: bool,
    prompting: &PromptArgs,
) -> CliResult<()> {
    let choices: Choices<String> = if choices.is_empty() {
        Choices::new()
            .with("y", "true".to_string())
            .with("n", "false".to_string())
    } else {
        choices.into_iter().collect()
    };
    let mut prompter = StdioPrompter::stdio().with_options(prompt_options(prompting)?);
    let value = prompter.confirm(question, &choices, first_is_default)?;
    prompter.write_line(&value)?;
    Ok(())
}

fn run_validate(spec_path: &Path, answers_path: &Path) -> CliResult<()> {
    let spec = load_spec(spec_path)?;
    let answers_json = fs::read_to_string(answers_path)?;
    let answers: Value = serde_json::from_str(&answers_json)?;

    let report = validate(&spec, &answers);
    println!(
        "Validation result: {}",
        if report.valid { "valid" } else { "invalid" }
    );
    describe_validation(&report);

    if report.valid {
        Ok(())
    } else {
        Err("validation failed".into())
    }
}

fn describe_validation(report: &ValidationReport) {
    if !report.errors.is_empty() {
        println!("Errors:");
        for error in &report.errors {
            println!("  {} - {} ({})", error.path, error.message, error.code);
        }
    }
    if !report.missing_required.is_empty() {
        println!("Missing answers: {}", report.missing_required.join(", "));
    }
    if !report.unknown_fields.is_empty() {
        println!("Unknown answer fields: {}", report.unknown_fields.join(", "));
    }
}

fn run_schema(spec_path: Option<&Path>) -> CliResult<()> {
    let schema = match spec_path {
        Some(path) => result_schema(&load_spec(path)?),
        None => definition_schema(),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn run_demo() -> CliResult<()> {
    let mut prompter = StdioPrompter::stdio().with_options(prompt_options(&PromptArgs {
        max_attempts: None,
        explain: false,
    })?);
    demo::run(&mut prompter, &Shell::default())
}
