use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use cover_letter::config::{AppConfig, LetterConfig};
use cover_letter::error::AppError;
use cover_letter::letter::{Compiler, CoverLetterPipeline, Language, PipelineSettings};
use cover_letter::telemetry;
use dialoguer::Input;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::info;

const LICENSE_NOTICE: &str = "\
Cover Letter Generator - Copyright (C) 2025  Tobias Holmes
This program comes with ABSOLUTELY NO WARRANTY.
This is free software, and you are welcome to redistribute it
under certain conditions; see GPL v3 for details.";

#[derive(Parser, Debug)]
#[command(
    name = "cover-letter",
    about = "Render a cover letter from YAML context files and typeset it with LaTeX",
    after_help = LICENSE_NOTICE,
    version,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the output file name stem without rendering anything
    Name(SourceArgs),
}

#[derive(Args, Debug, Default)]
struct SourceArgs {
    /// Letter language: en or de (prompted for when omitted)
    #[arg(long, short)]
    language: Option<String>,
    /// Date printed on the letter (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
    /// Directory holding the sender, position and text context files
    #[arg(long)]
    context_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
struct GenerateArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Directory holding the document template
    #[arg(long)]
    template_dir: Option<PathBuf>,
    /// Template file name inside the template directory
    #[arg(long)]
    template: Option<String>,
    /// Directory the .tex (and .pdf) files are written to
    #[arg(long)]
    render_dir: Option<PathBuf>,
    /// TeX engine used to produce the PDF
    #[arg(long)]
    compiler: Option<String>,
    /// Write the .tex file but do not run the compiler
    #[arg(long)]
    no_compile: bool,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Some(Command::Name(args)) => run_name(config.letter, args),
        None => run_generate(config.letter, cli.generate),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn run_name(mut config: LetterConfig, args: SourceArgs) -> Result<(), AppError> {
    let language = resolve_language(args.language)?;
    if let Some(dir) = args.context_dir {
        config.context_dir = dir;
    }

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let pipeline = CoverLetterPipeline::new(settings(config));
    let name = pipeline.plan(language, today)?;

    println!("{name}");
    Ok(())
}

fn run_generate(mut config: LetterConfig, args: GenerateArgs) -> Result<(), AppError> {
    let GenerateArgs {
        source,
        template_dir,
        template,
        render_dir,
        compiler,
        no_compile,
    } = args;

    let language = resolve_language(source.language)?;

    if let Some(dir) = source.context_dir {
        config.context_dir = dir;
    }
    if let Some(dir) = template_dir {
        config.template_dir = dir;
    }
    if let Some(name) = template {
        config.template = name;
    }
    if let Some(dir) = render_dir {
        config.render_dir = dir;
    }
    if let Some(program) = compiler {
        config.compiler = program;
    }
    if no_compile {
        config.compile = false;
    }

    let today = source.today.unwrap_or_else(|| Local::now().date_naive());
    info!(%language, %today, "generating cover letter");

    let pipeline = CoverLetterPipeline::new(settings(config));
    let letter = pipeline.generate(language, today)?;

    println!("Rendered {}", letter.tex_path.display());
    if let Some(pdf) = letter.pdf_path {
        println!("Compiled {}", pdf.display());
    }
    Ok(())
}

fn settings(config: LetterConfig) -> PipelineSettings {
    let compiler = config
        .compile
        .then(|| Compiler::for_program(&config.compiler));

    PipelineSettings {
        context_dir: config.context_dir,
        template_dir: config.template_dir,
        template: config.template,
        render_dir: config.render_dir,
        compiler,
    }
}

/// Validated before any source is read. Interactive sessions get a prompt
/// defaulting to German; piped input falls back to the default silently.
fn resolve_language(requested: Option<String>) -> Result<Language, AppError> {
    let raw = match requested {
        Some(raw) => raw,
        None if std::io::stdin().is_terminal() => Input::<String>::new()
            .with_prompt("Enter language (en/DE)")
            .default(Language::default().code().to_string())
            .show_default(false)
            .interact_text()?,
        None => return Ok(Language::default()),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Language::default());
    }
    Ok(trimmed.parse()?)
}
