use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use mock_exam::config::Theme;
use mock_exam::logging::{self, LogTarget};
use mock_exam::{
    Catalog, Config, Exam, ExamError, check_document, importer, load_document, template, title,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to $MOCK_EXAM_CONFIG, then ./mock-exam.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Take an exam from a file or from the catalog
    Take(TakeArgs),
    /// Parse a document and print a JSON summary without starting an exam
    Check {
        /// Exam document to check
        file: PathBuf,
    },
    /// List the exams available by name
    List,
    /// Print the prompt template for generating compatible exams
    Template {
        /// Topic to fill into the template
        #[arg(short, long)]
        subject: Option<String>,
        /// Write the template to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Save generated exam text (from FILE or stdin) and take it
    Import {
        /// Topic used for the saved file name
        #[arg(short, long)]
        subject: Option<String>,
        /// Read the exam text from this file instead of stdin
        file: Option<PathBuf>,
    },
    /// Change the colors used by the exam screens
    Theme(ThemeArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct TakeArgs {
    /// Exam document to load
    file: Option<PathBuf>,
    /// Name of a catalog exam (see `list`)
    #[arg(short, long)]
    exam: Option<String>,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = true)]
struct ThemeArgs {
    /// Start from a named theme (indigo, emerald, rose, amber, ocean)
    #[arg(short, long, conflicts_with = "reset")]
    preset: Option<String>,
    /// Accent color name or #rrggbb
    #[arg(long)]
    accent: Option<String>,
    /// Background hue in degrees (0-359)
    #[arg(long)]
    hue: Option<u16>,
    /// Start from the default theme
    #[arg(long)]
    reset: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ExamError> {
    let config_path = Config::resolve_path(cli.config.as_deref());
    let config = Config::load(&config_path)?;

    let interactive = matches!(cli.command, Command::Take(_) | Command::Import { .. });
    let log_target = match (&config.log_file, interactive) {
        (Some(path), _) => LogTarget::File(path),
        (None, true) => LogTarget::Discard,
        (None, false) => LogTarget::Stderr,
    };
    logging::init(log_target, cli.verbose)?;
    info!(config = %config_path.display(), "configuration loaded");

    match cli.command {
        Command::Take(args) => take(args, &config),
        Command::Check { file } => check(&file),
        Command::List => list(&config),
        Command::Template { subject, output } => {
            write_template(subject.as_deref(), output.as_deref())
        }
        Command::Import { subject, file } => {
            import(subject.as_deref(), file.as_deref(), &config)
        }
        Command::Theme(args) => set_theme(args, &config, &config_path),
    }
}

fn take(args: TakeArgs, config: &Config) -> Result<(), ExamError> {
    let exam = if let Some(file) = args.file {
        Exam::from_file(file, config)?
    } else {
        let name = args.exam.unwrap_or_default();
        let catalog = Catalog::load(config.catalog_dir.as_deref())?;
        Exam::from_catalog(&name, &catalog, config)?
    };
    exam.run()
}

fn check(file: &Path) -> Result<(), ExamError> {
    let content = load_document(file)?;
    let summary = check_document(&file.display().to_string(), &content)?;

    let json = serde_json::to_string_pretty(&summary).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}

fn list(config: &Config) -> Result<(), ExamError> {
    let catalog = Catalog::load(config.catalog_dir.as_deref())?;
    for name in catalog.names() {
        println!("{}", name);
    }
    Ok(())
}

fn write_template(subject: Option<&str>, output: Option<&Path>) -> Result<(), ExamError> {
    let text = template::prompt(subject);
    match output {
        Some(path) => {
            fs::write(path, text)?;
            eprintln!("Template written to {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn import(subject: Option<&str>, file: Option<&Path>, config: &Config) -> Result<(), ExamError> {
    let content = match file {
        Some(path) => load_document(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let imported = importer::import(&content, subject, &config.export_dir)?;
    eprintln!("Saved {}", imported.path.display());

    let name = title(&content).unwrap_or_else(|| subject.unwrap_or("Custom").to_string());
    Exam::from_document(&name, imported.document, config)?.run()
}

fn set_theme(args: ThemeArgs, config: &Config, config_path: &Path) -> Result<(), ExamError> {
    let mut theme = match (&args.preset, args.reset) {
        (Some(name), _) => Theme::preset(name)?,
        (None, true) => Theme::default(),
        (None, false) => config.theme.clone(),
    };
    if let Some(accent) = &args.accent {
        theme = theme.with_accent(accent)?;
    }
    if let Some(hue) = args.hue {
        theme = theme.with_background_hue(hue)?;
    }

    let updated = Config {
        theme,
        ..config.clone()
    };
    updated.save(config_path)?;
    eprintln!(
        "Theme set to accent {} on background hue {} in {}",
        updated.theme.accent,
        updated.theme.background_hue,
        config_path.display()
    );
    Ok(())
}
