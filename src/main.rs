use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use survey::config::{DEFAULT_CONFIG_FILE, SurveyConfig};
use survey::format::OutputFormat;
use survey::questions::QuestionSet;
use survey::telemetry;
use tracing::info;

/// Human vs AI: ten quick questions in the terminal.
///
/// Pick Human or AI for each question; the hero fills up on each side as
/// you go and the results show which way you lean.
///
/// KEYS:
///
///   h / 1    Human          a / 2    AI
///   ← / →    previous / next question
///   s        submit         r        reset
///   ?        help           q        quit
#[derive(Parser)]
#[command(name = "human-ai-survey")]
#[command(version, about)]
#[command(propagate_version = true)]
#[command(after_help = "See 'human-ai-survey <command> --help' for more information on a specific command.")]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, env = "SURVEY_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Append JSON logs to this file
    #[arg(long, global = true, env = "SURVEY_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the survey (the default)
    Run {
        /// Do not capture the mouse
        #[arg(long)]
        no_mouse: bool,
    },

    /// Print the questions and their highlighted keywords
    Questions {
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the effective configuration as JSON
    Config,

    /// Generate shell completions
    Completions {
        /// Shell to generate for
        shell: Shell,
    },
}

fn load_config(path: &Path) -> Result<SurveyConfig> {
    SurveyConfig::load(path).context("loading configuration")
}

fn run_survey(config: &SurveyConfig, no_mouse: bool) -> Result<()> {
    let mut settings = config.to_settings();
    if no_mouse {
        settings.mouse = false;
    }

    let summary = survey_tui::run(settings).context("running the survey")?;
    info!(?summary, "session summary");

    if summary.completed {
        println!("Human {}  vs  AI {}", summary.scores.human, summary.scores.ai);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_owned();
        clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let config = load_config(&cli.config)?;
    let log_file = cli.log_file.as_deref().or(config.log.file.as_deref());
    let _telemetry = telemetry::init(log_file);
    info!(config = %cli.config.display(), "configuration loaded");

    match cli.command {
        None => run_survey(&config, false),
        Some(Commands::Run { no_mouse }) => run_survey(&config, no_mouse),
        Some(Commands::Questions { format }) => {
            print!("{}", QuestionSet::current().render(format)?);
            Ok(())
        }
        Some(Commands::Config) => {
            println!("{}", OutputFormat::Json.serialize(&config)?);
            Ok(())
        }
        Some(Commands::Completions { .. }) => Ok(()),
    }
}
