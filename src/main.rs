use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use gitter::areas::repository::Repository;
use gitter::artifacts::core::PagerWriter;
use gitter::artifacts::core::config::Config;
use gitter::commands::porcelain::diff::DiffOptions;
use gitter::commands::porcelain::log::LogOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "gitter",
    version = "0.1.0",
    about = "A minimal version-control tool",
    long_about = "Tracks file snapshots across the working tree, a staging area \
    and an append-only commit history kept in the .gitter directory.",
    disable_help_subcommand = true,
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(
        short = 'C',
        global = true,
        value_name = "DIR",
        help = "Run as if started in DIR instead of the current directory"
    )]
    directory: Option<PathBuf>,
    #[arg(long, global = true, help = "Print debug logs to stderr")]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Create an empty Gitter repository",
        long_about = "Creates the .gitter directory in the current directory or at the given path. \
        Running it again in an initialized repository changes nothing."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "add",
        about = "Add file contents to the index",
        long_about = "Stages files for the next commit. Paths may be files, directories \
        (added recursively) or gitignore-style patterns such as '*.txt'."
    )]
    Add {
        #[arg(index = 1, help = "Files, directories or patterns to add")]
        paths: Vec<String>,
    },
    #[command(
        name = "status",
        about = "Show the working tree status",
        long_about = "Shows staged changes, changes not staged for commit and untracked files."
    )]
    Status {
        #[arg(long, help = "Print one line per path with a two-letter status code")]
        porcelain: bool,
    },
    #[command(
        name = "commit",
        about = "Record changes to the repository",
        long_about = "Creates a new commit from the latest snapshot and the staged changes."
    )]
    Commit {
        #[arg(
            short,
            long,
            help = "The commit message; repeated values are joined as separate lines"
        )]
        message: Vec<String>,
        #[arg(
            short,
            long,
            help = "Stage modified tracked files and drop deleted ones before committing"
        )]
        all: bool,
    },
    #[command(
        name = "log",
        about = "Show commit logs",
        long_about = "Shows the commit history, most recent first."
    )]
    Log {
        #[arg(long, help = "Show each commit on a single line")]
        oneline: bool,
    },
    #[command(
        name = "diff",
        about = "Show changes between the latest commit and the working tree",
        long_about = "Shows a unified diff of every file that differs from the latest commit, \
        optionally restricted to the given files or directories."
    )]
    Diff {
        #[arg(short = 'w', long, help = "Ignore changes in the amount of whitespace")]
        ignore_whitespace: bool,
        #[arg(index = 1, help = "Files or directories to compare")]
        paths: Vec<String>,
    },
    #[command(
        name = "help",
        about = "Display help information",
        long_about = "Lists the available commands, or shows the details of one command."
    )]
    Help {
        #[arg(index = 1, help = "The command to describe")]
        command: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{e:?}");
            println!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load_from_env()?;
    colored::control::set_override(config.color());

    let root = match cli.directory {
        Some(directory) => directory,
        None => std::env::current_dir().context("Unable to read the current directory")?,
    };

    match cli.command {
        Commands::Init { path } => {
            let root = path.map(|path| root.join(path)).unwrap_or(root);
            std::fs::create_dir_all(&root)
                .context(format!("Unable to create {}", root.display()))?;

            open(&root, config)?.init()
        }
        Commands::Add { paths } => open(&root, config)?.add(&paths),
        Commands::Status { porcelain } => open(&root, config)?.show_status(porcelain),
        Commands::Commit { message, all } => open(&root, config)?.commit(&message, all),
        Commands::Log { oneline } => {
            paged(&root, config, |repository| {
                repository.log(&LogOptions { oneline })
            })
        }
        Commands::Diff {
            ignore_whitespace,
            paths,
        } => paged(&root, config, |repository| {
            repository.diff(&DiffOptions {
                ignore_whitespace,
                paths,
            })
        }),
        Commands::Help { command } => print_help(command.as_deref()),
    }
}

fn open(root: &Path, config: Config) -> Result<Repository> {
    Repository::new(root, Box::new(std::io::stdout()), config)
}

/// Run a report command through the pager when stdout is a terminal.
fn paged(
    root: &Path,
    config: Config,
    command: impl FnOnce(&Repository) -> Result<()>,
) -> Result<()> {
    if !config.pager() {
        return command(&open(root, config)?);
    }

    let pager = minus::Pager::new();
    let writer = PagerWriter::new(pager.clone());
    let repository = Repository::new(root, Box::new(writer), config)?;

    command(&repository)?;
    minus::page_all(pager)?;

    Ok(())
}

fn print_help(command: Option<&str>) -> Result<()> {
    let mut cli = Cli::command();

    let Some(name) = command else {
        println!("These are common Gitter commands:");
        for subcommand in cli.get_subcommands() {
            let about = subcommand
                .get_about()
                .map(ToString::to_string)
                .unwrap_or_default();
            println!("  {:10} {}", subcommand.get_name(), about);
        }
        return Ok(());
    };

    match cli.find_subcommand_mut(name) {
        Some(subcommand) => println!("{}", subcommand.render_long_help()),
        None => println!("Unknown command '{name}'. Run 'gitter help' for a list of commands."),
    }

    Ok(())
}
