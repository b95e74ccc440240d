use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use futures::future::join_all;
use workspace::{flatten_with, util, Config, Project, Workspace};

/// Inspect sandbox project trees, mentions and file tabs
#[derive(Parser)]
#[command(name = "workspace")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base directory for logs and config. Defaults to ~/.sandbox-workspace
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a directory tree and print its files
    Tree {
        /// Project root
        dir: String,
    },
    /// Print files matching an @-mention query
    Mention {
        query: String,

        /// Project roots to search, defaults to the current directory
        #[arg(short, long = "project")]
        projects: Vec<String>,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },
    /// Open files as tabs and print the tab strip
    Open {
        #[arg(required = true)]
        files: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    util::init_data_dir(cli.data_dir);

    // Initialize logging to file (<data_dir>/logs/workspace.log)
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    let config = Config::load();
    let workspace = Workspace::local(config);

    match cli.command {
        Commands::Tree { dir } => print_tree(&workspace, dir).await,
        Commands::Mention {
            query,
            projects,
            json,
        } => print_mentions(&workspace, &query, projects, json).await,
        Commands::Open { files } => print_tabs(&workspace, files).await,
    }
}

async fn print_tree(workspace: &Workspace, dir: String) -> Result<()> {
    let project = Project::new(dir.clone(), dir);
    let tree = workspace
        .cache()
        .ensure_loaded(&project)
        .await
        .context("Failed to load tree")?;

    let options = workspace.config().mentions.flatten_options();
    for entry in flatten_with(&tree, &project.directory, options) {
        println!("{}", entry.path);
    }
    Ok(())
}

async fn print_mentions(
    workspace: &Workspace,
    query: &str,
    dirs: Vec<String>,
    json: bool,
) -> Result<()> {
    let dirs = if dirs.is_empty() {
        let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
        vec![cwd.display().to_string()]
    } else {
        dirs
    };
    let projects = dirs
        .into_iter()
        .map(|dir| Project::new(dir.clone(), dir))
        .collect();

    for err in workspace.sync_projects(projects).await {
        eprintln!("warning: {}", err);
    }

    let mentions = workspace.mentions();
    let matches = mentions.filter(query);
    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }
    for file in matches {
        println!("{}\t{}", file.name, file.path);
    }
    Ok(())
}

async fn print_tabs(workspace: &Workspace, files: Vec<String>) -> Result<()> {
    let results = join_all(files.iter().map(|file| workspace.open_file(file))).await;
    for err in results.into_iter().filter_map(Result::err) {
        eprintln!("warning: {}", err);
    }

    let active = workspace.active_id();
    for session in workspace.sessions() {
        let marker = if active.as_deref() == Some(session.id.as_str()) {
            "*"
        } else {
            " "
        };
        let state = match session.file_content() {
            Some(content) if content.is_pending() => "pending".to_string(),
            Some(content) => format!("{} bytes", content.as_loaded().map_or(0, str::len)),
            None => "chat".to_string(),
        };
        println!("{} {}\t{}", marker, session.tab_name(), state);
    }
    Ok(())
}
