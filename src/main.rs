use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, error};

use blog_store::config::AppConfig;
use blog_store::logging::{init_logging, OperationTimer};
use blog_store::{AuthorChanges, BlogError, BlogService, Database, NewAuthor, NewPost, PostChanges};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Extra configuration file layered over the defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Database URL (overrides configuration)
    #[arg(short, long, global = true)]
    database: Option<String>,

    /// Log level (overrides configuration)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage authors
    #[command(subcommand)]
    Author(AuthorCommand),
    /// Manage posts
    #[command(subcommand)]
    Post(PostCommand),
    /// Print the effective configuration as YAML
    ShowConfig,
}

#[derive(Subcommand)]
enum AuthorCommand {
    /// Create an author
    Add {
        /// Unique display name
        #[arg(short, long)]
        name: String,

        /// Ten-digit phone number
        #[arg(short, long)]
        phone: String,
    },
    /// List all authors
    List,
    /// Show one author
    Show { id: i64 },
    /// Change an author's fields
    Update {
        id: i64,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        phone: Option<String>,
    },
    /// Delete an author
    Delete { id: i64 },
}

#[derive(Args)]
struct PostFields {
    /// Headline
    #[arg(short, long)]
    title: Option<String>,

    /// Body text
    #[arg(long)]
    content: Option<String>,

    /// Short abstract
    #[arg(short, long)]
    summary: Option<String>,

    /// Category, e.g. Fiction or Non-Fiction
    #[arg(long)]
    category: Option<String>,
}

#[derive(Subcommand)]
enum PostCommand {
    /// Create a post
    Add {
        #[command(flatten)]
        fields: PostFields,
    },
    /// List all posts
    List,
    /// Show one post
    Show { id: i64 },
    /// Change a post's fields
    Update {
        id: i64,

        #[command(flatten)]
        fields: PostFields,

        /// Remove the body text
        #[arg(long, conflicts_with = "content")]
        clear_content: bool,

        /// Remove the summary
        #[arg(long, conflicts_with = "summary")]
        clear_summary: bool,
    },
    /// Delete a post
    Delete { id: i64 },
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        error!("{err:#}");
        eprintln!("Error: {err:#}");
        // Rejected input exits with 2, any other failure with 1
        let code = match err.downcast_ref::<BlogError>() {
            Some(BlogError::Validation(_)) => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load_from(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(url) = cli.database {
        config.database.url = url;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.validate()?;

    let _guard = init_logging(&config.logging)?;
    debug!(database = %config.database.url, "Configuration loaded");

    if matches!(cli.command, Commands::ShowConfig) {
        print!("{}", serde_yaml::to_string(&config)?);
        return Ok(());
    }

    let database = Database::from_config(&config.database)
        .with_context(|| format!("Failed to open database {}", config.database.url))?;
    let service = BlogService::with_database(database, config.validation);

    let timer = OperationTimer::new("command");
    match cli.command {
        Commands::Author(command) => run_author(&service, command)?,
        Commands::Post(command) => run_post(&service, command)?,
        Commands::ShowConfig => {}
    }
    timer.finish();

    Ok(())
}

fn run_author(service: &BlogService, command: AuthorCommand) -> Result<()> {
    match command {
        AuthorCommand::Add { name, phone } => {
            print_json(&service.create_author(NewAuthor::new(name, phone))?)
        }
        AuthorCommand::List => print_json(&service.list_authors()?),
        AuthorCommand::Show { id } => print_json(&service.get_author(id)?),
        AuthorCommand::Update { id, name, phone } => {
            let changes = AuthorChanges {
                name,
                phone_number: phone,
            };
            print_json(&service.update_author(id, changes)?)
        }
        AuthorCommand::Delete { id } => {
            service.delete_author(id)?;
            println!("Deleted author {id}");
            Ok(())
        }
    }
}

fn run_post(service: &BlogService, command: PostCommand) -> Result<()> {
    match command {
        PostCommand::Add { fields } => {
            let candidate = NewPost {
                title: fields.title.unwrap_or_default(),
                content: fields.content,
                summary: fields.summary,
                category: fields.category,
            };
            print_json(&service.create_post(candidate)?)
        }
        PostCommand::List => print_json(&service.list_posts()?),
        PostCommand::Show { id } => print_json(&service.get_post(id)?),
        PostCommand::Update {
            id,
            fields,
            clear_content,
            clear_summary,
        } => {
            let changes = PostChanges {
                title: fields.title,
                content: if clear_content { Some(None) } else { fields.content.map(Some) },
                summary: if clear_summary { Some(None) } else { fields.summary.map(Some) },
                category: fields.category,
            };
            print_json(&service.update_post(id, changes)?)
        }
        PostCommand::Delete { id } => {
            service.delete_post(id)?;
            println!("Deleted post {id}");
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
