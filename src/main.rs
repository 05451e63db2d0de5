use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use futures::future::try_join_all;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hoshi::config::Config;
use hoshi::render::{render_tree, PackageNode};
use hoshi::repository::Repository;
use hoshi::{api, Error};

#[derive(Parser)]
#[command(name = "hoshi")]
#[command(about = "Versioned phrase store for localization projects")]
struct Cli {
    /// Project directory, or the path of its project.hoshi
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the project over HTTP
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port for HTTP API
        #[arg(short = 'P', long)]
        port: Option<u16>,
    },
    /// Show packages and versions as a tree
    Tree,
    /// List packages
    Packages,
    /// List versions of a package in history order
    Versions { package: String },
    /// Print a single version document
    Show { package: String, version: String },
    /// Print the merged phrases of a package up to a version
    History { package: String, version: String },
    /// Add an empty version to a package
    AddVersion { package: String, name: String },
    /// Delete a version
    DeleteVersion { package: String, version: String },
}

/// Initialize tracing with output to stderr (for one-shot commands) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "hoshi=debug,tower_http=debug".into()),
    );

    if use_stderr {
        // Command output goes to stdout, keep it clean
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn serve(repo: Repository, config: &Config) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    tracing::info!(
        "Serving project {} on {}",
        repo.store().root().display(),
        addr
    );

    let app = api::create_router(repo);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("hoshi listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn print_tree(repo: &Repository) -> Result<(), Error> {
    let project = repo.store().read_project_header().await?;
    let packages = repo.list_packages().await?;

    let nodes = try_join_all(packages.into_iter().map(|id| async move {
        let versions = repo.list_versions(&id).await?;
        Ok::<_, Error>(PackageNode { id, versions })
    }))
    .await?;

    print!("{}", render_tree(&project.id, &nodes));
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let serving = matches!(cli.command, None | Some(Commands::Serve { .. }));
    init_tracing(!serving);

    let mut config = Config::load();
    if cli.project.is_some() {
        config.project = cli.project;
    }

    let project_path = config.project_path();
    let repo = Repository::open(&project_path)
        .await
        .with_context(|| format!("Failed to open project at {}", project_path.display()))?;

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(repo, &config).await?;
        }
        Some(Commands::Tree) => {
            print_tree(&repo).await?;
        }
        Some(Commands::Packages) => {
            for package in repo.list_packages().await? {
                println!("{}", package);
            }
        }
        Some(Commands::Versions { package }) => {
            for version in repo.list_versions(&package).await? {
                println!("{}", version);
            }
        }
        Some(Commands::Show { package, version }) => {
            let version = repo.fetch_version(&package, &version).await?;
            print!("{}", serde_yaml::to_string(&version)?);
        }
        Some(Commands::History { package, version }) => {
            let phrases = repo.history(&package, &version).await?;
            print!("{}", serde_yaml::to_string(&phrases)?);
        }
        Some(Commands::AddVersion { package, name }) => {
            let version = repo.add_new_version(&package, &name).await?;
            println!("Added version {} to {}", version.id, package);
        }
        Some(Commands::DeleteVersion { package, version }) => {
            repo.delete_version(&package, &version).await?;
            println!("Deleted version {} from {}", version, package);
        }
        None => {
            serve(repo, &config).await?;
        }
    }

    Ok(())
}
