use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use folio_kernel::settings::{Deployment, Settings};

/// Folio books service
#[derive(Debug, Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the selected deployment
    Serve(ServeArgs),
    /// Print the routes exposed by a deployment
    Routes(RoutesArgs),
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// books-v1, books-v2, header, or url
    #[arg(long)]
    deployment: Option<Deployment>,
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Debug, Args)]
struct RoutesArgs {
    #[arg(long)]
    deployment: Option<Deployment>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings =
        Settings::load().with_context(|| "failed to load Folio settings")?;

    match cli.command {
        Command::Serve(args) => {
            if let Some(deployment) = args.deployment {
                settings.deployment = deployment;
            }
            if let Some(host) = args.host {
                settings.server.host = host;
            }
            if let Some(port) = args.port {
                settings.server.port = port;
            }

            folio_telemetry::init(&settings.telemetry)?;
            tracing::info!(
                env = ?settings.environment,
                deployment = %settings.deployment,
                "folio serve starting"
            );
            folio_app::run(settings).await
        }
        Command::Routes(args) => {
            if let Some(deployment) = args.deployment {
                settings.deployment = deployment;
            }
            print_routes(&settings);
            Ok(())
        }
    }
}

fn print_routes(settings: &Settings) {
    let registry = folio_app::build_registry(settings);
    let document = folio_http::router::openapi_document(&registry);

    println!("deployment: {}", settings.deployment);
    let Some(paths) = document["paths"].as_object() else {
        return;
    };
    for (path, item) in paths {
        let Some(methods) = item.as_object() else {
            continue;
        };
        for method in methods.keys() {
            println!("{:<6} {}", method.to_uppercase(), path);
        }
    }
}
