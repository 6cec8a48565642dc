use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;

use route_resolver::config::load_config;
use route_resolver::routing::{descriptor, ResolveError, Resolver};

#[derive(Parser)]
#[command(name = "resolver-cli")]
#[command(about = "Resolve request descriptors against a route table", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a "VERB PATH" descriptor, or a path together with --method
    Resolve {
        target: String,

        #[arg(short, long)]
        method: Option<String>,
    },
    /// List the route table in evaluation order
    Routes,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}: {}", cli.config.display(), e);
            return ExitCode::FAILURE;
        }
    };
    let resolver = Resolver::from_config(&config.routes);

    match cli.command {
        Commands::Resolve { target, method } => {
            let descriptor = match method {
                Some(method) => descriptor(&method, &target),
                None => target,
            };
            resolve(&resolver, &descriptor, cli.json)
        }
        Commands::Routes => {
            if cli.json {
                println!("{}", json!(resolver.patterns()));
            } else {
                for (idx, route) in config.routes.iter().enumerate() {
                    match &route.name {
                        Some(name) => println!("{:>3}  {}  ({})", idx, route.pattern, name),
                        None => println!("{:>3}  {}", idx, route.pattern),
                    }
                }
            }
            ExitCode::SUCCESS
        }
    }
}

fn resolve(resolver: &Resolver, descriptor: &str, as_json: bool) -> ExitCode {
    match resolver.resolve_path(descriptor) {
        Ok(pattern) => {
            if as_json {
                println!("{}", json!({ "descriptor": descriptor, "pattern": pattern }));
            } else {
                println!("{}", pattern);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            if as_json {
                println!("{}", json!({ "descriptor": descriptor, "error": err.to_string() }));
            } else {
                eprintln!("Error: {}", err);
            }
            match err {
                ResolveError::RouteNotFound { .. } => ExitCode::from(1),
                ResolveError::MalformedPattern { .. } => ExitCode::from(2),
            }
        }
    }
}
