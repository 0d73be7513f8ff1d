use crate::cli::{Command, ConfigureArgs, RunArgs, CLI};
use anyhow::{bail, Context, Result};
use clap::CommandFactory;
use kurz_core::{Mapping, MappingError, ShortCode};
use kurz_generator::RandomGenerator;
use kurz_mapping::MappingService;
use kurz_redirector::{serve, shutdown_signal};
use kurz_storage::YamlFileRepository;
use serde::Serialize;
use std::net::SocketAddr;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

type Service = MappingService<YamlFileRepository, RandomGenerator>;

#[derive(Serialize)]
struct ListEntry<'a> {
    key: &'a ShortCode,
    url: &'a str,
    used: u64,
}

/// Runs the operation selected on the command line.
pub async fn dispatch(cli: CLI) -> Result<ExitCode> {
    if cli.help {
        eprintln!("{}", CLI::command().render_help());
        return Ok(ExitCode::SUCCESS);
    }

    if cli.command.is_some() && (cli.list || cli.delete.is_some()) {
        bail!("-l and -d cannot be combined with a command");
    }

    match cli.command {
        Some(Command::Init) => init(&cli.store_path).await,
        Some(Command::Configure(args)) => {
            let service = open(&cli.store_path).await?;
            configure(&service, args).await
        }
        Some(Command::Run(args)) => {
            let service = open(&cli.store_path).await?;
            run(service, args).await
        }
        None if cli.list => {
            let service = open(&cli.store_path).await?;
            list(&service, cli.json).await
        }
        None => match cli.delete {
            Some(key) => {
                let service = open(&cli.store_path).await?;
                delete(&service, key).await
            }
            None => {
                eprintln!("{}", CLI::command().render_help());
                Ok(ExitCode::FAILURE)
            }
        },
    }
}

async fn open(store_path: &Path) -> Result<Service> {
    let repository = YamlFileRepository::open(store_path)
        .await
        .with_context(|| format!("failed to load store {}", store_path.display()))?;
    Ok(MappingService::new(repository, RandomGenerator::default()))
}

async fn init(store_path: &Path) -> Result<ExitCode> {
    if YamlFileRepository::create(store_path).await? {
        println!("Created empty store {}", store_path.display());
    } else {
        println!("Store {} already exists", store_path.display());
    }
    Ok(ExitCode::SUCCESS)
}

async fn configure(service: &Service, args: ConfigureArgs) -> Result<ExitCode> {
    // An empty key means "generate one".
    let code = args
        .key
        .filter(|key| !key.is_empty())
        .map(ShortCode::new)
        .transpose()?;
    let url = args.url.unwrap_or_default();

    let code = service.append(code, url.clone()).await?;
    println!("Value: {code} - URL: {url} is appended to config file!");
    Ok(ExitCode::SUCCESS)
}

async fn delete(service: &Service, key: String) -> Result<ExitCode> {
    let code = ShortCode::new_unchecked(key);

    match service.delete(&code).await {
        Ok(()) => {
            println!("{code} is deleted from config file!");
            Ok(ExitCode::SUCCESS)
        }
        Err(MappingError::NotFound(_)) => {
            println!("{code} is not found in config file!");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

async fn list(service: &Service, json: bool) -> Result<ExitCode> {
    let records = service.list().await?;

    if json {
        let entries: Vec<ListEntry> = records
            .iter()
            .map(|(code, record)| ListEntry {
                key: code,
                url: &record.url,
                used: record.used,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("Redirection list:");
        for (code, record) in &records {
            println!("Value: {code} - URL: {} - Used: {}", record.url, record.used);
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn run(service: Service, args: RunArgs) -> Result<ExitCode> {
    let addr = SocketAddr::new(args.host, args.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to listen on {addr}"))?;

    info!(
        listen_addr = %addr,
        store_path = %service.repository().path().display(),
        "server is running"
    );

    serve(listener, Arc::new(service), shutdown_signal()).await?;
    Ok(ExitCode::SUCCESS)
}
