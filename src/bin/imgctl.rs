use clap::{Parser, Subcommand};
use huixing_image_client::{
    wait_for_completion, with_height, with_width, AppError, Config, HuixingImageClient,
    ImageOption, PollPolicy, TaskResult,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "imgctl", about = "CLI for the text-to-image webhook service", version)]
struct Cli {
    /// Override HUIXING_GENERATE_URL
    #[arg(global = true, long)]
    generate_url: Option<String>,

    /// Override HUIXING_QUERY_URL
    #[arg(global = true, long)]
    query_url: Option<String>,

    /// Override HUIXING_PORT (ComfyUI port forwarded to the service)
    #[arg(global = true, long)]
    port: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Clone, Copy)]
struct PollArgs {
    /// Seconds between status queries
    #[arg(long, default_value_t = 5)]
    interval: u64,
    /// Give up after this many seconds
    #[arg(long, default_value_t = 600)]
    timeout: u64,
}

impl From<PollArgs> for PollPolicy {
    fn from(args: PollArgs) -> Self {
        PollPolicy {
            interval: Duration::from_secs(args.interval.max(1)),
            timeout: Duration::from_secs(args.timeout),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Submit a prompt and print the task
    Generate {
        /// Prompt text
        #[arg(long, value_name = "TEXT")]
        prompt: String,
        /// Width
        #[arg(long)]
        width: Option<u32>,
        /// Height
        #[arg(long)]
        height: Option<u32>,
        /// Keep polling until the image is ready
        #[arg(long)]
        wait: bool,
        #[command(flatten)]
        poll: PollArgs,
    },
    /// Query a task once
    Status {
        /// Task ID returned by `generate`
        task_id: String,
    },
    /// Poll a task until it completes or the timeout elapses
    Wait {
        /// Task ID returned by `generate`
        task_id: String,
        #[command(flatten)]
        poll: PollArgs,
    },
    /// Download a completed image
    Download {
        /// Image URL reported by a completed task
        url: String,
        /// Output path (defaults to <HUIXING_DOWNLOAD_DIR>/<file name>)
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Load env and parse CLI
    Config::dotenv_load();
    let cli = Cli::parse();
    Config::print_env_vars();

    let mut conf = Config::new()?;
    if let Some(url) = cli.generate_url {
        conf.generate_url = url;
    }
    if let Some(url) = cli.query_url {
        conf.query_url = url;
    }
    if let Some(port) = cli.port {
        conf.port = port;
    }
    let client = HuixingImageClient::new(conf.client_config()?);

    match cli.command {
        Commands::Generate { prompt, width, height, wait, poll } => {
            let mut overrides: Vec<ImageOption> = Vec::new();
            if let Some(w) = width {
                overrides.push(with_width(w));
            }
            if let Some(h) = height {
                overrides.push(with_height(h));
            }

            let task = client.generate_image(&prompt, overrides).await?;
            if wait {
                wait_and_print(&client, task.task_id(), poll).await
            } else {
                print_result(&task)
            }
        }
        Commands::Status { task_id } => {
            let res = client.get_task_status(&task_id).await?;
            print_result(&res)
        }
        Commands::Wait { task_id, poll } => wait_and_print(&client, &task_id, poll).await,
        Commands::Download { url, out } => {
            let bytes = client.download_image(&url).await?;
            let path = match out {
                Some(p) => p,
                None => {
                    let dir = PathBuf::from(&conf.download_dir);
                    tokio::fs::create_dir_all(&dir).await.map_err(AppError::Io)?;
                    dir.join(file_name_from_url(&url))
                }
            };
            tokio::fs::write(&path, &bytes).await.map_err(AppError::Io)?;
            println!("Saved {} ({} bytes)", path.display(), bytes.len());
            Ok(())
        }
    }
}

async fn wait_and_print(
    client: &HuixingImageClient,
    task_id: &str,
    poll: PollArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    match wait_for_completion(client, task_id, &poll.into()).await {
        Ok(done) => print_result(&done),
        Err(AppError::PollTimeout { timeout, last }) => {
            print_result(&last)?;
            eprintln!("Error: task {} still processing after {:?}", last.task_id(), timeout);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

fn print_result(res: &TaskResult) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(res)?);
    Ok(())
}

fn file_name_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => "image.png".to_string(),
    }
}
