use std::path::PathBuf;

use clap::Parser;
use openai_usage::{AdminClient, CostParams, CostQuery, CostsPage, Env, UsageConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "openai-costs",
    version,
    about = "Query the OpenAI organization costs endpoint"
)]
struct Cli {
    /// Start of the reporting window, unix seconds (inclusive)
    #[arg(long, allow_negative_numbers = true)]
    start_time: i64,

    /// End of the reporting window, unix seconds (exclusive)
    #[arg(long, allow_negative_numbers = true)]
    end_time: Option<i64>,

    /// Bucket granularity forwarded as-is (e.g. 1d)
    #[arg(long)]
    bucket_width: Option<String>,

    /// Restrict to a project; repeat for several
    #[arg(long = "project-id")]
    project_ids: Vec<String>,

    /// Group results by a field; repeat for several
    #[arg(long = "group-by")]
    group_by: Vec<String>,

    #[arg(long, allow_negative_numbers = true)]
    limit: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    page: Option<i64>,

    /// TOML file with base_url, api_version, auth and http settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dotenv file consulted before the process environment
    #[arg(long)]
    dotenv: Option<PathBuf>,

    /// Override the API base URL from the config
    #[arg(long)]
    base_url: Option<String>,

    /// Print per-currency totals instead of the raw response
    #[arg(long)]
    summary: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(json_logs: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    let _ = if json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    (!values.is_empty()).then_some(values)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let mut config = match cli.config.as_ref() {
        Some(path) => UsageConfig::load(path).await?,
        None => UsageConfig::default(),
    };
    if let Some(base_url) = cli.base_url {
        config.base_url = Some(base_url);
    }
    let env = match cli.dotenv.as_ref() {
        Some(path) => Env::load_dotenv(path).await?,
        None => Env::default(),
    };

    let client = AdminClient::from_config(&config, &env).await?;
    let body = CostQuery::fetch(
        &client,
        CostParams {
            start_time: cli.start_time,
            end_time: cli.end_time,
            bucket_width: cli.bucket_width,
            project_ids: non_empty(cli.project_ids),
            group_by: non_empty(cli.group_by),
            limit: cli.limit,
            page: cli.page,
        },
    )
    .await?;

    if cli.summary {
        let page = CostsPage::from_value(&body)?;
        for (currency, total) in page.total_by_currency() {
            println!("{currency}\t{total:.2}");
        }
        if let (Some(true), Some(next_page)) = (page.has_more, page.next_page.as_deref()) {
            eprintln!("more results available (next_page={next_page})");
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&body)?);
    }
    Ok(())
}
