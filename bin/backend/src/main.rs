//! mlserve Binary
//!
//! `serve` (the default) runs the HTTP service on BIND_ADDR.
//! `train` runs one offline training and prints the outcome as JSON.

use clap::Parser;
use clap::Subcommand;
use mls_dto::TrainingRequest;
use mls_dto::Validate;
use mls_lifecycle::Manager;
use mls_server::Config;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    #[command(flatten)]
    config: Config,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Run the HTTP service")]
    Serve,
    #[command(about = "Train once and exit")]
    Train {
        #[arg(long, default_value = mls_core::DEFAULT_EXPERIMENT)]
        experiment: String,
        #[arg(long, default_value_t = mls_core::DEFAULT_ESTIMATORS)]
        trees: usize,
        #[arg(long, default_value_t = mls_core::DEFAULT_TEST_SIZE)]
        test_size: f32,
        #[arg(long, default_value_t = mls_core::DEFAULT_RANDOM_STATE)]
        seed: u64,
        #[arg(long)]
        samples: Option<usize>,
        #[arg(long)]
        depth: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mls_core::log();
    mls_core::kys();
    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => mls_server::run(cli.config).await,
        Command::Train {
            experiment,
            trees,
            test_size,
            seed,
            samples,
            depth,
        } => {
            let request = TrainingRequest {
                experiment_name: experiment,
                test_size,
                random_state: seed,
                n_estimators: trees,
                n_samples: samples,
                max_depth: depth,
            };
            request.validate()?;
            std::fs::create_dir_all(&cli.config.models)?;
            let manager = Manager::local(cli.config.models, cli.config.tracking);
            let trained = manager.train(&request).await?;
            println!("{}", serde_json::to_string_pretty(&trained)?);
            Ok(())
        }
    }
}
