use color_eyre::eyre::Result;
use spin_decide::{
    config::{
        self,
        CliAction,
    },
    logging,
};

mod client;
mod ui;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let config = match config::parse_cli_args(std::env::args().skip(1))? {
        CliAction::Run(config) => config,
        CliAction::Help => {
            println!("{}", config::usage());
            return Ok(());
        }
    };
    let _guard = logging::init_tracing(&config.log_dir)?;
    tracing::info!(ratio = config.ratio_mode, single = config.single_entry_mode, "spin-decide starting");
    client::run_app(config).await
}
