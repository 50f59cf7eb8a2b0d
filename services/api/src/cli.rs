use crate::demo::{run_demo, run_pauta_report, DemoArgs, PautaReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use pauta::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Pauta Grading Service",
    about = "Serve and demonstrate the grade aggregation and pauta document engine",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Generate pauta documents from the seeded demo class
    Pauta {
        #[command(subcommand)]
        command: PautaCommand,
    },
    /// Run an end-to-end CLI demo covering all three document shapes
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum PautaCommand {
    /// Print a pauta document for the demo class
    Report(PautaReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Pauta {
            command: PautaCommand::Report(args),
        } => run_pauta_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
