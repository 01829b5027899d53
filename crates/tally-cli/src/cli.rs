use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tally",
    about = "Tally — in-memory timesheet record service",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the timesheet API server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind the HTTP listener to
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub bind: String,

    /// Browser origin allowed by CORS; all origins when omitted
    #[arg(long)]
    pub cors_origin: Option<String>,
}
