use clap::{Parser, Subcommand};
use anyhow::Result;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "dsolve")]
#[command(about = "Generates structured multi-language solutions for algorithm problems via a generative AI provider", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Enable verbose debug output")]
    verbose: bool,

    #[arg(long, global = true, help = "Model name override")]
    model: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Solve a problem statement and print the structured bundle")]
    Solve {
        #[arg(help = "Problem statement, or path to a file containing it")]
        problem: String,

        #[arg(
            long,
            value_delimiter = ',',
            default_value = "python,c++,java",
            help = "Comma-separated output languages"
        )]
        languages: Vec<String>,

        #[arg(long, help = "Save the problem and bundle under .dsolve/sessions")]
        save: bool,

        #[arg(long, help = "Skip the interactive follow-up loop")]
        no_follow_up: bool,
    },

    #[command(about = "Analyze a code file and explain it")]
    Inspect {
        #[arg(help = "Path to the code file")]
        file: PathBuf,

        #[arg(long, help = "Task to solve against the code instead of a plain explanation")]
        task: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = cli::Config {
        verbose: cli.verbose,
        model: cli.model,
    };

    match cli.command {
        Commands::Solve {
            problem,
            languages,
            save,
            no_follow_up,
        } => {
            cli::solve(problem, languages, save, no_follow_up, &config).await?;
        }
        Commands::Inspect { file, task } => {
            cli::inspect(file, task, &config).await?;
        }
    }

    Ok(())
}
