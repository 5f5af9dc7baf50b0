use std::path::PathBuf;

mod filter;
mod init;
mod list;
mod menu;
mod remove;
mod search;
mod terminal;
mod top;

use anyhow::Context as _;
use clap::ArgAction;
use filter::Filter;
use init::Init;
use list::List;
use remove::Remove;
use search::Search;
use terminal::Colorize;
use top::Top;
use vacman::{Config, HeadHunter, JsonVacancyStore, Vacancy};

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the configuration file
    #[arg(short, long, default_value = "vacman.toml", global = true)]
    config: PathBuf,

    /// The path to the vacancy store, overriding the configuration file
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let context = Context::load(self.config, self.store);

        self.command.unwrap_or(Command::Menu).run(&context)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Interactive menu (default)
    Menu,

    /// Search the job platform and save the results
    Search(Search),

    /// Show the best paid saved vacancies
    Top(Top),

    /// Show saved vacancies whose description contains a keyword
    Filter(Filter),

    /// Show every saved vacancy
    List(List),

    /// Remove a saved vacancy by its link
    Remove(Remove),

    /// Write a default configuration file
    Init(Init),
}

impl Command {
    fn run(self, context: &Context) -> anyhow::Result<()> {
        match self {
            Self::Menu => menu::run(context)?,
            Self::Search(command) => command.run(context)?,
            Self::Top(command) => command.run(context)?,
            Self::Filter(command) => command.run(context)?,
            Self::List(command) => command.run(context)?,
            Self::Remove(command) => command.run(context)?,
            Self::Init(command) => command.run(context)?,
        }
        Ok(())
    }
}

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    config_path: PathBuf,
    config: Config,
}

impl Context {
    fn load(config_path: PathBuf, store: Option<PathBuf>) -> Self {
        let mut config = Config::load_or_default(&config_path);
        if let Some(store) = store {
            config.store_path = store;
        }

        Self {
            config_path,
            config,
        }
    }

    fn open_store(&self) -> anyhow::Result<JsonVacancyStore> {
        JsonVacancyStore::open(self.config.store_path.clone()).with_context(|| {
            format!(
                "failed to open vacancy store at {}",
                self.config.store_path.display()
            )
        })
    }

    fn platform(&self) -> anyhow::Result<HeadHunter> {
        HeadHunter::from_config(&self.config).context("failed to create job platform client")
    }
}

/// Output formats for commands that print vacancies.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

/// Print vacancies as numbered blocks or as stored records.
fn print_vacancies(vacancies: &[Vacancy], output: OutputFormat) -> anyhow::Result<()> {
    match output {
        OutputFormat::Pretty => {
            for (i, vacancy) in vacancies.iter().enumerate() {
                println!("\n{}", format!("Vacancy #{}", i + 1).info());
                print!("{vacancy}");
            }
        }
        OutputFormat::Json => {
            let records: Vec<_> = vacancies.iter().map(Vacancy::to_record).collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }
    Ok(())
}
