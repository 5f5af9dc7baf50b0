use clap::Parser;
use tracing::instrument;
use vacman::VacancyStore;

use super::{Context, OutputFormat, print_vacancies};

/// Command arguments for `vacman list`.
#[derive(Debug, Parser)]
pub struct List {
    /// Output format (default: pretty)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl List {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let store = context.open_store()?;
        let vacancies = store.query("")?;

        if vacancies.is_empty() && self.output == OutputFormat::Pretty {
            println!("No saved vacancies.");
            return Ok(());
        }

        print_vacancies(&vacancies, self.output)
    }
}
