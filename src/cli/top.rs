use std::num::NonZeroUsize;

use clap::Parser;
use tracing::instrument;
use vacman::{VacancyStore, top_n};

use super::{Context, OutputFormat, print_vacancies};

/// Command arguments for `vacman top`.
#[derive(Debug, Parser)]
pub struct Top {
    /// How many vacancies to show
    n: NonZeroUsize,

    /// Output format (default: pretty)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Top {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let store = context.open_store()?;
        show_top(&store, self.n, self.output)
    }
}

/// Print the `n` best paid saved vacancies.
pub fn show_top<S>(store: &S, n: NonZeroUsize, output: OutputFormat) -> anyhow::Result<()>
where
    S: VacancyStore + ?Sized,
{
    let vacancies = store.query("")?;
    if vacancies.is_empty() && output == OutputFormat::Pretty {
        println!("No saved vacancies.");
        return Ok(());
    }

    print_vacancies(&top_n(vacancies, n), output)
}

/// Parse a user-supplied count for the top listing.
pub fn parse_count(input: &str) -> Result<NonZeroUsize, &'static str> {
    let count: usize = input
        .trim()
        .parse()
        .map_err(|_| "Enter a whole number")?;
    NonZeroUsize::new(count).ok_or("The number must be positive")
}
