use clap::Parser;
use tracing::instrument;
use vacman::{VacancyStore, filter_by_keyword};

use super::{Context, OutputFormat, print_vacancies};

/// Command arguments for `vacman filter`.
#[derive(Debug, Parser)]
pub struct Filter {
    /// Case-insensitive text to look for in vacancy descriptions
    keyword: String,

    /// Output format (default: pretty)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Filter {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let keyword = self.keyword.trim();
        if keyword.is_empty() {
            anyhow::bail!("Keyword must not be empty");
        }

        let store = context.open_store()?;
        show_matches(&store, keyword, self.output)
    }
}

/// Print saved vacancies whose description contains `keyword`.
pub fn show_matches<S>(store: &S, keyword: &str, output: OutputFormat) -> anyhow::Result<()>
where
    S: VacancyStore + ?Sized,
{
    let vacancies = filter_by_keyword(store, keyword)?;

    if output == OutputFormat::Pretty {
        if vacancies.is_empty() {
            println!("No vacancies mention '{keyword}'.");
            return Ok(());
        }
        println!("\nFound {} vacancies", vacancies.len());
    }

    print_vacancies(&vacancies, output)
}
