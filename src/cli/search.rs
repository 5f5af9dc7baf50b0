use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use indicatif::ProgressBar;
use tracing::instrument;
use vacman::{
    AreaId, AreaResolver, Candidate, VacancySource, VacancyStore,
    platform::{AreaChoice, ImportReport, import_candidates, resolve_area},
};

use super::{
    Context,
    terminal::{Colorize, print_warning},
};

/// Command arguments for `vacman search`.
#[derive(Debug, Parser)]
pub struct Search {
    /// Text to search for, such as a job title
    query: String,

    /// Region or city to search in (defaults to the configured area)
    #[arg(long, short)]
    area: Option<String>,
}

impl Search {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let query = self.query.trim();
        if query.is_empty() {
            anyhow::bail!("Search query must not be empty");
        }

        let platform = context.platform()?;
        let default_area = context.config.default_area_id;
        let area = self
            .area
            .as_deref()
            .map_or(default_area, |name| choose_area(&platform, name, default_area));

        let candidates = fetch(&platform, query, area)?;
        let mut store = context.open_store()?;
        save_candidates(&mut store, candidates)?;

        Ok(())
    }
}

/// Resolve a place name, telling the user when the default area is used.
pub fn choose_area<R>(resolver: &R, name: &str, default: AreaId) -> AreaId
where
    R: AreaResolver + ?Sized,
{
    let choice = resolve_area(resolver, name.trim(), default);
    if let AreaChoice::Default(id) = choice {
        print_warning(&format!(
            "Region '{}' not found. Using the default area ({id}).",
            name.trim()
        ));
    }
    choice.id()
}

/// Search the platform, showing a spinner while the request is in flight.
pub fn fetch<S>(source: &S, query: &str, area: AreaId) -> anyhow::Result<Vec<Candidate>>
where
    S: VacancySource + ?Sized,
{
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Searching for '{query}'..."));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = source.vacancies(query, area);
    spinner.finish_and_clear();

    result.with_context(|| format!("Failed to search for '{query}'"))
}

/// Validate and save candidates, printing each accepted vacancy.
///
/// Candidates that fail validation are reported and skipped.
pub fn save_candidates<S>(store: &mut S, candidates: Vec<Candidate>) -> anyhow::Result<ImportReport>
where
    S: VacancyStore + ?Sized,
{
    if candidates.is_empty() {
        println!("No vacancies found for this query.");
        return Ok(ImportReport::default());
    }

    let report = import_candidates(store, candidates)?;

    for (vacancy, _) in &report.accepted {
        println!();
        print!("{vacancy}");
    }

    for rejected in &report.rejected {
        let label = if rejected.candidate.url.is_empty() {
            &rejected.candidate.name
        } else {
            &rejected.candidate.url
        };
        print_warning(&format!("Skipping vacancy '{label}': {}", rejected.error));
    }

    println!(
        "\n{}",
        format!(
            "Saved {} new vacancies ({} already saved, {} rejected)",
            report.added(),
            report.duplicates(),
            report.rejected.len()
        )
        .success()
    );

    Ok(report)
}
