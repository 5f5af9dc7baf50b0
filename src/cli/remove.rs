use clap::Parser;
use tracing::instrument;
use vacman::VacancyStore;

use super::{
    Context,
    terminal::{Colorize, print_warning},
};

/// Command arguments for `vacman remove`.
#[derive(Debug, Parser)]
pub struct Remove {
    /// The link of the vacancy to remove
    url: String,
}

impl Remove {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let mut store = context.open_store()?;

        if store.remove(&self.url)? == 0 {
            print_warning(&format!("No saved vacancy links to {}", self.url));
        } else {
            println!("{}", format!("Removed vacancy {}", self.url).success());
        }

        Ok(())
    }
}
