use std::fmt;

use dialoguer::{Input, Select, theme::ColorfulTheme};
use tracing::instrument;
use vacman::AreaId;

use super::{
    Context, OutputFormat,
    filter::show_matches,
    search::{choose_area, fetch, save_candidates},
    terminal::print_warning,
    top::{parse_count, show_top},
};

/// Actions offered by the interactive menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    Top,
    Filter,
    Exit,
}

impl Action {
    const ALL: [Self; 4] = [Self::Search, Self::Top, Self::Filter, Self::Exit];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Search => "Search for vacancies",
            Self::Top => "Show top vacancies by salary",
            Self::Filter => "Filter saved vacancies by keyword",
            Self::Exit => "Exit",
        };
        f.write_str(label)
    }
}

/// Run the interactive menu until the user exits.
#[instrument(level = "debug", skip(context))]
pub fn run(context: &Context) -> anyhow::Result<()> {
    let theme = ColorfulTheme::default();
    let platform = context.platform()?;
    let mut store = context.open_store()?;

    let region: String = Input::with_theme(&theme)
        .with_prompt("Region or city to search in (leave empty for the default)")
        .allow_empty(true)
        .interact_text()?;
    let area = area_for(&platform, &region, context.config.default_area_id);

    loop {
        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(&Action::ALL)
            .default(0)
            .interact()?;

        match Action::ALL[selection] {
            Action::Search => {
                let query: String = Input::with_theme(&theme)
                    .with_prompt("Search query")
                    .validate_with(|input: &String| non_blank(input, "The query"))
                    .interact_text()?;

                let result = fetch(&platform, query.trim(), area)
                    .and_then(|candidates| save_candidates(&mut store, candidates));
                if let Err(e) = result {
                    print_warning(&format!("{e:#}"));
                }
            }
            Action::Top => {
                let count: String = Input::with_theme(&theme)
                    .with_prompt("How many vacancies?")
                    .validate_with(|input: &String| parse_count(input).map(|_| ()))
                    .interact_text()?;
                let n = parse_count(&count).map_err(anyhow::Error::msg)?;

                show_top(&store, n, OutputFormat::Pretty)?;
            }
            Action::Filter => {
                let keyword: String = Input::with_theme(&theme)
                    .with_prompt("Keyword")
                    .validate_with(|input: &String| non_blank(input, "The keyword"))
                    .interact_text()?;

                show_matches(&store, keyword.trim(), OutputFormat::Pretty)?;
            }
            Action::Exit => {
                println!("Goodbye!");
                return Ok(());
            }
        }
    }
}

fn non_blank(input: &str, what: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        Err(format!("{what} must not be empty"))
    } else {
        Ok(())
    }
}

fn area_for<R>(resolver: &R, region: &str, default: AreaId) -> AreaId
where
    R: vacman::AreaResolver + ?Sized,
{
    if region.trim().is_empty() {
        default
    } else {
        choose_area(resolver, region, default)
    }
}

#[cfg(test)]
mod tests {
    use vacman::PlatformError;

    use super::*;

    struct Unreachable;

    impl vacman::AreaResolver for Unreachable {
        fn area_id(&self, _name: &str) -> Result<Option<AreaId>, PlatformError> {
            panic!("an empty region must not be resolved")
        }
    }

    #[test]
    fn empty_region_uses_default_without_lookup() {
        assert_eq!(area_for(&Unreachable, "", 113), 113);
        assert_eq!(area_for(&Unreachable, "   ", 2), 2);
    }

    #[test]
    fn blank_input_is_rejected() {
        assert_eq!(non_blank(" ", "The query"), Err("The query must not be empty".to_string()));
        assert_eq!(non_blank("rust", "The query"), Ok(()));
    }

    #[test]
    fn exit_is_the_last_action() {
        assert_eq!(Action::ALL.last(), Some(&Action::Exit));
        assert_eq!(Action::Exit.to_string(), "Exit");
    }
}
