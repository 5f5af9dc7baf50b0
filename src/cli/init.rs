use tracing::instrument;
use vacman::Config;

use super::{Context, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Init {}

impl Init {
    #[instrument(skip(self, context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let path = &context.config_path;
        if path.exists() {
            anyhow::bail!(
                "Configuration already exists at {} (remove it first to start over)",
                path.display()
            );
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", parent.display()))?;
        }

        Config::default()
            .save(path)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", path.display()))?;

        println!(
            "{}",
            format!("Wrote default configuration to {}", path.display()).success()
        );
        println!();
        println!("Next steps:");
        println!("  vacman search \"rust developer\" --area Москва");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn init_writes_default_config() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("settings").join("vacman.toml");
        let context = Context::load(path.clone(), None);

        Init {}.run(&context).unwrap();

        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("vacman.toml");
        std::fs::write(&path, "_version = \"1\"\nper_page = 5\n").unwrap();
        let context = Context::load(path.clone(), None);

        assert!(Init {}.run(&context).is_err());
        assert_eq!(Config::load(&path).unwrap().per_page, 5);
    }
}
