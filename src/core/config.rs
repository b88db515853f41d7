use crate::config::Config;
use crate::errors::AppResult;

pub struct ConfigLogic;

impl ConfigLogic {
    /// Print the effective configuration (defaults, file and CLI
    /// overrides merged) as YAML. The output is a valid `--config` file.
    pub fn print(cfg: &Config) -> AppResult<()> {
        let yaml = cfg.to_yaml()?;
        println!("{}", yaml.trim_end());
        Ok(())
    }
}
