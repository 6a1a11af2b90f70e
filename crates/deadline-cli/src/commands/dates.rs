use clap::Subcommand;
use deadline_core::dates::{from_storage_format, to_storage_format};
use deadline_core::{Config, ConfigError, CoreError, DateSpec};

#[derive(Subcommand)]
pub enum DatesAction {
    /// Show the configured dates and the resolved window
    Show,
    /// Set the begin date (DD-MM-YYYY)
    SetBegin {
        /// Date as DD-MM-YYYY
        date: String,
    },
    /// Set the end date (DD-MM-YYYY)
    SetEnd {
        /// Date as DD-MM-YYYY
        date: String,
    },
    /// Remove both dates
    Clear,
}

fn describe(spec: Option<&DateSpec>) -> String {
    match spec {
        None => "(not set)".into(),
        Some(DateSpec::Text(text)) => from_storage_format(text).unwrap_or_else(|_| text.clone()),
        Some(utc) => utc.to_string(),
    }
}

/// Mention a window problem without failing the command that caused it.
fn warn_if_unusable(config: &Config) {
    match config.window() {
        Ok(_) | Err(CoreError::Config(ConfigError::MissingKey(_))) => {}
        Err(e) => eprintln!("warning: countdown disabled: {e}"),
    }
}

pub fn run(action: DatesAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;

    match action {
        DatesAction::Show => {
            println!("begin: {}", describe(config.begin.as_ref()));
            println!("end:   {}", describe(config.end.as_ref()));
            println!("zone:  {}", config.get("date_zone").unwrap_or_default());
            match config.window() {
                Ok(window) => println!(
                    "window: {} .. {} ({}s)",
                    window.begin(),
                    window.end(),
                    window.period()
                ),
                Err(e) => println!("window: invalid ({e})"),
            }
        }
        DatesAction::SetBegin { date } => {
            config.begin = Some(DateSpec::Text(to_storage_format(&date)?));
            config.save()?;
            println!("begin set to {}", date.trim());
            warn_if_unusable(&config);
        }
        DatesAction::SetEnd { date } => {
            config.end = Some(DateSpec::Text(to_storage_format(&date)?));
            config.save()?;
            println!("end set to {}", date.trim());
            warn_if_unusable(&config);
        }
        DatesAction::Clear => {
            config.begin = None;
            config.end = None;
            config.save()?;
            println!("dates cleared");
        }
    }
    Ok(())
}
