//! Dose log commands.

use clap::Subcommand;

use caffeine_core::{format_amount, format_hour, parse_hours, Config, DoseAmount, DoseStore};

#[derive(Subcommand)]
pub enum DoseAction {
    /// Add a dose at one or more hours
    Add {
        /// Comma-separated whole hours, 0-23 (e.g. "8,13")
        hours: String,
        /// Amount in cups of coffee (default: 1)
        #[arg(long, conflicts_with = "mg")]
        cups: Option<f64>,
        /// Amount in milligrams of caffeine
        #[arg(long)]
        mg: Option<f64>,
    },
    /// Remove a dose by its number in `dose list`
    Remove {
        /// 1-based position
        index: usize,
    },
    /// List doses
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove all doses
    Clear,
}

pub fn run(action: DoseAction, store: &DoseStore) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DoseAction::Add { hours, cups, mg } => {
            let hours = parse_hours(&hours)?;
            let amount = match (cups, mg) {
                (_, Some(mg)) => DoseAmount::Milligrams(mg),
                (Some(cups), None) => DoseAmount::Cups(cups),
                (None, None) => DoseAmount::default(),
            };

            let mut log = store.load()?;
            let added = log.add(&hours, amount)?;
            store.save(&log)?;

            let unit = Config::load_or_default().display.unit;
            let amount_mg = amount.to_mg()?;
            for hour in &hours {
                println!(
                    "Added {} at {}",
                    format_amount(amount_mg, unit),
                    format_hour(f64::from(*hour))
                );
            }
            tracing::info!(added, total = log.len(), "doses added");
        }
        DoseAction::Remove { index } => {
            let mut log = store.load()?;
            let position = index
                .checked_sub(1)
                .ok_or("dose numbers start at 1")?;
            let removed = log.remove(position)?;
            store.save(&log)?;

            let unit = Config::load_or_default().display.unit;
            println!(
                "Removed {} at {}",
                format_amount(removed.amount_mg, unit),
                format_hour(removed.hour)
            );
        }
        DoseAction::List { json } => {
            let log = store.load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&log)?);
                return Ok(());
            }
            if log.is_empty() {
                println!("No doses logged.");
                return Ok(());
            }

            let unit = Config::load_or_default().display.unit;
            for (i, dose) in log.doses().iter().enumerate() {
                println!(
                    "{:>3}. {:>5} — {}",
                    i + 1,
                    format_hour(dose.hour),
                    format_amount(dose.amount_mg, unit)
                );
            }
            println!("\nTotal: {}", format_amount(log.total_mg(), unit));
        }
        DoseAction::Clear => {
            let mut log = store.load()?;
            let count = log.len();
            log.clear();
            store.save(&log)?;
            println!("Cleared {count} dose(s)");
        }
    }
    Ok(())
}
