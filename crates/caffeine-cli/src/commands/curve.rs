//! Caffeine curve commands for displaying and exporting levels.

use chrono::{Local, Timelike};
use clap::{Subcommand, ValueEnum};

use caffeine_core::{
    format_hour, format_y_value, render_ascii, ChartData, Config, DecayParams, DisplayUnit,
    DoseStore,
};

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

#[derive(clap::Args)]
pub struct ModelArgs {
    /// Half-life in hours (overrides config)
    #[arg(long)]
    half_life: Option<f64>,
    /// Display unit: cups or mg (overrides config)
    #[arg(long)]
    unit: Option<DisplayUnit>,
}

#[derive(Subcommand)]
pub enum CurveAction {
    /// Show the caffeine curve as a text chart
    Show {
        #[command(flatten)]
        model: ModelArgs,
        /// Chart width in columns
        #[arg(long)]
        width: Option<usize>,
        /// Chart height in rows
        #[arg(long)]
        height: Option<usize>,
        /// Do not mark the current time
        #[arg(long)]
        no_now: bool,
    },
    /// Show caffeine level at an hour of day
    At {
        /// Hour as decimal (13.5) or HH:MM (defaults to now)
        hour: Option<String>,
        #[command(flatten)]
        model: ModelArgs,
    },
    /// Export sampled curves
    Export {
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,
        #[command(flatten)]
        model: ModelArgs,
    },
}

pub fn run(action: CurveAction, store: &DoseStore) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    match action {
        CurveAction::Show {
            model,
            width,
            height,
            no_now,
        } => show_curve(store, &config, &model, width, height, no_now),
        CurveAction::At { hour, model } => show_level_at(store, &config, &model, hour),
        CurveAction::Export { format, model } => export_curve(store, &config, &model, format),
    }
}

fn resolve(
    config: &Config,
    model: &ModelArgs,
) -> Result<(DecayParams, DisplayUnit), Box<dyn std::error::Error>> {
    let mut params = config.decay_params()?;
    if let Some(half_life) = model.half_life {
        params.half_life_hours = half_life;
        params.validate()?;
    }
    let unit = model.unit.unwrap_or(config.display.unit);
    Ok((params, unit))
}

fn build_chart(
    store: &DoseStore,
    config: &Config,
    model: &ModelArgs,
) -> Result<(ChartData, DecayParams), Box<dyn std::error::Error>> {
    let (params, unit) = resolve(config, model)?;
    let log = store.load()?;
    let levels = log.levels(&params)?;
    let chart = ChartData::build(&levels, log.doses(), unit, config.display.max_dose_curves);
    Ok((chart, params))
}

fn current_hour() -> f64 {
    let now = Local::now();
    f64::from(now.hour()) + f64::from(now.minute()) / 60.0
}

fn parse_hour_arg(input: &str) -> Result<f64, String> {
    let invalid = || format!("Invalid hour: '{input}'. Use a decimal hour (13.5) or HH:MM");
    let hour = if let Some((h, m)) = input.split_once(':') {
        let h: u32 = h.trim().parse().map_err(|_| invalid())?;
        let m: u32 = m.trim().parse().map_err(|_| invalid())?;
        if m >= 60 {
            return Err(invalid());
        }
        f64::from(h) + f64::from(m) / 60.0
    } else {
        input.trim().parse::<f64>().map_err(|_| invalid())?
    };
    if !hour.is_finite() || hour < 0.0 {
        return Err(invalid());
    }
    Ok(hour)
}

fn check_within_horizon(hour: f64, horizon_hours: f64) -> Result<f64, String> {
    if hour > horizon_hours {
        return Err(format!(
            "Hour {hour} is past the end of the curve ({horizon_hours} hours)"
        ));
    }
    Ok(hour)
}

fn show_curve(
    store: &DoseStore,
    config: &Config,
    model: &ModelArgs,
    width: Option<usize>,
    height: Option<usize>,
    no_now: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (chart, params) = build_chart(store, config, model)?;

    let mut options = config.chart_options();
    if let Some(width) = width {
        options.width = width;
    }
    if let Some(height) = height {
        options.height = height;
    }
    if !no_now {
        options.marker_hour = Some(current_hour());
    }

    println!("{}", render_ascii(&chart, &options));
    println!("Half-life: {:.1} hours", params.half_life_hours);
    if chart.dose_datasets().is_empty() {
        println!("\n  Tip: add a dose with `caffeine-cli dose add 8 --cups 1`.");
    }
    Ok(())
}

fn show_level_at(
    store: &DoseStore,
    config: &Config,
    model: &ModelArgs,
    hour: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let hour = match hour {
        Some(raw) => parse_hour_arg(&raw)?,
        None => current_hour(),
    };
    let (params, unit) = resolve(config, model)?;
    let hour = check_within_horizon(hour, params.horizon_hours)?;
    let log = store.load()?;
    let levels = log.levels(&params)?;
    let chart = ChartData::build(&levels, log.doses(), unit, config.display.max_dose_curves);

    let index = levels
        .sample_index(hour)
        .ok_or_else(|| format!("no samples for hour {hour}"))?;
    let (title, lines) = chart
        .tooltip(index)
        .ok_or_else(|| format!("no samples for hour {hour}"))?;

    println!("{title}");
    for line in lines {
        println!("{line}");
    }

    if let Some((peak_hour, peak_mg)) = levels.peak().filter(|&(_, mg)| mg > 0.0) {
        println!(
            "\nPeak: {} at {}",
            format_y_value(peak_mg, unit),
            format_hour(peak_hour)
        );
    }
    Ok(())
}

fn export_curve(
    store: &DoseStore,
    config: &Config,
    model: &ModelArgs,
    format: ExportFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let (chart, _) = build_chart(store, config, model)?;
    match format {
        ExportFormat::Json => println!("{}", serde_json::to_string_pretty(&chart)?),
        ExportFormat::Csv => print!("{}", chart.to_csv()),
    }
    Ok(())
}
