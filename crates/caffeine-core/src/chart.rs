//! Chart datasets and text rendering for caffeine curves.
//!
//! [`ChartData`] is the unit-scaled, labelled view of [`CaffeineLevels`]
//! that any plotting front end consumes: a total curve first, then one
//! dashed curve per dose.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::format::{format_hour, format_tooltip, format_y_value, DisplayUnit};
use crate::model::{CaffeineLevels, Dose};

/// Line colours for per-dose curves, cycled by dose index.
pub const DOSE_PALETTE: [(u8, u8, u8); 8] = [
    (124, 58, 237),
    (37, 99, 235),
    (20, 184, 166),
    (245, 158, 11),
    (239, 68, 68),
    (16, 185, 129),
    (168, 85, 247),
    (59, 130, 246),
];

/// Dose curves are listed in the legend only up to this many doses.
pub const DEFAULT_LEGEND_LIMIT: usize = 6;

const TOTAL_COLOR: &str = "#7c3aed";
const TOTAL_FILL: &str = "rgba(124, 58, 237, 0.08)";

/// Whether a dataset is the total curve or a single dose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Total,
    Dose,
}

/// One plotted line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub kind: DatasetKind,
    /// Line colour
    pub color: String,
    /// Area or legend swatch colour
    pub fill_color: String,
    /// Values scaled to the display unit, aligned with the time points
    pub values: Vec<f64>,
    pub in_legend: bool,
}

/// Colour of dose `index` at the given alpha.
pub fn dose_color(index: usize, alpha: f64) -> String {
    let (r, g, b) = DOSE_PALETTE[index % DOSE_PALETTE.len()];
    format!("rgba({r}, {g}, {b}, {alpha})")
}

/// Everything needed to draw the caffeine chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub unit: DisplayUnit,
    pub x_label: String,
    pub y_label: String,
    pub time_points: Vec<f64>,
    /// Total curve first, then one dataset per dose in dose order
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    /// Build chart datasets from evaluated levels.
    ///
    /// `doses` must be the slice the levels were evaluated from; it supplies
    /// the per-dose labels.
    pub fn build(
        levels: &CaffeineLevels,
        doses: &[Dose],
        unit: DisplayUnit,
        legend_limit: usize,
    ) -> Self {
        let scale = unit.scale();
        let scaled = |series: &[f64]| series.iter().map(|v| v * scale).collect::<Vec<_>>();

        let mut datasets = Vec::with_capacity(doses.len() + 1);
        datasets.push(Dataset {
            label: unit.total_label().to_string(),
            kind: DatasetKind::Total,
            color: TOTAL_COLOR.to_string(),
            fill_color: TOTAL_FILL.to_string(),
            values: scaled(&levels.total),
            in_legend: true,
        });

        let show_doses = doses.len() <= legend_limit;
        for (idx, (dose, curve)) in doses.iter().zip(&levels.per_dose).enumerate() {
            datasets.push(Dataset {
                label: format!("{} dose", format_hour(dose.hour)),
                kind: DatasetKind::Dose,
                color: dose_color(idx, 0.6),
                fill_color: dose_color(idx, 0.25),
                values: scaled(curve),
                in_legend: show_doses,
            });
        }

        Self {
            unit,
            x_label: "Hour of day".to_string(),
            y_label: unit.axis_label().to_string(),
            time_points: levels.time_points.clone(),
            datasets,
        }
    }

    pub fn total(&self) -> &Dataset {
        &self.datasets[0]
    }

    pub fn dose_datasets(&self) -> &[Dataset] {
        &self.datasets[1..]
    }

    /// Tooltip for sample `index`: the hour as title, then one line per dataset.
    pub fn tooltip(&self, index: usize) -> Option<(String, Vec<String>)> {
        let hour = *self.time_points.get(index)?;
        let lines = self
            .datasets
            .iter()
            .map(|d| format_tooltip(&d.label, d.values[index], self.unit))
            .collect();
        Some((format_hour(hour), lines))
    }

    /// CSV with one row per sample: `hour,total,<dose…>`.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("hour");
        for dataset in &self.datasets {
            let name = match dataset.kind {
                DatasetKind::Total => "total",
                DatasetKind::Dose => dataset.label.as_str(),
            };
            out.push(',');
            out.push_str(name);
        }
        out.push('\n');

        for (i, t) in self.time_points.iter().enumerate() {
            let _ = write!(out, "{t}");
            for dataset in &self.datasets {
                let _ = write!(out, ",{:.4}", dataset.values[i]);
            }
            out.push('\n');
        }
        out
    }
}

/// Layout of the text chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsciiChartOptions {
    /// Plot columns, excluding the y-axis labels
    pub width: usize,
    /// Plot rows
    pub height: usize,
    /// Hour to mark with a vertical guide, e.g. the current time
    pub marker_hour: Option<f64>,
}

impl Default for AsciiChartOptions {
    fn default() -> Self {
        Self {
            width: 72,
            height: 12,
            marker_hour: None,
        }
    }
}

/// Render the total curve as a block chart with hour ticks every 2 hours.
pub fn render_ascii(chart: &ChartData, options: &AsciiChartOptions) -> String {
    let width = options.width.max(12);
    let height = options.height.max(3);
    let values = &chart.total().values;
    let n = values.len();
    let horizon = chart.time_points.last().copied().unwrap_or(0.0);
    let scale = chart.unit.scale();

    let column_value = |col: usize| -> f64 {
        if n == 0 {
            return 0.0;
        }
        let idx = (col as f64 * (n - 1) as f64 / (width - 1) as f64).round() as usize;
        values[idx.min(n - 1)]
    };
    let hour_column = |hour: f64| -> Option<usize> {
        if horizon <= 0.0 || !(0.0..=horizon).contains(&hour) {
            return None;
        }
        Some((hour / horizon * (width - 1) as f64).round() as usize)
    };

    let peak = values.iter().copied().fold(0.0_f64, f64::max);
    let y_max = if peak > 0.0 { peak } else { 1.0 };
    let levels: Vec<f64> = (0..width)
        .map(|c| column_value(c) / y_max * height as f64)
        .collect();
    let marker_col = options.marker_hour.and_then(hour_column);

    let top_label = format_y_value(y_max / scale, chart.unit);
    let mid_label = format_y_value(y_max / 2.0 / scale, chart.unit);
    let zero_label = format_y_value(0.0, chart.unit);
    let label_width = top_label.len().max(mid_label.len()).max(zero_label.len());
    let mid_row = height.div_ceil(2);

    let mut output = format!("\n{}\n", chart.y_label);
    output.push_str(&"─".repeat(label_width + 2 + width));
    output.push('\n');

    for row in (1..=height).rev() {
        let (label, axis) = if row == height {
            (top_label.as_str(), '┤')
        } else if row == mid_row {
            (mid_label.as_str(), '┤')
        } else if row == 1 {
            (zero_label.as_str(), '┤')
        } else {
            ("", '│')
        };
        let _ = write!(output, "{label:>label_width$} {axis}");
        for (col, &level) in levels.iter().enumerate() {
            let cell = if level >= row as f64 {
                '█'
            } else if level >= row as f64 - 0.5 && level > 0.0 {
                '▄'
            } else if Some(col) == marker_col {
                '┊'
            } else {
                ' '
            };
            output.push(cell);
        }
        output.push('\n');
    }

    // x axis with a tick every 2 hours
    let ticks: Vec<(usize, f64)> = (0u32..)
        .map(|i| f64::from(i) * 2.0)
        .take_while(|&h| h <= horizon)
        .filter_map(|h| hour_column(h).map(|c| (c, h)))
        .collect();
    let mut axis: Vec<char> = vec!['─'; width];
    for &(col, _) in &ticks {
        axis[col] = '┬';
    }
    let _ = writeln!(
        output,
        "{:>label_width$} └{}",
        "",
        axis.into_iter().collect::<String>()
    );

    let mut tick_line: Vec<char> = vec![' '; width + 8];
    let mut next_free = 0;
    for &(col, hour) in &ticks {
        let label = format_hour(hour);
        let start = col.saturating_sub(label.len() / 2);
        if start < next_free || start + label.len() > tick_line.len() {
            continue;
        }
        for (offset, ch) in label.chars().enumerate() {
            tick_line[start + offset] = ch;
        }
        next_free = start + label.len() + 1;
    }
    let _ = writeln!(
        output,
        "{:>label_width$}  {}",
        "",
        tick_line.into_iter().collect::<String>().trim_end()
    );
    let _ = writeln!(output, "{:>label_width$}  {}", "", chart.x_label);

    output.push_str(&"─".repeat(label_width + 2 + width));
    output.push('\n');
    let _ = writeln!(output, "● {}", chart.total().label);
    for dataset in chart.dose_datasets().iter().filter(|d| d.in_legend) {
        let _ = writeln!(output, "○ {}", dataset.label);
    }

    if peak > 0.0 {
        if let Some(idx) = values.iter().position(|&v| v == peak) {
            let _ = writeln!(
                output,
                "Peak: {} at {}",
                format_y_value(peak / scale, chart.unit),
                format_hour(chart.time_points[idx])
            );
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{evaluate, DecayParams};

    fn chart_for(doses: &[Dose], unit: DisplayUnit) -> ChartData {
        let levels = evaluate(doses, &DecayParams::default()).unwrap();
        ChartData::build(&levels, doses, unit, DEFAULT_LEGEND_LIMIT)
    }

    #[test]
    fn total_dataset_comes_first() {
        let doses = vec![Dose::new(8.0, 95.0), Dose::new(13.0, 95.0)];
        let chart = chart_for(&doses, DisplayUnit::Mg);

        assert_eq!(chart.datasets.len(), 3);
        assert_eq!(chart.total().kind, DatasetKind::Total);
        assert_eq!(chart.total().label, "Total caffeine (mg)");
        assert_eq!(chart.dose_datasets()[0].label, "8 AM dose");
        assert_eq!(chart.dose_datasets()[1].label, "1 PM dose");
        assert_eq!(chart.y_label, "Caffeine (mg)");
    }

    #[test]
    fn cups_scale_values() {
        let doses = vec![Dose::new(8.0, 95.0)];
        let chart = chart_for(&doses, DisplayUnit::Cups);
        let idx = 80;
        assert!((chart.total().values[idx] - 1.0).abs() < 1e-12);
        assert_eq!(chart.total().label, "Total caffeine (cups equivalent)");
    }

    #[test]
    fn palette_cycles_after_eight_doses() {
        assert_eq!(dose_color(0, 0.6), "rgba(124, 58, 237, 0.6)");
        assert_eq!(dose_color(8, 0.6), dose_color(0, 0.6));
        assert_eq!(dose_color(3, 0.25), "rgba(245, 158, 11, 0.25)");
    }

    #[test]
    fn legend_hides_dose_curves_past_limit() {
        let few: Vec<Dose> = (0..6u8).map(|h| Dose::new(f64::from(h) * 2.0, 50.0)).collect();
        let chart = chart_for(&few, DisplayUnit::Mg);
        assert!(chart.dose_datasets().iter().all(|d| d.in_legend));

        let many: Vec<Dose> = (0..7u8).map(|h| Dose::new(f64::from(h) * 2.0, 50.0)).collect();
        let chart = chart_for(&many, DisplayUnit::Mg);
        assert!(chart.total().in_legend);
        assert!(chart.dose_datasets().iter().all(|d| !d.in_legend));
    }

    #[test]
    fn csv_has_header_and_one_row_per_sample() {
        let doses = vec![Dose::new(8.0, 95.0)];
        let chart = chart_for(&doses, DisplayUnit::Mg);
        let csv = chart.to_csv();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "hour,total,8 AM dose");
        assert_eq!(lines.len(), 242);
        assert_eq!(lines[1], "0,0.0000,0.0000");
        assert_eq!(lines[81], "8,95.0000,95.0000");
    }

    #[test]
    fn tooltip_lists_every_dataset() {
        let doses = vec![Dose::new(8.0, 95.0)];
        let chart = chart_for(&doses, DisplayUnit::Cups);
        let (title, lines) = chart.tooltip(80).unwrap();
        assert_eq!(title, "8 AM");
        assert_eq!(lines[0], " Total caffeine (cups equivalent): 1.00 cups");
        assert_eq!(lines[1], " 8 AM dose: 1.00 cups");
        assert!(chart.tooltip(9999).is_none());
    }

    #[test]
    fn ascii_chart_has_axes_and_legend() {
        let doses = vec![Dose::new(8.0, 95.0)];
        let chart = chart_for(&doses, DisplayUnit::Mg);
        let text = render_ascii(&chart, &AsciiChartOptions::default());

        assert!(text.contains("Caffeine (mg)"));
        assert!(text.contains("95 mg ┤"));
        assert!(text.contains("12 AM"));
        assert!(text.contains("Hour of day"));
        assert!(text.contains("● Total caffeine (mg)"));
        assert!(text.contains("○ 8 AM dose"));
        assert!(text.contains("Peak: 95 mg at 8 AM"));
        assert!(text.contains('█'));
    }

    #[test]
    fn ascii_chart_of_empty_log_is_flat() {
        let chart = chart_for(&[], DisplayUnit::Cups);
        let text = render_ascii(&chart, &AsciiChartOptions::default());
        assert!(!text.contains('█'));
        assert!(!text.contains("Peak"));
    }

    #[test]
    fn ascii_chart_draws_marker() {
        let chart = chart_for(&[Dose::new(20.0, 95.0)], DisplayUnit::Cups);
        let options = AsciiChartOptions {
            marker_hour: Some(6.0),
            ..AsciiChartOptions::default()
        };
        assert!(render_ascii(&chart, &options).contains('┊'));
    }
}
