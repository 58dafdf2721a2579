// Entry point and interactive shell.
//
// One render cycle mirrors the dashboard flow:
// - pick a dataset from the registry and load it,
// - profile its schema once (year column? country column? numeric columns),
// - take filter input (year range, country substring) and apply it,
// - print the data preview and the metric cards,
// - derive the three charts and export their specs as JSON for the
//   external charting layer.
//
// Cycles are independent: re-running one with the same dataset and filters
// produces identical output.
mod charts;
mod error;
mod filter;
mod loader;
mod metrics;
mod output;
mod registry;
mod schema;
mod types;
mod util;

use charts::ChartSpec;
use error::{DatasetError, SkipReason};
use filter::FilterState;
use registry::{DatasetDescriptor, DATASETS};
use schema::SchemaProfile;
use serde::Serialize;
use std::io::{self, Write};
use tracing_subscriber::{fmt, EnvFilter};
use util::format_int;

const PREVIEW_ROWS: usize = 15;

/// Print `prompt`, read one line of input and return it trimmed.
fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask the user whether to go back to the dataset menu after a cycle.
///
/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        match read_line("Back to Dataset Selection (Y/N): ").to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Numbered metric selector over the profiled numeric columns. Blank keeps
/// the first column, matching the dashboard's default selection.
fn prompt_metric(purpose: &str, numeric: &[String]) -> String {
    println!("Available metrics:");
    for (i, name) in numeric.iter().enumerate() {
        println!("  [{}] {}", i + 1, name);
    }
    loop {
        let choice = read_line(&format!(
            "Select metric for {} (blank for {}): ",
            purpose, numeric[0]
        ));
        if choice.is_empty() {
            return numeric[0].clone();
        }
        if let Some(name) = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| numeric.get(i))
        {
            return name.clone();
        }
        if let Some(name) = numeric.iter().find(|n| n.eq_ignore_ascii_case(&choice)) {
            return name.clone();
        }
        println!("Invalid choice. Please pick 1-{}.", numeric.len());
    }
}

/// Year range selector shown only for a non-degenerate range. Blank keeps
/// the full range.
fn prompt_year_range(lo: i64, hi: i64) -> (i64, i64) {
    loop {
        let input = read_line(&format!(
            "Select year range {}-{} (blank for all, or MIN MAX): ",
            lo, hi
        ));
        if input.is_empty() {
            return (lo, hi);
        }
        let parts: Vec<i64> = input
            .split_whitespace()
            .filter_map(|p| p.parse().ok())
            .collect();
        if let [min, max] = parts[..] {
            if min <= max {
                return (min, max);
            }
        }
        println!("Invalid range. Enter two years like '{} {}'.", lo, hi);
    }
}

fn notice(feature: &str, reason: SkipReason) {
    println!("{} skipped: {}.\n", feature, reason.message());
}

fn export_spec<T: Serialize>(path: &str, spec: &ChartSpec<T>) {
    if let Err(e) = output::write_json(path, spec) {
        eprintln!("Write error: {}", e);
    }
}

/// One full load-filter-summarize-derive pass for the chosen dataset.
///
/// A missing file aborts the cycle with an error message and no partial
/// output. Missing columns only degrade their dependent features.
fn render_cycle(ds: &DatasetDescriptor) {
    let table = match loader::load(ds.path) {
        Ok(t) => t,
        Err(e @ DatasetError::NotFound { .. }) => {
            eprintln!("Error: {}. Ensure the cleaned CSVs are in the data folder.\n", e);
            return;
        }
        Err(e) => {
            eprintln!("Error: {}\n", e);
            return;
        }
    };
    println!(
        "Processing dataset... ({} rows, {} columns)\n",
        format_int(table.len() as i64),
        format_int(table.columns.len() as i64)
    );

    let profile = SchemaProfile::of(&table);
    let mut state = FilterState::default();

    let country_input = read_line("Country or Region filter (blank for all): ");
    if !country_input.is_empty() {
        if profile.has_geographic() {
            state.country_contains = Some(country_input);
        } else {
            println!("No country/region column found in this dataset for filtering.");
        }
    }

    match profile.temporal.as_deref() {
        Some(col) => match filter::year_bounds(&table, col) {
            Some((lo, hi)) if lo == hi => {
                println!("Only {} available.", lo);
                state.year_range = Some((lo, hi));
            }
            Some((lo, hi)) => {
                state.year_range = Some(prompt_year_range(lo, hi));
            }
            None => println!("The 'Year' column has no usable values."),
        },
        None => println!("No 'Year' column found in this dataset."),
    }

    let filtered = state.apply(&table, &profile);

    println!(
        "\nData Preview — {}",
        state.country_contains.as_deref().unwrap_or("All Countries")
    );
    println!("{}\n", output::preview_table(&filtered, PREVIEW_ROWS));
    if let Err(e) = output::write_table_csv("filtered_view.csv", &filtered) {
        eprintln!("Write error: {}", e);
    }

    let headline = metrics::summarize(&filtered, &profile);
    if headline.is_empty() {
        println!("No numeric columns available to display metrics.\n");
    } else {
        println!("Key Global Metrics");
        println!("{}\n", output::metric_cards(&headline));
        if let Err(e) = output::write_json("metrics.json", &headline) {
            eprintln!("Write error: {}", e);
        }
    }

    if profile.numeric.is_empty() {
        return;
    }

    println!("Trend Over Time");
    if profile.temporal.is_none() {
        notice("Trend over time", SkipReason::MissingTemporalColumn);
    } else {
        let metric = prompt_metric("trend", &profile.numeric);
        match charts::trend(&filtered, &profile, &metric) {
            Ok(series) => {
                let points: usize = series.iter().map(|s| s.points.len()).sum();
                let spec = ChartSpec::new("line", format!("{} Over Time", metric), &metric, series);
                export_spec("chart_trend.json", &spec);
                println!(
                    "{} series with {} points exported to chart_trend.json\n",
                    format_int(spec.data.len() as i64),
                    format_int(points as i64)
                );
            }
            Err(reason) => notice("Trend over time", reason),
        }
    }

    println!("Top 10 Countries by Impact");
    let metric = prompt_metric("ranking", &profile.numeric);
    match charts::top_ranking(&filtered, &profile, &metric) {
        Ok(rows) => {
            println!("{}", output::ranking_table(&rows));
            let spec = ChartSpec::new(
                "bar",
                format!("Top 10 Countries by {}", metric),
                &metric,
                rows,
            );
            export_spec("chart_top10.json", &spec);
            println!("(Chart data exported to chart_top10.json)\n");
        }
        Err(reason) => notice("Top 10 ranking", reason),
    }

    println!("Global Heatmap");
    let metric = prompt_metric("map", &profile.numeric);
    match charts::geo_distribution(&filtered, &profile, &metric) {
        Ok(regions) => {
            let spec = ChartSpec::new(
                "choropleth",
                format!("Global Distribution of {}", metric),
                &metric,
                regions,
            );
            export_spec("chart_map.json", &spec);
            println!(
                "{} regions exported to chart_map.json\n",
                format_int(spec.data.len() as i64)
            );
        }
        Err(reason) => notice("Global heatmap", reason),
    }
}

fn main() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    loop {
        println!("Select Dataset:");
        for (i, ds) in DATASETS.iter().enumerate() {
            println!("[{}] {}", i + 1, ds.label);
        }
        println!("[0] Exit\n");

        let choice = read_line("Enter choice: ");
        if choice == "0" {
            println!("Exiting the program.");
            break;
        }
        let Some(ds) = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| DATASETS.get(i))
        else {
            println!(
                "Invalid choice. Please enter a number between 0 and {}.\n",
                DATASETS.len()
            );
            continue;
        };

        println!("\n{} Analytics\n", ds.label);
        render_cycle(ds);
        if !prompt_back_to_menu() {
            println!("Exiting the program.");
            break;
        }
        println!();
    }
}
