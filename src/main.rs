use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tsunamizones::api::{definition_expression, fetch_zones, read_features};
use tsunamizones::classify::{classify, unmatched_evacuate_values};
use tsunamizones::config::{FileConfig, ServiceConfig};
use tsunamizones::display::{DisplayState, Scene, VisibilitySwitch};
use tsunamizones::export::write_geojson;

/// Fetch California tsunami hazard areas and toggle evacuate/safe zone overlays
///
/// Examples:
///   # Fetch Southern California zones and write the evacuate overlay
///   tsunamizones -o evacuate.geojson
///
///   # Show the safe zones instead
///   tsunamizones --select safe -o safe.geojson
///
///   # Restrict to two counties and print popups
///   tsunamizones --county Orange --county "San Diego" --popups
///
///   # Work offline from a saved query result and toggle from stdin
///   tsunamizones -i hazard_areas.geojson --interactive
#[derive(Parser, Debug)]
#[command(name = "tsunamizones")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches tsunamizones.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read features from a GeoJSON file instead of querying the feature service
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Feature service URL (the FeatureServer root, without layer id)
    #[arg(long)]
    url: Option<String>,

    /// County to include; repeat for several (defaults to the Southern California coast)
    #[arg(long = "county")]
    counties: Vec<String>,

    /// Output GeoJSON path for the displayed zones
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Selection events replayed in order after startup: evacuate or safe
    #[arg(short = 's', long = "select")]
    selections: Vec<String>,

    /// Read selection events from stdin, one per line, rewriting the output each time
    #[arg(long)]
    interactive: bool,

    /// Print the popup of every displayed zone
    #[arg(long)]
    popups: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(toml::from_str(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };
    let file_config = file_config.unwrap_or_default();

    let input = args.input.clone().or_else(|| file_config.input.clone());
    let output = args.output.clone().unwrap_or_else(|| file_config.output.clone());
    let verbose = args.verbose || file_config.verbose;
    let popups = args.popups || file_config.popups;

    let mut service = file_config.service.clone().unwrap_or_default();
    if let Some(ref url) = args.url {
        service.url = url.clone();
    }
    if !args.counties.is_empty() {
        service.counties = args.counties.clone();
    }

    println!("tsunamizones - Tsunami Hazard Zone Viewer");
    println!("=========================================");
    println!();

    if verbose {
        print_configuration(input.as_deref(), &service, &output, &args.selections);
    }

    let features = if let Some(ref path) = input {
        let spinner = create_spinner("Reading hazard areas...");
        let start = Instant::now();
        let features = read_features(path).context("Failed to read input features")?;
        spinner.finish_with_message(format!(
            "Read {} features from {} [{:.1}s]",
            features.len(),
            path.display(),
            start.elapsed().as_secs_f32()
        ));
        features
    } else {
        let spinner = create_spinner("Querying tsunami hazard areas...");
        let start = Instant::now();
        let features = fetch_zones(&service).context("Failed to fetch tsunami hazard areas")?;
        spinner.finish_with_message(format!(
            "Fetched {} features [{:.1}s]",
            features.len(),
            start.elapsed().as_secs_f32()
        ));
        features
    };

    let spinner = create_spinner("Classifying zones...");
    let (evacuate, safe) = classify(&features);
    spinner.finish_with_message(format!(
        "Classified {} evacuate / {} safe zones",
        evacuate.len(),
        safe.len()
    ));

    if verbose {
        for value in unmatched_evacuate_values(&features) {
            match value {
                Some(v) => println!("  Classified as safe: Evacuate = {:?}", v),
                None => println!("  Classified as safe: Evacuate missing"),
            }
        }
    }

    let mut switch = VisibilitySwitch::new(Scene::new());
    switch.initialize(evacuate, safe);
    report(&switch, "evacuate", verbose, popups);

    for selection in &args.selections {
        switch.on_selection_changed(selection);
        report(&switch, selection, verbose, popups);
    }

    if args.interactive {
        write_output(&switch, &output)?;
        println!("Enter a selection (evacuate, safe); end with Ctrl-D");

        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = line.context("Failed to read selection from stdin")?;
            let selection = line.trim();
            if selection.is_empty() {
                continue;
            }
            switch.on_selection_changed(selection);
            report(&switch, selection, verbose, popups);
            write_output(&switch, &output)?;
        }
    } else {
        write_output(&switch, &output)?;
    }

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!();
    println!("Output: {}", output.display());

    Ok(())
}

fn print_configuration(
    input: Option<&Path>,
    service: &ServiceConfig,
    output: &Path,
    selections: &[String],
) {
    println!("Configuration:");
    match input {
        Some(path) => println!("  Input: {}", path.display()),
        None => {
            println!("  Service: {}", service.url);
            println!("  Layer: {}", service.layer);
            println!("  Where: {}", definition_expression(&service.counties));
            println!("  Timeout: {}s", service.timeout_secs);
            println!("  Max retries: {}", service.max_retries);
        }
    }
    if !selections.is_empty() {
        println!("  Selections: {}", selections.join(" -> "));
    }
    println!("  Output: {}", output.display());
    println!();
}

fn report(switch: &VisibilitySwitch<Scene>, selection: &str, verbose: bool, popups: bool) {
    let Some(scene) = switch.display() else {
        return;
    };

    match switch.state() {
        DisplayState::ShowingNone => {
            println!("Selected {:?}: no matching group, nothing shown", selection);
        }
        DisplayState::Uninitialized => {
            println!("Selected {:?}: zones not loaded yet", selection);
        }
        DisplayState::ShowingEvacuate | DisplayState::ShowingSafe => {
            for group in scene.layers() {
                println!(
                    "Selected {:?}: showing {} ({}), {} zones",
                    group.kind.selection_value(),
                    group.title(),
                    group.id(),
                    group.len()
                );
            }
        }
    }

    if verbose && let Some(extent) = scene.extent() {
        println!(
            "  Extent: ({:.4}, {:.4}) -> ({:.4}, {:.4})",
            extent.min().x,
            extent.min().y,
            extent.max().x,
            extent.max().y
        );
    }

    if popups {
        for zone in scene.zones() {
            println!();
            for line in zone.popup.render(zone) {
                println!("{}", line);
            }
        }
        println!();
    }
}

fn write_output(switch: &VisibilitySwitch<Scene>, output: &Path) -> Result<()> {
    if let Some(scene) = switch.display() {
        write_geojson(output, scene).context("Failed to write GeoJSON file")?;
    }
    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
