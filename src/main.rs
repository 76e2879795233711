use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::{error, info, warn};

use roadmend::correct::{RoadRecord, correct_records_par};
use roadmend::difference::difference;
use roadmend::enrich::{MapTilerLookup, Sleep, enrich};
use roadmend::graph::{CachedProvider, NetworkProvider, OsmPbfProvider};
use roadmend::load::{GeoJsonLoader, Load, RoadRecordReader};
use roadmend::render::{GeoJsonRenderer, Render, RenderError, Style};
use roadmend::{Cancellation, Config, GeometrySet, InputError};

/// Finds, labels and corrects road linestrings.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Keeps the reference lines not covered by the candidate layer.
    Difference {
        /// A .geojson file or a directory of them.
        reference: PathBuf,
        /// A .geojson file or a directory of them.
        candidate: PathBuf,
        out: PathBuf,
    },

    /// Labels each line with its street and local government area.
    Enrich {
        /// A .geojson file or a directory of them.
        input: PathBuf,
        out: PathBuf,
    },

    /// Snaps each row's endpoints to the street network and routes between them.
    Correct {
        /// CSV of rows with start and end coordinates.
        rows: PathBuf,
        /// Place name, e.g. "Lagos, Nigeria".
        region: String,
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    // A missing `.env` file is fine, the environment may already be set.
    dotenv().ok();
    let cli = Cli::parse();

    #[cfg(feature = "tracing")]
    roadmend::util::trace::initialize_tracer();
    #[cfg(not(feature = "tracing"))]
    roadmend::util::trace::initialize_logger();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(Cli { config, command }: Cli) -> roadmend::Result<()> {
    match command {
        Command::Difference {
            reference,
            candidate,
            out,
        } => {
            let reference = GeoJsonLoader.load(&reference)?;
            let candidate = single_layer(GeoJsonLoader.load(&candidate)?)?;

            let result = difference(reference, &candidate, &config.difference())?;
            write(&result.set, &out)
        }
        Command::Enrich { input, out } => {
            let input = single_layer(GeoJsonLoader.load(&input)?)?;
            let lookup = MapTilerLookup::new(config.lookup()?)?;

            let enriched = enrich(
                &input,
                &lookup,
                &Sleep,
                &config.enrich(),
                &Cancellation::new(),
            )?;
            write(&enriched.set, &out)
        }
        Command::Correct { rows, region, out } => {
            let records = RoadRecordReader::default().read_path(&rows)?;

            let provider = CachedProvider::new(OsmPbfProvider::new(&config.graph_dir));
            let network = provider.graph_for_region(&region, config.network_mode)?;
            info!("Street data for {region}: {network:?}");

            let batch = correct_records_par(
                network.as_ref(),
                &records,
                &config.matching(),
                &Cancellation::new(),
            );

            for (record, reason) in batch.failures(&records) {
                warn!("Row {} ({}): {reason}", record.row, label(record));
            }

            write(&batch.corrected_set(&records), &out)
        }
    }
}

/// Joins the layers of an input into one set, in the first layer's system.
fn single_layer(layers: Vec<GeometrySet>) -> roadmend::Result<GeometrySet> {
    let mut layers = layers.into_iter();
    let Some(mut merged) = layers.next() else {
        return Err(InputError::EmptyInput {
            dataset: roadmend::error::Dataset::Candidate,
        }
        .into());
    };

    let expected = merged.crs();
    for layer in layers {
        merged
            .append(layer.reproject(expected)?)
            .map_err(|found| InputError::CrsMismatch { expected, found })?;
    }

    Ok(merged)
}

fn label(record: &RoadRecord) -> &str {
    record
        .attributes
        .get("road_street_name")
        .and_then(|name| name.as_str())
        .unwrap_or("unnamed")
}

fn write(set: &GeometrySet, out: &Path) -> roadmend::Result<()> {
    let file = File::create(out).map_err(RenderError::from)?;
    let layer = out
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("layer");

    GeoJsonRenderer::new(BufWriter::new(file)).render(set, layer, &Style::default())?;
    info!("Wrote {} records to {out:?}", set.len());

    Ok(())
}
