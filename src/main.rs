use clap::{Parser, Subcommand, ValueEnum};
use decipin_rs::{
    CoordinateFormat, DeciPinCodec, DeciPinConfig, DeciPinError, GeometryFormat, PinCsvConfig,
    csv_to_pin_csv, pin_csv_to_csv,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Encode and decode DeciPin geocoordinate codes.
#[derive(Debug, Parser)]
#[command(name = "decipin", version)]
struct Cli {
    /// JSON codec configuration (anchors, bounds, separators, output format)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print decoded coordinates as exact decimal strings
    #[arg(long, global = true)]
    decimal: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Encode a latitude/longitude pair
    Encode {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lon: f64,
        /// Emit the 12-character form without separators
        #[arg(long)]
        no_separators: bool,
    },
    /// Decode a DeciPin to the center of its cell
    Decode { code: String },
    /// Check a DeciPin against the grammar; exits non-zero if invalid
    Validate { code: String },
    /// Add a DeciPin column to a CSV of coordinates or geometries
    CsvEncode {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, requires = "lon_column", conflicts_with = "geometry_column")]
        lat_column: Option<String>,
        #[arg(long, requires = "lat_column")]
        lon_column: Option<String>,
        /// WKT or GeoJSON column; non-point geometries use their centroid
        #[arg(long, required_unless_present = "lat_column")]
        geometry_column: Option<String>,
        /// Also write the cell polygon
        #[arg(long, value_enum)]
        cell_geometry: Option<CellGeometry>,
        /// Input columns to drop from the output
        #[arg(long)]
        exclude: Vec<String>,
    },
    /// Replace a DeciPin column with lat/lon columns
    CsvDecode {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, default_value = "decipin")]
        code_column: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CellGeometry {
    Wkt,
    Geojson,
}

impl From<CellGeometry> for GeometryFormat {
    fn from(value: CellGeometry) -> Self {
        match value {
            CellGeometry::Wkt => GeometryFormat::Wkt,
            CellGeometry::Geojson => GeometryFormat::GeoJson,
        }
    }
}

fn build_codec(cli: &Cli) -> Result<DeciPinCodec, DeciPinError> {
    let mut config = match &cli.config {
        Some(path) => DeciPinConfig::from_json_file(path)?,
        None => DeciPinConfig::default(),
    };
    if cli.decimal {
        config = config.output_format(CoordinateFormat::Decimal);
    }
    DeciPinCodec::new(config)
}

fn run(cli: Cli) -> Result<ExitCode, DeciPinError> {
    let codec = build_codec(&cli)?;

    match cli.command {
        Command::Encode {
            lat,
            lon,
            no_separators,
        } => {
            let include = codec.config().include_separators && !no_separators;
            println!("{}", codec.encode_with_separators(lat, lon, include)?);
        }
        Command::Decode { code } => {
            let decoded = codec.decode(&code)?;
            println!("{}", decoded.to_json(codec.config().output_format));
        }
        Command::Validate { code } => {
            if !codec.is_valid(&code) {
                println!("invalid");
                return Ok(ExitCode::FAILURE);
            }
            println!("valid");
        }
        Command::CsvEncode {
            input,
            output,
            lat_column,
            lon_column,
            geometry_column,
            cell_geometry,
            exclude,
        } => {
            let config = match (lat_column, lon_column, geometry_column) {
                (Some(lat), Some(lon), _) => PinCsvConfig::from_coords(lat, lon),
                (_, _, Some(geometry)) => PinCsvConfig::new(geometry),
                _ => {
                    return Err(DeciPinError::CsvError(
                        "either --lat-column/--lon-column or --geometry-column is required"
                            .to_string(),
                    ));
                }
            };
            let mut config = config.exclude(exclude).codec(codec);
            if let Some(format) = cell_geometry {
                config = config.with_cell_geometry(format.into());
            }
            let rows = csv_to_pin_csv(&input, &output, &config)?;
            println!("{} rows written to {}", rows, output.display());
        }
        Command::CsvDecode {
            input,
            output,
            code_column,
        } => {
            let rows = pin_csv_to_csv(&input, &output, &code_column, &codec)?;
            println!("{} rows written to {}", rows, output.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "decipin=info,decipin_rs=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "decipin failed");
            ExitCode::FAILURE
        }
    }
}
