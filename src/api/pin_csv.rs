use crate::api::codec::DeciPinCodec;
use crate::api::decoded::DecodedPin;
use crate::util::error::DeciPinError;
use geo::Centroid;
use geo_types::{Geometry, Point};
use geojson::GeoJson;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use tracing::info;
use wkt::Wkt;

/// Column written first in encoded output
pub const PIN_COLUMN: &str = "decipin";

/// Column holding the cell polygon when requested
pub const CELL_GEOMETRY_COLUMN: &str = "cell_geometry";

/// For the type of location source in the file
enum SourceIndices {
    Geometry(usize),
    Coordinates { lat_idx: usize, lon_idx: usize },
}

/// Output format for cell polygon geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

/// Specifies how to extract location data from CSV rows.
#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry (x = lon, y = lat)
    GeometryColumn(String),
    /// Separate latitude and longitude columns
    CoordinateColumns { lat_column: String, lon_column: String },
}

/// Configuration for CSV to DeciPin conversion.
#[derive(Debug, Clone)]
pub struct PinCsvConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub include_cell_geometry: Option<GeometryFormat>,
    pub codec: DeciPinCodec,
}

impl PinCsvConfig {
    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use decipin_rs::PinCsvConfig;
    ///
    /// let config = PinCsvConfig::new("geometry");
    /// ```
    pub fn new(geometry_column: impl Into<String>) -> Self {
        Self {
            source: CoordinateSource::GeometryColumn(geometry_column.into()),
            exclude_columns: Vec::new(),
            include_cell_geometry: None,
            codec: DeciPinCodec::default(),
        }
    }

    /// Create config for a CSV with separate latitude/longitude columns.
    ///
    /// # Example
    /// ```
    /// use decipin_rs::PinCsvConfig;
    ///
    /// let config = PinCsvConfig::from_coords("Latitude", "Longitude");
    /// ```
    pub fn from_coords(lat_column: impl Into<String>, lon_column: impl Into<String>) -> Self {
        Self {
            source: CoordinateSource::CoordinateColumns {
                lat_column: lat_column.into(),
                lon_column: lon_column.into(),
            },
            exclude_columns: Vec::new(),
            include_cell_geometry: None,
            codec: DeciPinCodec::default(),
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    pub fn codec(mut self, codec: DeciPinCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Include the cell polygon in output.
    pub fn with_cell_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_cell_geometry = Some(format);
        self
    }
}

pub trait CsvToPin {
    fn to_pin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &PinCsvConfig,
    ) -> Result<usize, DeciPinError>;
}

impl<P: AsRef<Path>> CsvToPin for P {
    fn to_pin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &PinCsvConfig,
    ) -> Result<usize, DeciPinError> {
        csv_to_pin_csv(self, output_path, config)
    }
}

fn parse_geometry(s: &str) -> Result<Geometry<f64>, DeciPinError> {
    let trimmed = s.trim();
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

fn parse_geojson(s: &str) -> Result<Geometry<f64>, DeciPinError> {
    let geojson: GeoJson = s
        .parse()
        .map_err(|e: geojson::Error| DeciPinError::GeometryParseError(e.to_string()))?;

    match geojson {
        GeoJson::Geometry(geom) => {
            Geometry::try_from(geom).map_err(|e| DeciPinError::GeometryParseError(e.to_string()))
        }
        GeoJson::Feature(feat) => feat
            .geometry
            .ok_or_else(|| DeciPinError::GeometryParseError("Feature has no geometry".to_string()))
            .and_then(|g| {
                Geometry::try_from(g).map_err(|e| DeciPinError::GeometryParseError(e.to_string()))
            }),
        GeoJson::FeatureCollection(_) => Err(DeciPinError::GeometryParseError(
            "FeatureCollection not supported, use individual geometries".to_string(),
        )),
    }
}

fn parse_wkt(s: &str) -> Result<Geometry<f64>, DeciPinError> {
    let wkt: Wkt<f64> =
        Wkt::from_str(s).map_err(|e| DeciPinError::GeometryParseError(e.to_string()))?;

    wkt.try_into().map_err(|_| {
        DeciPinError::GeometryParseError("Failed to convert WKT to geometry".to_string())
    })
}

/// A point stays as-is; any other geometry is reduced to its centroid.
fn geometry_to_point(geom: &Geometry<f64>) -> Result<Point<f64>, DeciPinError> {
    match geom {
        Geometry::Point(pt) => Ok(*pt),
        other => other.centroid().ok_or_else(|| {
            DeciPinError::GeometryParseError("Geometry is empty".to_string())
        }),
    }
}

fn cell_to_wkt(pin: &DecodedPin) -> String {
    use wkt::ToWkt;
    pin.to_polygon().wkt_string()
}

fn cell_to_geojson(pin: &DecodedPin) -> String {
    let geom = geojson::Geometry::from(&pin.to_polygon());
    geom.to_string()
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, DeciPinError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DeciPinError::CsvError(format!("Column '{}' not found", name)))
}

fn field<'a>(record: &'a csv::StringRecord, idx: usize) -> Result<&'a str, DeciPinError> {
    record
        .get(idx)
        .map(str::trim)
        .ok_or_else(|| DeciPinError::CsvError(format!("Missing column at index {}", idx)))
}

fn parse_degrees(s: &str) -> Result<f64, DeciPinError> {
    s.parse()
        .map_err(|_| DeciPinError::CsvError(format!("Invalid coordinate: '{}'", s)))
}

// ============================================================================
// CSV Conversion
// ============================================================================

/// Converts a CSV file with geometry or coordinate columns to a CSV file with DeciPins.
///
/// The output has a `decipin` column first, then `cell_geometry` if requested,
/// then every input column except the source and excluded columns. Rows are
/// streamed, so large files are not held in memory.
///
/// Returns the number of rows written.
///
/// # Example
///
/// ```no_run
/// use decipin_rs::{csv_to_pin_csv, PinCsvConfig, GeometryFormat};
///
/// let config = PinCsvConfig::from_coords("Latitude", "Longitude")
///     .with_cell_geometry(GeometryFormat::Wkt);
///
/// csv_to_pin_csv("stops.csv", "output.csv", &config).unwrap();
/// ```
pub fn csv_to_pin_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &PinCsvConfig,
) -> Result<usize, DeciPinError> {
    let file = File::open(csv_path).map_err(|e| DeciPinError::IoError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| DeciPinError::CsvError(e.to_string()))?
        .clone();

    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = column_index(&headers, col)?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        CoordinateSource::CoordinateColumns {
            lat_column,
            lon_column,
        } => {
            let lat_idx = column_index(&headers, lat_column)?;
            let lon_idx = column_index(&headers, lon_column)?;
            (
                SourceIndices::Coordinates { lat_idx, lon_idx },
                HashSet::from([lat_idx, lon_idx]),
            )
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file = File::create(output_path).map_err(|e| DeciPinError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec![PIN_COLUMN];
    if config.include_cell_geometry.is_some() {
        header_row.push(CELL_GEOMETRY_COLUMN);
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer
        .write_record(&header_row)
        .map_err(|e| DeciPinError::CsvError(e.to_string()))?;

    let mut rows = 0;
    for result in reader.records() {
        let record = result.map_err(|e| DeciPinError::CsvError(e.to_string()))?;

        let (lat, lon) = match &source_indices {
            SourceIndices::Geometry(idx) => {
                let geom = parse_geometry(field(&record, *idx)?)?;
                let pt = geometry_to_point(&geom)?;
                (pt.y(), pt.x())
            }
            SourceIndices::Coordinates { lat_idx, lon_idx } => (
                parse_degrees(field(&record, *lat_idx)?)?,
                parse_degrees(field(&record, *lon_idx)?)?,
            ),
        };

        let pin = config.codec.encode(lat, lon)?;
        let mut row: Vec<String> = Vec::with_capacity(record.len() + 2);

        if let Some(format) = config.include_cell_geometry {
            let decoded = config.codec.decode(&pin)?;
            row.push(pin);
            row.push(match format {
                GeometryFormat::Wkt => cell_to_wkt(&decoded),
                GeometryFormat::GeoJson => cell_to_geojson(&decoded),
            });
        } else {
            row.push(pin);
        }

        for (i, value) in record.iter().enumerate() {
            if !exclude_indices.contains(&i) {
                row.push(value.to_string());
            }
        }
        writer
            .write_record(&row)
            .map_err(|e| DeciPinError::CsvError(e.to_string()))?;
        rows += 1;
    }

    writer
        .flush()
        .map_err(|e| DeciPinError::IoError(e.to_string()))?;

    info!(rows, "encoded CSV to DeciPins");
    Ok(rows)
}

/// Decodes a column of DeciPins into `lat` and `lon` columns.
///
/// The output has `lat` and `lon` first, rendered per the codec's
/// `output_format`, then every input column except the code column.
///
/// Returns the number of rows written.
///
/// # Errors
///
/// Fails on the first row whose code does not decode.
pub fn pin_csv_to_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    code_column: &str,
    codec: &DeciPinCodec,
) -> Result<usize, DeciPinError> {
    let file = File::open(csv_path).map_err(|e| DeciPinError::IoError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| DeciPinError::CsvError(e.to_string()))?
        .clone();
    let code_idx = column_index(&headers, code_column)?;

    let out_file = File::create(output_path).map_err(|e| DeciPinError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec!["lat", "lon"];
    header_row.extend(
        headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != code_idx)
            .map(|(_, h)| h),
    );
    writer
        .write_record(&header_row)
        .map_err(|e| DeciPinError::CsvError(e.to_string()))?;

    let format = codec.config().output_format;
    let mut rows = 0;
    for result in reader.records() {
        let record = result.map_err(|e| DeciPinError::CsvError(e.to_string()))?;
        let decoded = codec.decode(field(&record, code_idx)?)?;
        let (lat, lon) = decoded.formatted(format);

        let mut row: Vec<String> = vec![lat, lon];
        for (i, value) in record.iter().enumerate() {
            if i != code_idx {
                row.push(value.to_string());
            }
        }
        writer
            .write_record(&row)
            .map_err(|e| DeciPinError::CsvError(e.to_string()))?;
        rows += 1;
    }

    writer
        .flush()
        .map_err(|e| DeciPinError::IoError(e.to_string()))?;

    info!(rows, "decoded DeciPins from CSV");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::CoordinateFormat;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(path: &Path, lines: &[&str]) -> Result<(), DeciPinError> {
        let mut file = File::create(path).map_err(|e| DeciPinError::IoError(e.to_string()))?;
        for line in lines {
            writeln!(file, "{}", line).map_err(|e| DeciPinError::IoError(e.to_string()))?;
        }
        Ok(())
    }

    fn read_file(path: &Path) -> Result<String, DeciPinError> {
        std::fs::read_to_string(path).map_err(|e| DeciPinError::IoError(e.to_string()))
    }

    #[test]
    fn test_parse_geojson_point() -> Result<(), DeciPinError> {
        let json = r#"{"type":"Point","coordinates":[2.2479,53.4808]}"#;
        let pt = geometry_to_point(&parse_geometry(json)?)?;
        assert!((pt.x() - 2.2479).abs() < 1e-9);
        assert!((pt.y() - 53.4808).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_parse_geojson_feature() -> Result<(), DeciPinError> {
        let json = r#"{"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[1.0,2.0]}}"#;
        let pt = geometry_to_point(&parse_geometry(json)?)?;
        assert_eq!((pt.x(), pt.y()), (1.0, 2.0));
        Ok(())
    }

    #[test]
    fn test_parse_geojson_collection_rejected() {
        let json = r#"{"type":"FeatureCollection","features":[]}"#;
        assert!(matches!(
            parse_geometry(json),
            Err(DeciPinError::GeometryParseError(_))
        ));
    }

    #[test]
    fn test_parse_wkt_point() -> Result<(), DeciPinError> {
        let pt = geometry_to_point(&parse_geometry("POINT(2.2479 53.4808)")?)?;
        assert!((pt.x() - 2.2479).abs() < 1e-9);
        assert!((pt.y() - 53.4808).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_linestring_uses_centroid() -> Result<(), DeciPinError> {
        let pt = geometry_to_point(&parse_geometry("LINESTRING(10 20, 12 20)")?)?;
        assert!((pt.x() - 11.0).abs() < 1e-9);
        assert!((pt.y() - 20.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_parse_invalid_wkt() {
        assert!(parse_geometry("POINT(oops)").is_err());
    }

    #[test]
    fn test_cell_geometry_strings() -> Result<(), DeciPinError> {
        let decoded = DeciPinCodec::default().decode("0000.AA00/QQ00")?;
        assert!(cell_to_wkt(&decoded).starts_with("POLYGON"));
        assert!(cell_to_geojson(&decoded).contains("\"Polygon\""));
        Ok(())
    }

    #[test]
    fn test_csv_from_coords() -> Result<(), DeciPinError> {
        let dir = tempdir().map_err(|e| DeciPinError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_file(
            &csv_path,
            &[
                "StopCode,Name,Latitude,Longitude",
                "ABC123,Origin,0,0",
                "DEF456,Piccadilly,53.4808,2.2479",
            ],
        )?;

        let config = PinCsvConfig::from_coords("Latitude", "Longitude");
        let rows = csv_to_pin_csv(&csv_path, &output_path, &config)?;
        assert_eq!(rows, 2);

        let output = read_file(&output_path)?;
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "decipin,StopCode,Name");
        assert_eq!(lines[1], "0000.AA00/QQ00,ABC123,Origin");
        assert_eq!(lines[2], "5302.EI24/QY79,DEF456,Piccadilly");
        Ok(())
    }

    #[test]
    fn test_csv_geometry_column_with_cell_geometry() -> Result<(), DeciPinError> {
        let dir = tempdir().map_err(|e| DeciPinError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_file(
            &csv_path,
            &[
                "ASSET_ID,TYPE,geometry",
                "CDT123,Pipe,\"POINT(2.2479 53.4808)\"",
                "CDT124,Valve,\"{\"\"type\"\":\"\"Point\"\",\"\"coordinates\"\":[0,0]}\"",
            ],
        )?;

        let config = PinCsvConfig::new("geometry")
            .exclude(vec!["TYPE".into()])
            .with_cell_geometry(GeometryFormat::Wkt);
        csv_to_pin_csv(&csv_path, &output_path, &config)?;

        let output = read_file(&output_path)?;
        assert!(output.starts_with("decipin,cell_geometry,ASSET_ID\n"));
        assert!(output.contains("5302.EI24/QY79"));
        assert!(output.contains("0000.AA00/QQ00"));
        assert!(output.contains("POLYGON"));
        assert!(!output.contains("Pipe"));
        Ok(())
    }

    #[test]
    fn test_csv_via_trait_without_separators() -> Result<(), DeciPinError> {
        let dir = tempdir().map_err(|e| DeciPinError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_file(&csv_path, &["lat,lon", "0,0"])?;

        let codec = DeciPinCodec::builder().include_separators(false).build()?;
        let config = PinCsvConfig::from_coords("lat", "lon").codec(codec);
        csv_path.to_pin_csv(&output_path, &config)?;

        assert_eq!(read_file(&output_path)?, "decipin\n0000AA00QQ00\n");
        Ok(())
    }

    #[test]
    fn test_csv_out_of_range_row_fails() -> Result<(), DeciPinError> {
        let dir = tempdir().map_err(|e| DeciPinError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_file(&csv_path, &["lat,lon", "120,0"])?;

        let config = PinCsvConfig::from_coords("lat", "lon");
        assert!(matches!(
            csv_to_pin_csv(&csv_path, &output_path, &config),
            Err(DeciPinError::OutOfRange { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_csv_missing_column() -> Result<(), DeciPinError> {
        let dir = tempdir().map_err(|e| DeciPinError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_file(&csv_path, &["a,b", "1,2"])?;

        let config = PinCsvConfig::from_coords("lat", "lon");
        assert!(matches!(
            csv_to_pin_csv(&csv_path, &output_path, &config),
            Err(DeciPinError::CsvError(_))
        ));
        Ok(())
    }

    #[test]
    fn test_pin_csv_to_csv_decimal() -> Result<(), DeciPinError> {
        let dir = tempdir().map_err(|e| DeciPinError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("pins.csv");
        let output_path = dir.path().join("coords.csv");

        write_file(&csv_path, &["id,decipin", "1,5302.ei24/qy79", "2,0000AA00QQ00"])?;

        let codec = DeciPinCodec::builder()
            .output_format(CoordinateFormat::Decimal)
            .build()?;
        let rows = pin_csv_to_csv(&csv_path, &output_path, "decipin", &codec)?;
        assert_eq!(rows, 2);

        assert_eq!(
            read_file(&output_path)?,
            "lat,lon,id\n53.48085,02.24795,1\n00.00005,00.00005,2\n"
        );
        Ok(())
    }

    #[test]
    fn test_pin_csv_to_csv_float() -> Result<(), DeciPinError> {
        let dir = tempdir().map_err(|e| DeciPinError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("pins.csv");
        let output_path = dir.path().join("coords.csv");

        write_file(&csv_path, &["decipin", "5302.EI24/QY79"])?;

        pin_csv_to_csv(&csv_path, &output_path, "decipin", &DeciPinCodec::default())?;
        assert_eq!(read_file(&output_path)?, "lat,lon\n53.48085,2.24795\n");
        Ok(())
    }

    #[test]
    fn test_pin_csv_to_csv_invalid_code() -> Result<(), DeciPinError> {
        let dir = tempdir().map_err(|e| DeciPinError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("pins.csv");
        let output_path = dir.path().join("coords.csv");

        write_file(&csv_path, &["decipin", "not-a-pin"])?;

        assert_eq!(
            pin_csv_to_csv(&csv_path, &output_path, "decipin", &DeciPinCodec::default()),
            Err(DeciPinError::InvalidFormat("NOT-A-PIN".to_string()))
        );
        Ok(())
    }
}
