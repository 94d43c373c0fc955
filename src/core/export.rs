use crate::core::projection::{codeplug_aprs_rows, codeplug_channel_rows};
use crate::core::row::{columns, Row};
use crate::domain::codeplug::Codeplug;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub const CHANNELS_CSV: &str = "Channels.csv";
pub const APRS_CSV: &str = "APRS.csv";
pub const CHANNELS_JSON: &str = "channels.json";
pub const MANIFEST_JSON: &str = "manifest.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unsupported format: {other}. Valid formats: csv, json")),
        }
    }
}

/// What an export wrote; also stored as `manifest.json`.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub exported_at: String,
    pub channels: usize,
    pub aprs_profiles: usize,
    pub zones: usize,
    pub contacts: usize,
    pub tg_lists: usize,
    pub files: Vec<String>,
}

/// Lay `rows` out under `header` as CSV bytes. Cells a row lacks stay empty.
pub fn render_csv(header: &[&str], rows: &[Row]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row.to_record(header))?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| crate::utils::error::CodeplugError::Io(e.into_error()))
}

/// Projects a codeplug and hands the files to a [`Storage`] backend.
pub struct CodeplugExporter<S: Storage> {
    storage: S,
    formats: Vec<OutputFormat>,
}

impl<S: Storage> CodeplugExporter<S> {
    pub fn new(storage: S, formats: Vec<OutputFormat>) -> Self {
        Self { storage, formats }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn export(&self, codeplug: &Codeplug) -> Result<ExportSummary> {
        tracing::info!(
            "Exporting codeplug: {} channels, {} APRS profiles",
            codeplug.channels().len(),
            codeplug.aprs().len()
        );

        let channel_rows = codeplug_channel_rows(codeplug)?;
        let aprs_rows = codeplug_aprs_rows(codeplug)?;
        let mut files = Vec::new();

        if self.formats.contains(&OutputFormat::Csv) {
            let data = render_csv(&columns::CHANNEL_HEADER, &channel_rows)?;
            self.write(CHANNELS_CSV, &data, &mut files)?;

            let data = render_csv(&columns::APRS_HEADER, &aprs_rows)?;
            self.write(APRS_CSV, &data, &mut files)?;
        }

        if self.formats.contains(&OutputFormat::Json) {
            let data = serde_json::to_vec_pretty(&channel_rows)?;
            self.write(CHANNELS_JSON, &data, &mut files)?;
        }

        let summary = ExportSummary {
            exported_at: chrono::Utc::now().to_rfc3339(),
            channels: channel_rows.len(),
            aprs_profiles: aprs_rows.len(),
            zones: codeplug.zones().len(),
            contacts: codeplug.contacts().len(),
            tg_lists: codeplug.tg_lists().len(),
            files,
        };
        let manifest = serde_json::to_vec_pretty(&summary)?;
        self.storage.write_file(MANIFEST_JSON, &manifest)?;

        tracing::info!("Export finished: {}", summary.files.join(", "));
        Ok(summary)
    }

    fn write(&self, path: &str, data: &[u8], files: &mut Vec<String>) -> Result<()> {
        tracing::debug!("Writing {} ({} bytes)", path, data.len());
        self.storage.write_file(path, data)?;
        files.push(path.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::channel::{AnalogChannel, Channel, ChannelBase};
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn text(&self, path: &str) -> String {
            let files = self.files.lock().unwrap();
            String::from_utf8(files.get(path).cloned().unwrap_or_default()).unwrap()
        }

        fn names(&self) -> Vec<String> {
            let mut names: Vec<_> = self.files.lock().unwrap().keys().cloned().collect();
            names.sort();
            names
        }
    }

    impl Storage for MockStorage {
        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn codeplug() -> Codeplug {
        let base = ChannelBase::builder("PMR 1", Decimal::new(44600625, 5), Decimal::new(44600625, 5))
            .build()
            .unwrap();
        let channel: Channel = AnalogChannel::builder(base)
            .squelch(Some(Decimal::new(25, 2)))
            .build()
            .unwrap()
            .into();
        Codeplug::builder()
            .channels(vec![Arc::new(channel)])
            .build()
            .unwrap()
    }

    #[test]
    fn test_render_csv_header_and_blanks() {
        let mut row = Row::new();
        row.insert(columns::CHANNEL_NAME, "A, B");
        let data = render_csv(&[columns::CHANNEL_NAME, columns::SQUELCH], &[row]).unwrap();
        assert_eq!(
            String::from_utf8(data).unwrap(),
            "Channel Name,Squelch\n\"A, B\",\n"
        );
    }

    #[test]
    fn test_export_csv_only() {
        let storage = MockStorage::default();
        let exporter = CodeplugExporter::new(storage.clone(), vec![OutputFormat::Csv]);

        let summary = exporter.export(&codeplug()).unwrap();

        assert_eq!(summary.channels, 1);
        assert_eq!(summary.files, vec![CHANNELS_CSV, APRS_CSV]);
        assert_eq!(storage.names(), vec![APRS_CSV, CHANNELS_CSV, MANIFEST_JSON]);

        let channels = storage.text(CHANNELS_CSV);
        let mut lines = channels.lines();
        assert!(lines.next().unwrap().starts_with("Channel Number,Channel Name,Channel Type"));
        let line = lines.next().unwrap();
        assert!(line.starts_with("1,PMR 1,Analogue,446.00625,446.00625,12.5,,,,,,,,None,None,25%,Master"));
    }

    #[test]
    fn test_export_json() {
        let storage = MockStorage::default();
        let exporter = CodeplugExporter::new(storage.clone(), vec![OutputFormat::Json]);
        exporter.export(&codeplug()).unwrap();

        let rows: serde_json::Value = serde_json::from_str(&storage.text(CHANNELS_JSON)).unwrap();
        assert_eq!(rows[0]["Squelch"], "25%");
        assert_eq!(rows[0]["TOT"], 60);

        let manifest: serde_json::Value = serde_json::from_str(&storage.text(MANIFEST_JSON)).unwrap();
        assert_eq!(manifest["channels"], 1);
        assert!(!storage.names().contains(&CHANNELS_CSV.to_string()));
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
