use anyhow::Result;
use opengd77::core::export::{APRS_CSV, CHANNELS_CSV, CHANNELS_JSON, MANIFEST_JSON};
use opengd77::{CodeplugError, CodeplugExporter, CodeplugFile, LocalStorage, OutputFormat};
use std::collections::HashMap;
use tempfile::TempDir;

const DEFINITION: &str = r#"
[[aprs]]
name = "Mobile"
via_1_ssid = 1
via_2_ssid = 1
comment = "on the road"
position_masking = "0.0100"

[[contacts]]
name = "TG 2350"
call_id = 2350
call_type = "Group"

[[contacts]]
name = "Local"
call_id = 9
call_type = "Group"
timeslot = 2

[[tg_lists]]
name = "UK"
contacts = ["TG 2350", "Local"]

[[channels]]
name = "PMR 1"
mode = "analog"
rx_frequency = "446.00625"
squelch = "0.25"
timeout_seconds = 120

[[channels]]
name = "GB7XX"
mode = "digital"
rx_frequency = "439.4000"
tx_frequency = "430.4000"
color_code = 1
timeslot = 2
tg_list = "UK"
contact = "TG 2350"
aprs = "Mobile"
ts1_talker_alias = "Text"

[[zones]]
name = "Local"
channels = ["PMR 1", "GB7XX"]

[[zones]]
name = "DMR"
channels = ["GB7XX"]
"#;

fn read_rows(path: &std::path::Path) -> Result<Vec<HashMap<String, String>>> {
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader
        .deserialize::<HashMap<String, String>>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[test]
fn test_end_to_end_export() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_string_lossy().into_owned();

    let codeplug = CodeplugFile::from_toml_str(DEFINITION)?.build_codeplug()?;
    codeplug.verify_references()?;
    assert_eq!(codeplug.zones().len(), 2);

    let exporter = CodeplugExporter::new(
        LocalStorage::new(output_path.clone()),
        vec![OutputFormat::Csv, OutputFormat::Json],
    );
    let summary = exporter.export(&codeplug)?;
    assert_eq!(summary.channels, 2);
    assert_eq!(summary.zones, 2);
    assert_eq!(summary.files, vec![CHANNELS_CSV, APRS_CSV, CHANNELS_JSON]);

    let channels = read_rows(&temp_dir.path().join(CHANNELS_CSV))?;
    assert_eq!(channels.len(), 2);

    let analog = &channels[0];
    assert_eq!(analog["Channel Number"], "1");
    assert_eq!(analog["Channel Type"], "Analogue");
    assert_eq!(analog["Rx Frequency"], "446.00625");
    assert_eq!(analog["Squelch"], "25%");
    assert_eq!(analog["TOT"], "120");
    assert_eq!(analog["Colour Code"], "");
    assert_eq!(analog["APRS"], "None");

    let digital = &channels[1];
    assert_eq!(digital["Channel Number"], "2");
    assert_eq!(digital["Channel Type"], "Digital");
    assert_eq!(digital["Tx Frequency"], "430.4000");
    assert_eq!(digital["Colour Code"], "1");
    assert_eq!(digital["Timeslot"], "2");
    assert_eq!(digital["Contact"], "TG 2350");
    assert_eq!(digital["TG List"], "UK");
    assert_eq!(digital["DMR ID"], "None");
    assert_eq!(digital["APRS"], "Mobile");
    assert_eq!(digital["TOT"], "60");
    assert_eq!(digital["Squelch"], "");
    assert_eq!(digital["Bandwidth (kHz)"], "");

    let aprs = read_rows(&temp_dir.path().join(APRS_CSV))?;
    assert_eq!(aprs.len(), 1);
    assert_eq!(aprs[0]["APRS config Name"], "Mobile");
    assert_eq!(aprs[0]["Comment text"], "on the road");
    assert_eq!(aprs[0]["Ambiguity"], "4");
    assert_eq!(aprs[0]["Use position"], "False");
    assert_eq!(aprs[0]["TX Frequency"], "");
    assert_eq!(aprs[0]["Baud rate setting"], "0");

    let manifest: serde_json::Value =
        serde_json::from_slice(&std::fs::read(temp_dir.path().join(MANIFEST_JSON))?)?;
    assert_eq!(manifest["contacts"], 2);
    assert_eq!(manifest["tg_lists"], 1);
    assert!(manifest["exported_at"].is_string());

    Ok(())
}

#[test]
fn test_invalid_definition_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let definition = DEFINITION.replace("squelch = \"0.25\"", "squelch = \"0.33\"");

    let err = CodeplugFile::from_toml_str(&definition)?
        .build_codeplug()
        .unwrap_err();
    assert!(matches!(err, CodeplugError::Validation(_)));
    assert_eq!(std::fs::read_dir(temp_dir.path())?.count(), 0);
    Ok(())
}

#[test]
fn test_zone_over_bound_in_definition() -> Result<()> {
    let mut definition = String::new();
    let mut names = Vec::new();
    for n in 0..81 {
        definition.push_str(&format!(
            "[[channels]]\nname = \"CH{n}\"\nmode = \"analog\"\nrx_frequency = \"145.{:03}\"\n\n",
            n * 5
        ));
        names.push(format!("\"CH{n}\""));
    }
    definition.push_str(&format!("[[zones]]\nname = \"Big\"\nchannels = [{}]\n", names.join(", ")));

    let err = CodeplugFile::from_toml_str(&definition)?
        .build_codeplug()
        .unwrap_err();
    assert!(err.to_string().contains("zone.channels"));
    Ok(())
}
