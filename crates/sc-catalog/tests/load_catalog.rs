use std::fs;

use sc_catalog::{Catalog, RecordField, load_machines, load_records};

const RECORDS: &str = r#"[
  {
    "id": "3f1c",
    "name": "v3.LR.historical_0101",
    "caseName": "v3.LR.historical",
    "compset": "WCYCL20TR",
    "gridName": "ne30pg2_r05_IcoswISC30E3r5",
    "status": "completed",
    "campaignId": "v3.LR",
    "machineId": "m-chrys",
    "simulationStartDate": "1850-01-01T00:00:00Z",
    "simulationEndDate": "2015-01-01T00:00:00Z",
    "artifacts": [
      {"id": "x1", "kind": "output", "uri": "/lcrc/group/e3sm/v3.LR.historical_0101/run"}
    ],
    "links": [
      {"id": "l1", "kind": "diagnostic", "url": "https://web.lcrc.anl.gov/diags/v3.LR"}
    ]
  },
  {
    "id": "9a7e",
    "name": "v3.LR.piControl",
    "machine": {"id": "m-pm", "name": "perlmutter"},
    "versionTag": "v3.0.0"
  }
]"#;

const MACHINES: &str = r#"[
  {"id": "m-chrys", "name": "chrysalis", "site": "ANL", "gpu": false},
  {"id": "m-pm", "name": "perlmutter", "site": "NERSC", "gpu": true}
]"#;

#[test]
fn load_and_join_catalog_files() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let records_path = dir.path().join("simulations.json");
    let machines_path = dir.path().join("machines.json");
    fs::write(&records_path, RECORDS).expect("failed to write records");
    fs::write(&machines_path, MACHINES).expect("failed to write machines");

    let records = load_records(&records_path).expect("failed to load records");
    let machines = load_machines(&machines_path).expect("failed to load machines");
    assert_eq!(records.len(), 2);
    assert_eq!(machines.len(), 2);

    let catalog = Catalog::new(records, machines);
    let historical = catalog.get("3f1c").expect("historical run missing");
    assert_eq!(historical.field(RecordField::MachineName), Some("chrysalis"));
    assert_eq!(historical.paths("output").len(), 1);
    assert_eq!(historical.grouped("diagnostic")[0].label, "web.lcrc.anl.gov/diags/v3.LR");

    let control = catalog.get("9a7e").expect("control run missing");
    assert_eq!(control.field(RecordField::MachineId), Some("m-pm"));
    assert_eq!(control.field(RecordField::GitTag), Some("v3.0.0"));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let err = load_records(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, sc_catalog::CatalogError::Io(_)));
}
