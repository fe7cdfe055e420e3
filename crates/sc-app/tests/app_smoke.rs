use std::fs;

use sc_app::{
    AppError, BrowseSession, comparison_report, load_catalog, load_config, open_comparison,
    select_record,
};
use sc_catalog::FilterField;
use sc_compare::SelectOutcome;

const RECORDS: &str = r#"[
    {"id": "a", "name": "v3.LR.piControl", "campaignId": "v3.LR", "machineId": "m1",
     "simulationStartDate": "0001-01-01T00:00:00Z", "simulationEndDate": "0101-01-01T00:00:00Z"},
    {"id": "b", "name": "v3.HR.historical", "campaignId": "v3.HR", "machineId": "m2",
     "artifacts": [{"kind": "output", "uri": "/global/cfs/b/run"}]},
    {"id": "c", "name": 7}
]"#;

const MACHINES: &str = r#"[{"id": "m1", "name": "chrysalis"}, {"id": "m2", "name": "pm-cpu"}]"#;

fn write_workspace(dir: &std::path::Path) -> std::path::PathBuf {
    fs::create_dir_all(dir.join("data")).unwrap();
    fs::write(dir.join("data/sims.json"), RECORDS).unwrap();
    fs::write(dir.join("data/machines.json"), MACHINES).unwrap();
    let config = dir.join("simcat.yaml");
    fs::write(
        &config,
        "records: data/sims.json\nmachines: data/machines.json\nstate_dir: state\nhighlight_differences: true\n",
    )
    .unwrap();
    config
}

#[test]
fn browse_then_compare() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(&write_workspace(dir.path())).unwrap();
    let catalog = load_catalog(&config).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get("b").unwrap().machine_name(), Some("pm-cpu"));

    let mut browse = BrowseSession::new(&catalog);
    let nav = browse.apply_location("?campaignId=v3.HR");
    assert!(nav.is_none());
    let ids: Vec<&str> = browse
        .filtered(&catalog)
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(ids, vec!["b"]);
    assert_eq!(
        browse.facets().values(FilterField::CampaignId),
        ["v3.HR", "v3.LR"]
    );

    let mut session = open_comparison(&config).unwrap();
    assert!(session.highlight_differences());
    for id in ["a", "b"] {
        assert_eq!(
            select_record(&mut session, &catalog, id).unwrap(),
            SelectOutcome::Added
        );
    }
    let report = comparison_report(&session, &catalog);
    assert_eq!(report.headers, vec!["v3.LR.piControl", "v3.HR.historical"]);
    assert!(report.differing_rows() > 0);
    assert!(dir.path().join("state").is_dir());

    let reopened = open_comparison(&config).unwrap();
    assert_eq!(reopened.columns().selection(), ["a", "b"]);
}

#[test]
fn missing_catalog_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_workspace(dir.path());
    fs::remove_file(dir.path().join("data/sims.json")).unwrap();

    let config = load_config(&config_path).unwrap();
    let err = load_catalog(&config).unwrap_err();
    assert!(matches!(err, AppError::CatalogFileRead { .. }));
}
