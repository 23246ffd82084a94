//! Store and archive round trips.

use oildb::{
    encode, model, new_oil, set, Archive, ArchiveError, DirStore, LoadError, Measurement,
    MemoryStore, RecordNode, RecordStore, StoreError,
};
use serde_json::json;

fn sample_oil() -> RecordNode {
    let mut root = new_oil("EC00506");
    set(&mut root, "metadata.name", "Access West Blend Winter").unwrap();
    set(&mut root, "metadata.product_type", "Bitumen Blend").unwrap();
    set(&mut root, "metadata.labels.+", "dilbit").unwrap();
    set(&mut root, "sub_samples.+.metadata.name", "Fresh Oil Sample").unwrap();
    set(
        &mut root,
        "sub_samples.0.physical_properties.pour_point",
        Measurement::range(Some(-40.0), Some(-35.0), "C"),
    )
    .unwrap();
    set(
        &mut root,
        "sub_samples.0.physical_properties.densities.+.density",
        Measurement::point(927.5, "kg/m^3").with_standard_deviation(0.2, 3),
    )
    .unwrap();
    set(
        &mut root,
        "sub_samples.0.physical_properties.densities.0.ref_temp",
        Measurement::point(15.0, "C"),
    )
    .unwrap();
    root
}

#[test]
fn memory_archive_round_trips_full_and_sparse() {
    let oil = sample_oil();
    let mut archive = Archive::new(MemoryStore::new());

    archive.save_oil(&oil, false).unwrap();
    assert_eq!(archive.load_oil("EC00506").unwrap(), oil);

    archive.save_oil(&oil, true).unwrap();
    assert_eq!(archive.load_oil("EC00506").unwrap(), oil);
}

#[test]
fn sparse_documents_are_smaller_but_equivalent() {
    let oil = sample_oil();
    let full = encode(&oil, false);
    let sparse = encode(&oil, true);
    // the untouched metadata members drop out of the sparse document
    let sparse_meta = sparse["metadata"].as_object().unwrap();
    assert!(!sparse_meta.contains_key("comments"));
    assert!(full["metadata"].as_object().unwrap().contains_key("comments"));
    assert_eq!(
        oildb::guard::load(&sparse, model::oil(), oildb::CURRENT_VERSION).unwrap(),
        oil
    );
}

#[test]
fn dir_store_writes_one_file_per_record() {
    let dir = tempfile::tempdir().unwrap();
    let oil = sample_oil();
    let mut archive = Archive::new(DirStore::new(dir.path()));

    archive.save_oil(&oil, false).unwrap();
    assert!(dir.path().join("EC00506.json").is_file());
    assert_eq!(archive.load_oil("EC00506").unwrap(), oil);

    match archive.load_oil("EC99999").unwrap_err() {
        ArchiveError::Store(StoreError::NotFound(id)) => assert_eq!(id, "EC99999"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn saving_without_an_identity_is_refused() {
    let oil = model::oil().default_node();
    let mut archive = Archive::new(MemoryStore::new());
    assert!(matches!(
        archive.save_oil(&oil, false),
        Err(ArchiveError::Store(StoreError::MissingId))
    ));
}

#[test]
fn archive_surfaces_version_arbitration_per_record() {
    let mut store = MemoryStore::new();
    store
        .save(
            "XX00001",
            &json!({
                "oil_id": "XX00001",
                "schema_version": "9.9.9",
                "sub_samples": {"reshaped": true}
            }),
        )
        .unwrap();
    store
        .save("XX00002", &encode(&sample_oil(), true))
        .unwrap();

    let archive = Archive::new(store);
    // one bad record does not poison the batch: callers catch and continue
    assert!(matches!(
        archive.load_oil("XX00001").unwrap_err(),
        ArchiveError::Load(LoadError::Version { .. })
    ));
    assert!(archive.load_oil("XX00002").is_ok());
}
