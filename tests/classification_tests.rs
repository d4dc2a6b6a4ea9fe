//! Classification Integration Tests
//!
//! End-to-end checks through the public API: reference scenarios, max-dominance
//! over randomized records, batch behaviour and the backend JSON shape.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tree_risk_engine::{
    aggregate_level, assess, classify, classify_batch, compute_indices, project_defects,
    AssessmentError, Biometrics, ClassificationProfile, DefectCriterion, HazardSummary,
    InspectionHistory, MeasurementRecord, RiskIndex, RiskLevel, RootMetric,
};

const SURFACE: RootMetric = RootMetric::SurfaceDiameter;
const EFFECTIVE: RootMetric = RootMetric::EffectiveArea;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("tree_risk_engine=debug")
        .with_test_writer()
        .try_init();
}

fn record_with(biometrics: Biometrics) -> MeasurementRecord {
    MeasurementRecord {
        biometrics,
        ..MeasurementRecord::new("scenario")
    }
}

// =========================================================================
// Reference scenarios
// =========================================================================

#[test]
fn test_scenario_stability_ratio_sixty() {
    let record = record_with(Biometrics {
        height: Some(60.0),
        diameter: Some(1.0),
        ..Default::default()
    });
    assert_eq!(compute_indices(&record).stability.code(), 2);
}

#[test]
fn test_scenario_stability_beyond_one_hundred() {
    let record = record_with(Biometrics {
        height: Some(100.0),
        diameter: Some(0.9),
        ..Default::default()
    });
    assert_eq!(compute_indices(&record).stability, RiskIndex::UNDEFINED);
}

#[test]
fn test_scenario_gravity_height() {
    let record = record_with(Biometrics {
        height: Some(100.0),
        height_estimation: Some(40.0),
        ..Default::default()
    });
    assert_eq!(compute_indices(&record).gravity_height.code(), 2);
}

#[test]
fn test_scenario_root_crown_by_surface() {
    let record = record_with(Biometrics {
        root_surface_diameter: Some(3.0),
        crown_projection_area: Some(1.0),
        ..Default::default()
    });
    assert_eq!(compute_indices(&record).root_crown_by_surface.code(), 0);
}

#[test]
fn test_scenario_mixed_pool_is_critical() {
    init_tracing();

    let defects = [Some(0), Some(0), None, Some(3), Some(1)].map(|c: Option<u8>| c.and_then(RiskLevel::from_code));
    let indices = [2, 0, -1, 2].map(|c| RiskIndex::from_code(c).unwrap());
    assert_eq!(aggregate_level(&defects, &indices), Some(RiskLevel::Critical));

    // Same pool produced from a record:
    // stability 60/1 → 2, gravity 10/60 → 0, root crown area 0 → -1, wind 60×0.01/1 → 2
    let mut record = record_with(Biometrics {
        height: Some(60.0),
        diameter: Some(1.0),
        height_estimation: Some(10.0),
        crown_width: Some(0.01),
        crown_projection_area: Some(0.0),
        root_surface_diameter: Some(1.0),
        ..Default::default()
    });
    record.defects.unbalanced_crown = Some(0);
    record.defects.overextended_branches = Some(0);
    record.defects.dead_branches = Some(3);
    record.defects.inclination = Some(1);

    let indices = compute_indices(&record);
    assert_eq!(
        [
            indices.stability.code(),
            indices.gravity_height.code(),
            indices.root_crown_by_surface.code(),
            indices.wind_stability_by_surface.code(),
        ],
        [2, 0, -1, 2]
    );

    let classification = classify(&record, SURFACE, SURFACE).unwrap();
    assert_eq!(classification.level, Some(RiskLevel::Critical));
    assert_eq!(classification.message, "critical");
    assert_eq!(classification.color, "#FF0000");
    assert_eq!(classification.icon, "blocked");
}

#[test]
fn test_scenario_nothing_known_is_undefined() {
    let record = MeasurementRecord::new("unknown-tree");
    assert!(project_defects(&record).iter().all(|o| o.severity.is_none()));

    let classification = classify(&record, SURFACE, EFFECTIVE).unwrap();
    assert_eq!(classification.level, None);
    assert_ne!(classification.level, Some(RiskLevel::Stable));
    assert_eq!(classification.message, "unknown");
}

// =========================================================================
// Properties
// =========================================================================

/// Mostly plausible values, with some absent and some zero.
fn measure(rng: &mut StdRng, max: f64) -> Option<f64> {
    match rng.gen_range(0..10) {
        0 => None,
        1 => Some(0.0),
        _ => Some(rng.gen_range(0.0..max)),
    }
}

fn random_record(rng: &mut StdRng, n: usize) -> MeasurementRecord {
    let biometrics = Biometrics {
        height: measure(rng, 40.0),
        diameter: measure(rng, 1.5),
        crown_width: measure(rng, 15.0),
        crown_projection_area: measure(rng, 150.0),
        root_surface_diameter: measure(rng, 20.0),
        effective_root_area: measure(rng, 200.0),
        height_estimation: measure(rng, 25.0),
    };

    let mut record = MeasurementRecord {
        biometrics,
        ..MeasurementRecord::new(format!("tree-{}", n))
    };

    let d = &mut record.defects;
    for slot in [
        &mut d.unbalanced_crown,
        &mut d.overextended_branches,
        &mut d.cracks,
        &mut d.dead_branches,
        &mut d.inclination,
        &mut d.v_forks,
        &mut d.cavities,
        &mut d.bark_damage,
        &mut d.soil_lifting,
        &mut d.cut_damaged_roots,
        &mut d.basal_rot,
        &mut d.exposed_surface_roots,
        &mut d.wind_exposure,
        &mut d.drought_exposure,
        &mut d.aggregate_status,
    ] {
        *slot = if rng.gen_bool(0.4) { None } else { Some(rng.gen_range(0..=3)) };
    }
    record
}

#[test]
fn test_level_is_max_of_defined_signals() {
    let mut rng = StdRng::seed_from_u64(0x7EE5);

    for n in 0..500 {
        let record = random_record(&mut rng, n);
        let indices = compute_indices(&record);

        for (root, wind) in [(SURFACE, SURFACE), (SURFACE, EFFECTIVE), (EFFECTIVE, SURFACE), (EFFECTIVE, EFFECTIVE)] {
            let expected = project_defects(&record)
                .iter()
                .filter_map(|o| o.severity)
                .map(|code| code as i8)
                .chain(indices.selected(root, wind).iter().map(|(_, index)| index.code()))
                .filter(|code| *code >= 0)
                .max()
                .map(|code| code as u8);

            let classification = classify(&record, root, wind).unwrap();
            assert_eq!(classification.level.map(|l| l.code()), expected, "record {}", n);
        }
    }
}

#[test]
fn test_any_three_dominates() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..1_000 {
        let mut defects: Vec<Option<RiskLevel>> = (0..rng.gen_range(0..15))
            .map(|_| if rng.gen_bool(0.3) { None } else { RiskLevel::from_code(rng.gen_range(0..=2)) })
            .collect();
        let mut indices: Vec<RiskIndex> = (0..rng.gen_range(0..4))
            .map(|_| RiskIndex::from_code(rng.gen_range(-1..=2)).unwrap())
            .collect();

        if rng.gen_bool(0.5) {
            defects.push(Some(RiskLevel::Critical));
        } else {
            indices.push(RiskIndex::new(RiskLevel::Critical));
        }

        assert_eq!(aggregate_level(&defects, &indices), Some(RiskLevel::Critical));
    }
}

#[test]
fn test_all_undefined_pool_is_never_stable() {
    let mut rng = StdRng::seed_from_u64(9);

    for _ in 0..200 {
        let defects = vec![None; rng.gen_range(0..15)];
        let indices = vec![RiskIndex::UNDEFINED; rng.gen_range(0..4)];
        assert_eq!(aggregate_level(&defects, &indices), None);
    }
}

#[test]
fn test_classify_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(3);
    for n in 0..100 {
        let record = random_record(&mut rng, n);
        let first = classify(&record, EFFECTIVE, SURFACE);
        let second = classify(&record, EFFECTIVE, SURFACE);
        assert_eq!(first, second);
    }
}

// =========================================================================
// Batch and history
// =========================================================================

#[test]
fn test_batch_matches_sequential_and_keeps_order() {
    init_tracing();

    let mut rng = StdRng::seed_from_u64(11);
    let mut records: Vec<_> = (0..64).map(|n| random_record(&mut rng, n)).collect();
    records[17].defects.bark_damage = Some(6);

    let profile = ClassificationProfile::new(SURFACE, EFFECTIVE);
    let batch = classify_batch(&records, &profile);
    assert_eq!(batch.len(), records.len());

    for (record, result) in records.iter().zip(&batch) {
        assert_eq!(result, &classify(record, SURFACE, EFFECTIVE));
    }

    assert_eq!(
        batch[17],
        Err(AssessmentError::InvalidInput { criterion: DefectCriterion::BarkDamage, value: 6 })
    );

    let summary = HazardSummary::from_classifications(&batch);
    assert_eq!(summary.total(), 64);
    assert_eq!(summary.failed, 1);
}

#[test]
fn test_history_feeds_classification() {
    let mut history = InspectionHistory::new();

    let mut first = MeasurementRecord::new("plane-101");
    first.defects.cavities = Some(3);
    history.submit(first).unwrap();

    // Re-inspection after the cavity was treated
    let mut second = MeasurementRecord::new("plane-101");
    second.defects.cavities = Some(1);
    history.submit(second).unwrap();

    let mut other = MeasurementRecord::new("oak-7");
    other.defects.wind_exposure = Some(2);
    history.submit(other).unwrap();

    let current: Vec<MeasurementRecord> = history.current_records().into_iter().cloned().collect();
    let profile = ClassificationProfile::new(SURFACE, SURFACE);
    let levels: Vec<_> = classify_batch(&current, &profile)
        .into_iter()
        .map(|r| r.unwrap().level)
        .collect();

    // ordered by element id: oak-7, plane-101
    assert_eq!(levels, vec![Some(RiskLevel::Warning), Some(RiskLevel::Caution)]);
}

#[test]
fn test_backend_json_to_assessment() {
    let json = r#"{
        "element_id": "linden-33",
        "inspected_on": "2024-04-22",
        "height": 24.0,
        "diameter": 0.35,
        "crown_width": 7.0,
        "crown_projection_area": 38.0,
        "root_surface_diameter": 9.0,
        "effective_root_area": 64.0,
        "height_estimation": 9.0,
        "cracks": 1,
        "v_forks": 2,
        "drought_exposure": null
    }"#;

    let record: MeasurementRecord = serde_json::from_str(json).unwrap();
    assert!(record.validate().is_empty());

    let profile = ClassificationProfile::from_json(
        r#"{"root_crown_metric": "effective_area", "wind_metric": "effective_area"}"#,
    )
    .unwrap();
    let assessment = assess(&record, &profile).unwrap();

    // slenderness 24 / 0.35 ≈ 68.6 → 2; wind 24 × 7 / 64 ≈ 2.6 → 3
    assert_eq!(assessment.indices.stability.code(), 2);
    assert_eq!(assessment.indices.wind_stability_by_effective_area.code(), 3);
    assert_eq!(assessment.classification.level, Some(RiskLevel::Critical));

    let out = serde_json::to_value(&assessment).unwrap();
    assert_eq!(out["classification"]["level"], 3);
    assert_eq!(out["indices"]["stability"], 2);
}
