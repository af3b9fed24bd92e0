//! a three site, two block group reference dataset with hand-computed outputs.
use indexmap::IndexMap;
use sitechoice_core::model::{
    block_group::BlockGroup,
    calibration::BaselineVisitation,
    distance::DistanceMatrix,
    population::Population,
    reference::ReferenceData,
    site::{Site, SiteAttributes, SiteCoefficients},
};
use std::{collections::BTreeMap, sync::Arc};

pub const BG1: &str = "bg1, 35.0, -78.0";
pub const BG2: &str = "bg2, 36.0, -79.0";

pub const EXPECTED_RAW_UTILITY: [(&str, [f64; 2]); 3] = [
    ("A", [0.69, 0.58]),
    ("B", [0.27, 0.545]),
    ("C", [0.15, -0.29]),
];
pub const EXPECTED_INTERCEPT: f64 = -0.3961842105263157;
pub const EXPECTED_SLOPE: f64 = 0.5697368421052631;
pub const EXPECTED_ADJUSTMENT: [(&str, f64); 3] = [
    ("A", 4.690969976905313),
    ("B", 3.390773672055428),
    ("C", 1.7129792147806004),
];
pub const EXPECTED_CALIBRATED: [(&str, [f64; 2]); 3] = [
    ("A", [6.6846855101483955, 6.477008407655386]),
    ("B", [4.7007381227886755, 5.115382054431864]),
    ("C", [2.8748134575088837, 2.461242782359166]),
];
pub const EXPECTED_PROBABILITY: [(&str, [f64; 2]); 3] = [
    ("A", [0.46876398111409995, 0.46087785948270066]),
    ("B", [0.3296395489762275, 0.3639900063887972]),
    ("C", [0.2015964699096725, 0.1751321341285021]),
];
pub const EXPECTED_VISITS: [(&str, f64); 3] = [
    ("A", 325.7689502904502),
    ("B", 241.05282150713015),
    ("C", 133.17822820241963),
];
pub const EXPECTED_AVERAGE_UTILITY: [(&str, f64); 2] =
    [("Black", 1.613145371840586), ("Other", 1.6134543756813784)];
pub const EXPECTED_EQUITY_RATIO: [(&str, f64); 2] =
    [("Black", 0.49992274904041656), ("Other", 0.5000772509595834)];
pub const EXPECTED_BLOCK_GROUP_UTILITY: [(&str, [f64; 2]); 2] = [
    (BG1, [161.36397779858535, 484.0919333957561]),
    (BG2, [322.5796337535904, 161.2898168767952]),
];

pub fn attributes(acres: f64, trails: f64, picnic_area: f64) -> SiteAttributes {
    SiteAttributes {
        acres,
        trails,
        picnic_area,
        ..Default::default()
    }
}

pub fn site(name: &str, latitude: f64, longitude: f64, attributes: SiteAttributes) -> Site {
    Site {
        name: name.to_string(),
        latitude,
        longitude,
        attributes,
    }
}

pub fn reference_data() -> ReferenceData {
    let sites = [
        site("A", 35.2, -78.3, attributes(100.0, 2.0, 1.0)),
        site("B", 35.8, -78.9, attributes(3000.0, 0.0, 0.0)),
        site("C", 35.0, -78.0, attributes(50.0, 1.0, 0.0)),
    ]
    .into_iter()
    .map(|s| (s.name.clone(), s))
    .collect::<BTreeMap<_, _>>();
    let mut weights = [0.0; 10];
    weights[0] = 0.001;
    weights[1] = 0.1;
    weights[3] = 0.5;
    let distances = DistanceMatrix::new(
        vec![BlockGroup::from_label(BG1), BlockGroup::from_label(BG2)],
        BTreeMap::from([
            (String::from("A"), vec![10.0, 20.0]),
            (String::from("B"), vec![30.0, 5.0]),
            (String::from("C"), vec![0.0, 40.0]),
        ]),
    )
    .expect("fixture distances are valid");
    let population = Population::new(
        vec![BG1.to_string(), BG2.to_string()],
        IndexMap::from([
            (String::from("Black"), vec![100.0, 200.0]),
            (String::from("Other"), vec![300.0, 100.0]),
        ]),
    )
    .expect("fixture population is valid");
    let baseline_visits = BaselineVisitation::new(BTreeMap::from([
        (String::from("A"), 3.0),
        (String::from("B"), 2.0),
        (String::from("C"), 0.5),
    ]));
    ReferenceData::new(
        sites,
        SiteCoefficients::new(weights),
        distances,
        population,
        baseline_visits,
        None,
    )
    .expect("fixture reference data is valid")
}

pub fn reference() -> Arc<ReferenceData> {
    Arc::new(reference_data())
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} within {tolerance}, found {actual}"
    );
}
