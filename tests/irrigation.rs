use fuzzy_mamdani::{CompiledSystem, EngineConfig, InferenceError, Inputs, SystemSpec};

const OUTPUT: &str = "irrigation_duration";

fn spec() -> SystemSpec {
    serde_json::from_str(include_str!("fixtures/irrigation.json")).unwrap()
}

fn system() -> CompiledSystem {
    spec().compile().unwrap()
}

fn readings(moisture: f64, temperature: f64, radiation: f64) -> Inputs {
    Inputs::new()
        .with("soil_moisture", moisture)
        .with("temperature", temperature)
        .with("solar_radiation", radiation)
}

fn duration(system: &CompiledSystem, moisture: f64, temperature: f64, radiation: f64) -> f64 {
    system
        .infer(&readings(moisture, temperature, radiation))
        .unwrap()
        .output(OUTPUT)
        .unwrap()
}

#[test]
fn test_system_info() {
    let info = system().info();

    assert_eq!(info.num_rules, 12);
    assert_eq!(info.inputs, vec!["soil_moisture", "temperature", "solar_radiation"]);
    assert_eq!(info.outputs, vec![OUTPUT]);
    assert_eq!(info.rule_labels[0], "R1: very dry + hot + high radiation");
    assert_eq!(info.rule_labels[11], "R12: normal + mild + medium radiation");
}

#[test]
fn test_extreme_drought() {
    let system = system();
    let result = system.infer(&readings(15., 35., 900.)).unwrap();
    let value = result.output(OUTPUT).unwrap();

    // very_dry(15) = 0.5 caps R1; hot and high radiation are both fully true
    assert_eq!(result.firing_strength("R1: very dry + hot + high radiation"), Some(0.5));
    assert_eq!(result.firing_strength("R11: high radiation + hot"), Some(1.));
    assert_eq!(result.firing_strength("R4: dry + hot"), Some(0.25));
    assert_eq!(result.firing_strength("R8: wet"), Some(0.));

    // Long and medium durations together land in the upper half
    assert!(value > 15., "got {value}");
    assert!((value - 20.4375).abs() < 1e-9, "got {value}");
}

#[test]
fn test_wet_soil_dominates() {
    let system = system();
    let result = system.infer(&readings(80., 20., 400.)).unwrap();
    let value = result.output(OUTPUT).unwrap();
    let wet = result.firing_strength("R8: wet").unwrap();

    assert!((wet - 2. / 3.).abs() < 1e-12);
    for activation in result.firing_strengths() {
        assert!(activation.strength <= wet, "{} fired at {}", activation.label, activation.strength);
    }
    assert!(value < 5., "got {value}");
    assert!((value - 25. / 11.).abs() < 1e-9, "got {value}");
}

#[test]
fn test_moderate_conditions() {
    let system = system();

    assert!((duration(&system, 60., 22., 500.) - 8.).abs() < 1e-9);
    assert!((duration(&system, 30., 25., 750.) - 17.).abs() < 1e-9);
}

#[test]
fn test_universe_extremes() {
    let system = system();
    let low = system.infer(&readings(0., 0., 0.)).unwrap();
    let high = system.infer(&readings(100., 40., 1000.)).unwrap();

    assert_eq!(low.firing_strength("R10: very dry + cold"), Some(1.));
    assert!((low.output(OUTPUT).unwrap() - 17.).abs() < 1e-9);
    assert!(!low.output_detail(OUTPUT).unwrap().fallback);

    assert_eq!(high.firing_strength("R8: wet"), Some(1.));
    assert_eq!(high.firing_strength("R11: high radiation + hot"), Some(1.));
    assert!((high.output(OUTPUT).unwrap() - 97. / 9.).abs() < 1e-9);
    assert!(low.warnings().is_empty() && high.warnings().is_empty());
}

#[test]
fn test_out_of_range_clamped_or_rejected() {
    let system = system();
    let clamped = system.infer(&readings(120., -3., 1500.)).unwrap();

    assert_eq!(clamped.warnings().len(), 3);
    assert_eq!(clamped.output(OUTPUT), Some(duration(&system, 100., 0., 1000.)));

    let mut spec = spec();
    spec.config = EngineConfig::strict();
    let strict = spec.compile().unwrap();

    assert!(matches!(
        strict.infer(&readings(120., 20., 500.)),
        Err(InferenceError::InputRange { variable, .. }) if variable == "soil_moisture"
    ));
}

#[test]
fn test_no_rules_falls_back() {
    let mut spec = spec();
    spec.rules.clear();

    let system = spec.compile().unwrap();
    let result = system.infer(&readings(15., 35., 900.)).unwrap();

    assert_eq!(result.output(OUTPUT), Some(15.));
    assert!(result.output_detail(OUTPUT).unwrap().fallback);

    spec.config = EngineConfig::strict();
    let system = spec.compile().unwrap();

    assert_eq!(
        system.infer(&readings(15., 35., 900.)).unwrap_err(),
        InferenceError::Undefined {
            variable: OUTPUT.into()
        }
    );
}

#[test]
fn test_sample_batch() {
    let system = system();
    let batch: Vec<_> = [
        (15., 35., 900.),
        (30., 25., 750.),
        (60., 22., 500.),
        (80., 20., 400.),
        (25., 12., 300.),
        (10., 8., 200.),
        (65., 18., 150.),
        (35., 28., 600.),
    ]
    .into_iter()
    .map(|(m, t, r)| readings(m, t, r))
    .collect();
    let results = system.infer_batch(&batch);

    assert_eq!(results.len(), batch.len());
    for (inputs, result) in batch.iter().zip(results) {
        let result = result.unwrap();
        let value = result.output(OUTPUT).unwrap();

        assert_eq!(result, system.infer(inputs).unwrap());
        assert!((0. ..=30.).contains(&value));
    }
}

#[test]
fn test_shared_across_threads() {
    let system = system();
    let expected = duration(&system, 15., 35., 900.);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                assert_eq!(duration(&system, 15., 35., 900.), expected);
            });
        }
    });
}

#[test]
fn test_membership_introspection() {
    let system = system();

    assert_eq!(system.degree("soil_moisture", "very_dry", 15.), Some(0.5));
    assert_eq!(system.degree("soil_moisture", "very_dry", -10.), Some(1.));
    assert_eq!(system.degree("temperature", "hot", 28.5), Some(0.5));
    assert_eq!(
        system.fuzzify("solar_radiation", 700.),
        Some(vec![("low", 0.), ("medium", 0.2), ("high", 1. / 3.)])
    );
    assert_eq!(system.membership_curve(OUTPUT, "long").map(<[f64]>::len), Some(31));
}
