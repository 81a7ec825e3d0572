use approx::assert_relative_eq;
use motor_fuzzy::presets::{self, SPEED};
use motor_fuzzy::{ConfigError, FuzzySystem, InferenceError, Inputs, SystemConfig};

const MOTOR_TRIANGULAR: &str = include_str!("../config/motor_triangular.toml");

fn motor(voltage: f64, torque: f64) -> Inputs {
    Inputs::new().with("voltage", voltage).with("torque", torque)
}

fn speed(system: &FuzzySystem, voltage: f64, torque: f64) -> Result<f64, InferenceError> {
    system
        .infer(&motor(voltage, torque))
        .map(|outputs| outputs.crisp(SPEED).unwrap())
}

#[test]
fn triangular_reference_speeds() {
    let system = presets::triangular().unwrap();

    for (voltage, torque, expected) in [
        (5., 5., 601.1902857142984),
        (10., 10., 1113.4510652920571),
        (12., 12., 1209.049484142156),
        (15., 15., 1636.7647058823525),
        (20., 20., 1911.9852971725288),
        (24.5, 24.5, 2184.6439659995444),
        (25., 25., 2266.333333333331),
    ] {
        assert_relative_eq!(speed(&system, voltage, torque).unwrap(), expected, epsilon = 1e-6);
    }
}

#[test]
fn gaussian_reference_speeds() {
    let system = presets::gaussian().unwrap();

    for (voltage, torque, expected) in [
        (0., 0., 494.6404828895163),
        (15., 15., 1405.6921525537534),
        (25., 25., 2004.6203960555304),
        (0., 25., 1249.4999999999623),
    ] {
        assert_relative_eq!(speed(&system, voltage, torque).unwrap(), expected, epsilon = 1e-6);
    }
}

#[test]
fn medium_inputs_land_in_the_moderate_region() {
    let system = presets::triangular().unwrap();
    let speed = speed(&system, 15., 15.).unwrap();

    // Centroids of the bare Slow and Fast triangles
    let slow = (400. + 1000. + 1500.) / 3.;
    let fast = (1200. + 2000. + 2500.) / 3.;

    assert!(slow < speed && speed < fast, "speed {speed} outside ({slow}, {fast})");
    assert!((800. ..2000.).contains(&speed));
}

#[test]
fn domain_bounds_are_inclusive() {
    let system = presets::gaussian().unwrap();

    for (voltage, torque) in [(0., 0.), (25., 25.), (0., 25.), (25., 0.)] {
        assert!(speed(&system, voltage, torque).is_ok(), "({voltage}, {torque}) rejected");
    }

    let err = speed(&system, 25. + f64::EPSILON * 32., 10.).unwrap_err();
    assert!(matches!(err, InferenceError::OutOfDomain { .. }));

    // At the lower bound the triangular rule base has no coverage, which is
    // reported as such rather than as a domain error
    let triangular = presets::triangular().unwrap();
    assert_eq!(
        speed(&triangular, 0., 0.),
        Err(InferenceError::NoRuleFired(SPEED.to_owned()))
    );
}

#[test]
fn uncovered_inputs_yield_no_rule_fired() {
    let system = presets::triangular().unwrap();

    // Voltage is Very Low / Low while torque is High / Very High: no diagonal rule applies
    for (voltage, torque) in [(5., 20.), (20., 5.), (2., 24.)] {
        assert_eq!(
            speed(&system, voltage, torque),
            Err(InferenceError::NoRuleFired(SPEED.to_owned()))
        );
    }

    // The combinatorial rule base covers the same inputs
    let combinatorial = presets::combinatorial().unwrap();
    assert!(speed(&combinatorial, 5., 20.).is_ok());
}

#[test]
fn combinatorial_torque_direction_is_inverted() {
    let system = presets::combinatorial().unwrap();

    let high_voltage = speed(&system, 20., 5.).unwrap();
    let high_torque = speed(&system, 5., 20.).unwrap();

    assert_relative_eq!(high_voltage, 2251.5761957730715, epsilon = 1e-6);
    assert_relative_eq!(high_torque, 499.9999999999975, epsilon = 1e-6);

    assert_relative_eq!(speed(&system, 18., 10.).unwrap(), 1865.6089244443895, epsilon = 1e-6);
    assert_relative_eq!(speed(&system, 10., 18.).unwrap(), 853.9950847457494, epsilon = 1e-6);

    // Equal inputs stay moderate
    assert_relative_eq!(speed(&system, 15., 15.).unwrap(), 1462.549019607843, epsilon = 1e-6);
    assert_relative_eq!(speed(&system, 10., 10.).unwrap(), 1455.3262498403, epsilon = 1e-6);
}

#[test]
fn config_file_matches_triangular_preset() {
    let from_file = SystemConfig::from_toml_str(MOTOR_TRIANGULAR).unwrap().build().unwrap();
    let preset = presets::triangular().unwrap();

    assert_eq!(from_file.rules(), preset.rules());
    assert!(from_file.variables().eq(preset.variables()));

    for (voltage, torque) in [(5., 5.), (12.5, 13.), (15., 15.), (22., 19.), (25., 25.)] {
        assert_eq!(
            from_file.infer(&motor(voltage, torque)),
            preset.infer(&motor(voltage, torque))
        );
    }
}

#[test]
fn misconfigured_rule_base_fails_at_setup() {
    let text = MOTOR_TRIANGULAR.replace("speed is Moderate", "speed is Medium");
    let err = SystemConfig::from_toml_str(&text).unwrap().build().unwrap_err();
    assert!(matches!(err, ConfigError::UnknownLabel { rule: 2, .. }));

    let text = MOTOR_TRIANGULAR.replace("torque is Very High", "current is Very High");
    let err = SystemConfig::from_toml_str(&text).unwrap().build().unwrap_err();
    assert!(matches!(err, ConfigError::UnknownVariable { rule: 4, .. }));

    let text = MOTOR_TRIANGULAR.replace("high = 2500.0, step = 1.0", "high = 2500.0, step = 0.0");
    let err = SystemConfig::from_toml_str(&text).unwrap().build().unwrap_err();
    assert!(matches!(err, ConfigError::DegenerateUniverse { .. }));
}

#[test]
fn one_system_serves_concurrent_callers() {
    let system = presets::combinatorial().unwrap();
    let expected = speed(&system, 18., 10.).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| speed(&system, 18., 10.).unwrap()))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().to_bits(), expected.to_bits());
        }
    });
}

#[test]
fn curves_come_from_the_term_table() {
    let system = presets::triangular().unwrap();
    let torque = system.sample_variable("torque").unwrap();

    assert_eq!(
        torque.iter().map(|(label, _)| *label).collect::<Vec<_>>(),
        presets::LEVELS
    );

    // "High" torque ramps up from 12 and peaks at 18
    let high = system.sample_curve("torque", "High").unwrap();
    assert_eq!(high[12], (12., 0.));
    assert_eq!(high[18], (18., 1.));
    assert!(high[13..=18].windows(2).all(|w| w[0].1 < w[1].1));
}
