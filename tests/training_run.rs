use mlp_trainer::codec;
use mlp_trainer::config::run;
use mlp_trainer::loss::SquaredError;
use mlp_trainer::patterns::read_patterns;
use mlp_trainer::{MultiLayerPerceptron, NetworkConfig, Pattern, RunConfig, WeightStore};

const XOR: &str = "\
XOR
x1 x2    y
0 0    0
0 1    1
1 0    1
1 1    0
";

fn total_error(net: &MultiLayerPerceptron, patterns: &[Pattern]) -> f64 {
    patterns
        .iter()
        .map(|p| SquaredError::loss(&net.predict(&p.x).unwrap(), &p.y))
        .sum()
}

#[test]
fn sweeps_over_a_pattern_file_reduce_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("xor.dat");
    std::fs::write(&path, XOR).unwrap();
    let patterns = read_patterns(&path).unwrap();
    assert_eq!(patterns.len(), 4);

    let mut net = MultiLayerPerceptron::new(NetworkConfig::new(vec![2, 3, 1]).unwrap());
    let initial = total_error(&net, &patterns);
    assert!((initial - 1.712187541002899).abs() < 1e-9);

    for _ in 0..200 {
        net.teach(&patterns).unwrap();
    }
    let trained = total_error(&net, &patterns);
    assert!(trained < 1.0, "error after 200 sweeps: {trained}");
}

#[test]
fn trained_weights_survive_a_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let weights = dir.path().join("weights.tnn");
    let config = NetworkConfig::new(vec![4, 10, 10, 2]).unwrap();
    let pattern = Pattern::new(vec![0.1, 0.9, 0.3, 0.5], vec![0.0, 1.0]);

    let mut trained = MultiLayerPerceptron::new(config.clone());
    trained.teach(std::slice::from_ref(&pattern)).unwrap();
    trained.write_weights(&weights).unwrap();

    let mut restored = MultiLayerPerceptron::new(config);
    restored.read_weights(&weights).unwrap();
    assert_eq!(restored.weights(), trained.weights());
    assert_eq!(
        restored.predict(&pattern.x).unwrap(),
        trained.predict(&pattern.x).unwrap()
    );
    assert_eq!(restored.weights_report(), trained.weights_report());
}

#[test]
fn weight_file_bytes_of_a_fresh_network() {
    let store = WeightStore::new(&NetworkConfig::new(vec![2, 2, 1]).unwrap());
    let bytes = codec::to_bytes(&store).unwrap();

    assert_eq!(bytes.len(), (2 + 3 * 2 * 8) + (2 + 3 * 8));
    assert_eq!(&bytes[..2], &[3, 2]);
    assert_eq!(&bytes[2..10], &0.9238711495066281f64.to_be_bytes());
    assert_eq!(&bytes[50..52], &[3, 1]);
    assert_eq!(codec::from_bytes(&bytes).unwrap(), store);
}

#[test]
fn full_run_lists_trains_writes_and_verifies() {
    let dir = tempfile::tempdir().unwrap();
    let patterns_path = dir.path().join("xor.dat");
    let weights_path = dir.path().join("weights.tnn");
    std::fs::write(&patterns_path, XOR).unwrap();

    let layers = NetworkConfig::new(vec![2, 3, 1]).unwrap();
    let mut config = RunConfig::new(layers.clone(), &patterns_path);
    config.weights = Some(weights_path.clone());
    config.sweeps = 3;

    let mut out = Vec::new();
    let history = run(&config, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(history.len(), 3);
    assert!(history.iter().all(|s| s.patterns == 4));
    assert!(text.starts_with("Pattern 1: X{0.0, 0.0}; Y{0.0};\nPattern 2: X{0.0, 1.0}; Y{1.0};\n"));
    assert!(text.contains("Pattern 4: X{1.0, 1.0}; Y{0.0};\n"));

    let mut expected = MultiLayerPerceptron::new(layers);
    let patterns = read_patterns(&patterns_path).unwrap();
    for _ in 0..3 {
        expected.teach(&patterns).unwrap();
    }
    assert_eq!(&codec::read_file(&weights_path).unwrap(), expected.weights());

    // The dump is printed once after training and once more after reading back.
    let report = expected.weights_report();
    assert_eq!(text.matches(report.as_str()).count(), 2);
}

#[test]
fn run_without_verification_prints_one_dump() {
    let dir = tempfile::tempdir().unwrap();
    let patterns_path = dir.path().join("xor.dat");
    std::fs::write(&patterns_path, XOR).unwrap();

    let mut config = RunConfig::new(NetworkConfig::new(vec![2, 2, 1]).unwrap(), &patterns_path);
    config.weights = Some(dir.path().join("weights.tnn"));
    config.verify_weights = false;

    let mut out = Vec::new();
    run(&config, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches("Weights from layer 1 to 2:").count(), 1);
    assert!(dir.path().join("weights.tnn").exists());
}
