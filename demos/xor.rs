use mlp_trainer::{MultiLayerPerceptron, NetworkConfig, Pattern, TrainConfig};

fn main() -> mlp_trainer::Result<()> {
    let mut network = MultiLayerPerceptron::with_train_config(
        NetworkConfig::new(vec![2, 3, 1])?,
        TrainConfig::new(0.35)?,
    );

    let patterns = vec![
        Pattern::new(vec![1.0, 0.0], vec![1.0]),
        Pattern::new(vec![1.0, 1.0], vec![0.0]),
        Pattern::new(vec![0.0, 1.0], vec![1.0]),
        Pattern::new(vec![0.0, 0.0], vec![0.0]),
    ];

    let sweeps = 5000;

    for sweep in 0..sweeps {
        let stats = network.teach(&patterns)?;
        if sweep % 500 == 0 {
            println!("Sweep {sweep}: mean error = {:.6}", stats.mean_error);
        }
    }

    for pattern in &patterns {
        println!("Input: {:?} -> Output: {:.4}", pattern.x, network.predict(&pattern.x)?[0]);
    }
    Ok(())
}
