use ferrite_mlp::{train, Dataset, NetworkSpec, TrainConfig};

fn main() -> ferrite_mlp::NnResult<()> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::WARN).init();

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    // Two output units, one per class, so the tester's argmax is meaningful.
    let expected_outputs = vec![
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
    ];
    let data = Dataset::from_rows(&inputs, &expected_outputs)?;

    let mut network = NetworkSpec::new(vec![2, 4, 2], 3).build()?;
    let config = TrainConfig::new(5000, 1, 2.0)
        .with_checkpoints(std::env::temp_dir(), "xor");

    let report = train(&mut network, &data, &data, &config)?;
    for stats in report.epochs.iter().step_by(1000) {
        println!("Epoch {}: loss = {:.6}, accuracy = {:.2}", stats.epoch, stats.train_loss, stats.test_accuracy);
    }

    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4?}", input, network.predict(input)?);
    }
    Ok(())
}
