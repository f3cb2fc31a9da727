use tracing_subscriber::EnvFilter;

use rust_matnet::{Matrix, NetworkBuilder, TrainConfig};

fn main() -> rust_matnet::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Ten evenly spaced inputs labelled by parity: 0, 1, 0, 1, ...
    let x = Matrix::from_vec(1, 10, (1..=10).map(|i| i as f32 / 10.0).collect())?;
    let y = Matrix::from_vec(1, 10, (1..=10).map(|i| (i % 2 == 0) as u8 as f32).collect())?;

    // 1 -> 3 -> 1 network, ReLU throughout.
    let mut net = NetworkBuilder::new(3)?.seed(42).build(x.clone(), y.clone())?;
    let report = net.train(TrainConfig {
        log_every: 100,
        ..TrainConfig::new(1000, 0.1)
    })?;
    println!(
        "initial_loss={} final_loss={}",
        report.initial_loss, report.final_loss
    );

    let pred = net.predict(&x)?;
    for i in 0..x.columns() {
        println!("x={:.1} y={} pred={:.4}", x[(0, i)], y[(0, i)], pred[(0, i)]);
    }

    Ok(())
}
