use std::time::Instant;

use tracing::info;
use tracing_subscriber::EnvFilter;

use rust_matnet::{Matrix, Result};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0])?;
    let b = Matrix::from_vec(2, 2, vec![5.0, 6.0, 7.0, 8.0])?;
    println!("{a}");
    println!("{b}");

    let started = Instant::now();
    let dot = a.dot(&b)?;
    let product = a.matmul(&b)?;
    info!(elapsed_us = started.elapsed().as_micros() as u64, "dot + matmul");
    println!("{dot}");
    println!("{product}");
    Ok(())
}
