use tracing::{debug, debug_span, info};

use crate::{Error, Matrix, NeuralNetwork, Result};

#[derive(Debug, Clone, Copy)]
pub struct TrainConfig {
    pub iterations: usize,
    pub learning_rate: f32,
    /// Emit a `debug!` progress line every `log_every` iterations; `0` disables.
    pub log_every: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            learning_rate: 1.2,
            log_every: 0,
        }
    }
}

impl TrainConfig {
    pub fn new(iterations: usize, learning_rate: f32) -> Self {
        Self {
            iterations,
            learning_rate,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::InvalidConfig("iterations must be > 0".to_owned()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::InvalidConfig(
                "learning_rate must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct TrainReport {
    pub iterations: usize,
    /// MSE before the first update.
    pub initial_loss: f32,
    /// MSE after the last update.
    pub final_loss: f32,
}

impl NeuralNetwork {
    /// Full-batch gradient descent on the training pair.
    ///
    /// Runs `cfg.iterations` forward, backward, update cycles with the
    /// configured activation. There is no early stopping.
    pub fn train(&mut self, cfg: TrainConfig) -> Result<TrainReport> {
        cfg.validate()?;

        let span = debug_span!(
            "train",
            iterations = cfg.iterations,
            learning_rate = cfg.learning_rate,
            hidden = self.hidden_size(),
        );
        let _enter = span.enter();

        let initial_loss = self.loss()?;
        info!(initial_loss, "training started");

        for iter in 1..=cfg.iterations {
            let fwd = self.forward(self.dataset().x())?;
            let grads = self.backward(&fwd)?;
            self.update_parameters(&grads, cfg.learning_rate)?;

            if cfg.log_every != 0 && iter % cfg.log_every == 0 {
                let loss = self.loss()?;
                debug!(iter, loss, "progress");
            }
        }

        let final_loss = self.loss()?;
        info!(initial_loss, final_loss, "training finished");

        Ok(TrainReport {
            iterations: cfg.iterations,
            initial_loss,
            final_loss,
        })
    }

    /// Network output for `x` (features x samples). Does not modify the network.
    pub fn predict(&self, x: &Matrix) -> Result<Matrix> {
        Ok(self.forward(x)?.a2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NetworkBuilder;

    fn net() -> NeuralNetwork {
        let x = Matrix::from_vec(1, 4, vec![0.1, 0.2, 0.3, 0.4]).unwrap();
        let y = Matrix::from_vec(1, 4, vec![0.2, 0.4, 0.6, 0.8]).unwrap();
        NetworkBuilder::new(2).unwrap().seed(3).build(x, y).unwrap()
    }

    #[test]
    fn defaults() {
        let cfg = TrainConfig::default();
        assert_eq!(cfg.iterations, 10_000);
        assert_eq!(cfg.learning_rate, 1.2);
        assert_eq!(cfg.log_every, 0);
    }

    #[test]
    fn rejects_bad_hyperparameters() {
        let mut n = net();
        for cfg in [
            TrainConfig::new(0, 0.1),
            TrainConfig::new(10, 0.0),
            TrainConfig::new(10, -1.0),
            TrainConfig::new(10, f32::NAN),
            TrainConfig::new(10, f32::INFINITY),
        ] {
            assert!(matches!(n.train(cfg), Err(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn report_matches_loss_before_and_after() {
        let mut n = net();
        let before = n.loss().unwrap();
        let report = n.train(TrainConfig::new(50, 0.05)).unwrap();
        assert_eq!(report.iterations, 50);
        assert_eq!(report.initial_loss, before);
        assert_eq!(report.final_loss, n.loss().unwrap());
    }

    #[test]
    fn predict_leaves_network_untouched() {
        let n = net();
        let x = n.dataset().x().clone();
        let first = n.predict(&x).unwrap();
        let second = n.predict(&x).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.shape(), (1, 4));
        assert_eq!(n.loss().unwrap(), n.loss().unwrap());
    }

    #[test]
    fn progress_logging_does_not_change_training() {
        let mut quiet = net();
        let mut chatty = net();
        let a = quiet.train(TrainConfig::new(20, 0.05)).unwrap();
        let b = chatty
            .train(TrainConfig {
                log_every: 5,
                ..TrainConfig::new(20, 0.05)
            })
            .unwrap();
        assert_eq!(a.final_loss, b.final_loss);
    }
}
