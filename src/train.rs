

// imports
use crate::config::JsonTrain;
use crate::dataset::PairDataset;
use crate::error::EmbedError;
use crate::model::SkipGram;

use std::error::Error;
use std::ops::AddAssign;
use std::ops::SubAssign;
use std::time::Instant;
use ndarray::prelude::*;
use ndarray::Ix2;
use ndarray_stats::QuantileExt;
use rand::Rng;

// adaptive moment estimates for one parameter matrix. moments persist across
// batches, the gradient itself is rebuilt fresh every step.
struct Adam {
    m: Array2<f32>,
    v: Array2<f32>,
    beta1: f32,
    beta2: f32,
    eps: f32,
    t: i32,
}

impl Adam {

    fn new(shape: Ix2) -> Adam {
        Self {
            m: Array2::zeros(shape),
            v: Array2::zeros(shape),
            beta1: 0.9,
            beta2: 0.999,
            eps: 1e-8,
            t: 0,
        }
    }

    fn step(&mut self, param: &mut Array2<f32>, grad: &Array2<f32>, learning_rate: f32) {

        self.t += 1;
        self.m = self.beta1 * &self.m + (1.0 - self.beta1) * grad;
        self.v = self.beta2 * &self.v + (1.0 - self.beta2) * &grad.mapv(|g| g * g);

        // bias-corrected moments
        let m_hat = &self.m / (1.0 - self.beta1.powi(self.t));
        let v_hat = &self.v / (1.0 - self.beta2.powi(self.t));

        param.sub_assign(&(learning_rate * m_hat / (v_hat.mapv(f32::sqrt) + self.eps)));
    }

}

pub struct Trainer {
    adam_target: Adam,
    adam_context: Adam,
}

impl Trainer {

    fn new(model: &SkipGram) -> Trainer {
        Self {
            adam_target: Adam::new(model.w_target().raw_dim()),
            adam_context: Adam::new(model.w_context().raw_dim()),
        }
    }

    // one optimizer step over a single batch, returns the batch mean loss.
    // the gradients of a lookup-plus-projection model come out in closed form,
    // no autodiff is needed:
    //   dz = softmax(scores) - onehot(context), scaled by 1 / batch
    //   d w_target rows = dz . w_context, gathered by center index
    //   d w_context = dz^T . u_batch
    fn train_batch(&mut self, model: &mut SkipGram, centers: &[usize], contexts: &[usize], learning_rate: f32) -> f32 {

        let this_batch = centers.len();
        let u_batch = model.w_target().select(Axis(0), centers);
        let scores = u_batch.dot(&model.w_context().t());

        // softmax rows in place with the max subtracted first, accumulating
        // the cross entropy of the true context as we go
        let mut probs = scores;
        let mut batch_loss = 0.0_f32;
        for (bb, mut row) in probs.axis_iter_mut(Axis(0)).enumerate() {
            let max = *row.max().unwrap();
            row.mapv_inplace(|z| (z - max).exp());
            let denom = row.sum();
            batch_loss += denom.ln() - row[contexts[bb]].ln();
            row.mapv_inplace(|e| e / denom);
            row[contexts[bb]] -= 1.0;
        }
        let batch_loss = batch_loss / this_batch as f32;

        probs.mapv_inplace(|g| g / this_batch as f32);
        let dz = probs;

        let du_rows = dz.dot(model.w_context());
        let dv = dz.t().dot(&u_batch);

        // scatter the batch rows into a full gradient, duplicate centers in
        // one batch accumulate
        let mut du = Array2::<f32>::zeros(model.w_target().raw_dim());
        for (bb, ii) in centers.iter().enumerate() {
            du.slice_mut(s![*ii, ..]).add_assign(&du_rows.slice(s![bb, ..]));
        }

        let (w_target, w_context) = model.params_mut();
        self.adam_target.step(w_target, &du, learning_rate);
        self.adam_context.step(w_context, &dv, learning_rate);

        batch_loss
    }

    // runs the configured number of epochs, no early stopping. returns the
    // per-epoch losses, each the sum of its batch losses (not divided again
    // by the batch count).
    pub fn run<R: Rng>(
        model: &mut SkipGram,
        dataset: &PairDataset,
        train_params: &JsonTrain,
        rng: &mut R,
    ) -> Result<Vec<f32>, Box<dyn Error>> {

        let mut trainer = Trainer::new(model);
        let mut epoch_losses = Vec::with_capacity(train_params.num_epochs);

        for epoch in 0..train_params.num_epochs {

            let timer = Instant::now();

            // fresh shuffle every epoch, the last chunk may be short
            let batches = dataset.epoch_batches(train_params.batch_size, rng);
            let n_batches = batches.len();

            let mut epoch_loss = 0.0_f32;
            for (kk, batch) in batches.iter().enumerate() {

                epoch_loss += trainer.train_batch(model, &batch.centers, &batch.contexts, train_params.learning_rate);

                if train_params.progress_verbose && kk > 0 && kk % 100 == 0 {
                    println!("epoch {}, batch {} / {}, running loss: {}", epoch, kk, n_batches, epoch_loss);
                }
            }

            if !epoch_loss.is_finite() {
                return Err(Box::new(EmbedError::NumericalInstability { epoch }));
            }

            println!("finished epoch {}, loss is {}, took: {} seconds...", epoch, epoch_loss, timer.elapsed().as_secs());
            epoch_losses.push(epoch_loss);
        }

        Ok(epoch_losses)
    }

}


#[cfg(test)]
mod tests {

    use super::{Adam, Trainer};
    use crate::config::JsonTrain;
    use crate::dataset::PairDataset;
    use crate::model::SkipGram;
    use ndarray::prelude::*;
    use ndarray_stats::QuantileExt;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn toy_params(num_epochs: usize, batch_size: usize, learning_rate: f32) -> JsonTrain {
        JsonTrain {
            embedding_dim: 2,
            batch_size,
            num_epochs,
            learning_rate,
            seed: Some(7),
            progress_verbose: false,
        }
    }

    #[test]
    fn adam_moves_against_the_gradient() {

        let mut param = Array2::from_elem((2, 3), 1.0_f32);
        let grad = Array2::from_elem((2, 3), 0.5_f32);

        let mut adam = Adam::new(param.raw_dim());
        adam.step(&mut param, &grad, 0.1);

        // a positive gradient everywhere must push every entry down
        assert!(param.iter().all(|p| *p < 1.0));
    }

    #[test]
    fn initial_loss_is_near_uniform_chance() {

        // with small random weights the softmax is close to uniform over the
        // vocabulary, so the first batch loss should sit near ln(vocab_size)
        let mut rng = StdRng::seed_from_u64(11);
        let mut model = SkipGram::new(4, 2, &mut rng);
        let mut trainer = Trainer::new(&model);

        let loss = trainer.train_batch(&mut model, &[0, 1, 2, 3], &[1, 0, 3, 2], 0.001);
        assert!(loss.is_finite());
        assert!((loss - (4.0_f32).ln()).abs() < 0.3);
    }

    #[test]
    fn repeated_pairs_become_top_contexts() {

        // words 0 and 1 co-occur exclusively, words 2 and 3 never appear.
        // after training, each of the pair must score the other highest.
        let mut pairs = Array2::<i64>::zeros((200, 2));
        for i in 0..100 {
            pairs[[2 * i, 0]] = 0;
            pairs[[2 * i, 1]] = 1;
            pairs[[2 * i + 1, 0]] = 1;
            pairs[[2 * i + 1, 1]] = 0;
        }
        let dataset = PairDataset::new(pairs, 4).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let mut model = SkipGram::new(4, 2, &mut rng);
        let params = toy_params(50, 32, 0.01);

        let losses = Trainer::run(&mut model, &dataset, &params, &mut rng).unwrap();
        assert_eq!(losses.len(), 50);
        assert!(losses.last().unwrap() < losses.first().unwrap());

        let scores = model.scores(&[0, 1]);
        assert_eq!(scores.slice(s![0, ..]).argmax().unwrap(), 1usize);
        assert_eq!(scores.slice(s![1, ..]).argmax().unwrap(), 0usize);
    }

}
