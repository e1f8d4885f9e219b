

// imports
use crate::config::files_handling;
use crate::error::EmbedError;

use std::error::Error;
use ndarray::prelude::*;
use ndarray::Array;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::Rng;

const TARGET_FILE: &str = "target";
const CONTEXT_FILE: &str = "context";

// the skip-gram model is two embedding matrices of shape (vocab_size, dim).
// w_target holds the embedding looked up for a center word, w_context scores
// every vocabulary word as a candidate context of it.
pub struct SkipGram {
    w_target: Array2<f32>,
    w_context: Array2<f32>,
}

impl SkipGram {

    pub fn new<R: Rng>(vocab_size: usize, embedding_dim: usize, rng: &mut R) -> SkipGram {

        Self {
            w_target: Array::random_using((vocab_size, embedding_dim), Uniform::new(-0.5, 0.5), rng) / embedding_dim as f32,
            w_context: Array::random_using((vocab_size, embedding_dim), Uniform::new(-0.5, 0.5), rng) / embedding_dim as f32,
        }
    }

    pub fn vocab_size(&self) -> usize {
        self.w_target.dim().0
    }

    pub fn embedding_dim(&self) -> usize {
        self.w_target.dim().1
    }

    pub fn w_target(&self) -> &Array2<f32> {
        &self.w_target
    }

    pub fn w_context(&self) -> &Array2<f32> {
        &self.w_context
    }

    pub(crate) fn params_mut(&mut self) -> (&mut Array2<f32>, &mut Array2<f32>) {
        (&mut self.w_target, &mut self.w_context)
    }

    // raw scores over the full vocabulary, one row per requested center word.
    // no softmax here, normalization is deferred to the loss. an out-of-range
    // index is a caller bug and panics on the lookup.
    pub fn scores(&self, targets: &[usize]) -> Array2<f32> {
        let u = self.w_target.select(Axis(0), targets);
        u.dot(&self.w_context.t())
    }

    // the saved artifact is the two raw matrices, nothing else. the matching
    // vocabulary has to be supplied separately on load.
    pub fn save(&self, output_dir: &str) -> Result<(), Box<dyn Error>> {
        files_handling::save_output::<Array2<f32>>(output_dir, TARGET_FILE, self.w_target.clone())?;
        files_handling::save_output::<Array2<f32>>(output_dir, CONTEXT_FILE, self.w_context.clone())?;
        Ok(())
    }

    // restores a prior snapshot into this model. the stored dimensions must
    // agree with the constructed ones, a disagreement aborts the load.
    pub fn load(&mut self, output_dir: &str) -> Result<(), Box<dyn Error>> {

        let w_target = files_handling::read_input::<Array2<f32>>(&(output_dir.to_string() + "/" + TARGET_FILE))?;
        let w_context = files_handling::read_input::<Array2<f32>>(&(output_dir.to_string() + "/" + CONTEXT_FILE))?;

        for loaded in [&w_target, &w_context] {
            if loaded.dim() != self.w_target.dim() {
                return Err(Box::new(EmbedError::ShapeMismatch {
                    expected: self.w_target.dim(),
                    found: loaded.dim(),
                }));
            }
        }

        self.w_target = w_target;
        self.w_context = w_context;
        Ok(())
    }

}


#[cfg(test)]
mod tests {

    use std::fs;

    use super::SkipGram;
    use crate::error::EmbedError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tmp_dir(name: &str) -> String {
        let dir = std::env::temp_dir().join("skipgram_trainer_tests").join(name);
        fs::create_dir_all(&dir).unwrap();
        dir.to_str().unwrap().to_string()
    }

    #[test]
    fn scores_cover_the_vocabulary() {

        let mut rng = StdRng::seed_from_u64(0);
        let model = SkipGram::new(7, 3, &mut rng);

        // a single index gives one row, a batch gives one row per sample
        assert_eq!(model.scores(&[4]).dim(), (1, 7));
        assert_eq!(model.scores(&[0, 6, 2, 2]).dim(), (4, 7));
    }

    #[test]
    fn save_load_round_trip() {

        let dir = tmp_dir("round_trip");
        let mut rng = StdRng::seed_from_u64(3);

        let saved = SkipGram::new(5, 4, &mut rng);
        saved.save(&dir).unwrap();

        let mut restored = SkipGram::new(5, 4, &mut rng);
        restored.load(&dir).unwrap();

        assert_eq!(restored.w_target(), saved.w_target());
        assert_eq!(restored.w_context(), saved.w_context());
    }

    #[test]
    fn load_rejects_mismatched_dimensions() {

        let dir = tmp_dir("shape_mismatch");
        let mut rng = StdRng::seed_from_u64(3);

        let saved = SkipGram::new(5, 4, &mut rng);
        saved.save(&dir).unwrap();

        // same vocabulary, different embedding width
        let mut narrow = SkipGram::new(5, 2, &mut rng);
        let err = narrow.load(&dir).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EmbedError>(),
            Some(EmbedError::ShapeMismatch { expected: (5, 2), found: (5, 4) })
        ));
    }

}
