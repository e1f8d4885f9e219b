

// imports
use crate::config::files_handling;
use crate::error::EmbedError;

use std::error::Error;
use ndarray::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

// a fixed collection of (context, center) index pairs, derived from a sliding
// window over the corpus by an external preprocessing step. consumed read-only,
// the row order carries no meaning and is reshuffled every epoch.
pub struct PairDataset {
    pairs: Array2<i64>,
}

// the unit of one optimizer step. centers feed the model, contexts are the
// prediction targets of the loss.
pub struct Batch {
    pub centers: Vec<usize>,
    pub contexts: Vec<usize>,
}

impl PairDataset {

    pub fn new(pairs: Array2<i64>, vocab_size: usize) -> Result<PairDataset, EmbedError> {

        let (rows, cols) = pairs.dim();
        if cols != 2 {
            return Err(EmbedError::ShapeMismatch { expected: (rows, 2), found: (rows, cols) });
        }

        // a pair outside [0, vocab_size) means the dataset was built against a
        // different vocabulary, stop before it corrupts the training run
        for index in pairs.iter() {
            if *index < 0 || *index as usize >= vocab_size {
                return Err(EmbedError::IndexOutOfRange { index: *index, vocab_size });
            }
        }

        Ok(Self { pairs })
    }

    pub fn load(file_path: &str, vocab_size: usize) -> Result<PairDataset, Box<dyn Error>> {
        let pairs = files_handling::read_input::<Array2<i64>>(file_path)?;
        let dataset = PairDataset::new(pairs, vocab_size)?;
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.pairs.dim().0
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn n_batches(&self, batch_size: usize) -> usize {
        (self.len() + batch_size - 1) / batch_size
    }

    // one full pass over the dataset in fresh random order, chunked to
    // batch_size. the last batch of an epoch may be smaller, that is not
    // an error.
    pub fn epoch_batches<R: Rng>(&self, batch_size: usize, rng: &mut R) -> Vec<Batch> {

        let mut order = (0..self.len()).collect::<Vec<usize>>();
        order.shuffle(rng);

        order
            .chunks(batch_size)
            .map(|chunk| {
                let mut centers = Vec::with_capacity(chunk.len());
                let mut contexts = Vec::with_capacity(chunk.len());
                for row in chunk {
                    contexts.push(self.pairs[[*row, 0]] as usize);
                    centers.push(self.pairs[[*row, 1]] as usize);
                }
                Batch { centers, contexts }
            })
            .collect()
    }

}


#[cfg(test)]
mod tests {

    use super::PairDataset;
    use crate::error::EmbedError;
    use ndarray::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn toy_pairs(rows: usize, vocab_size: usize) -> Array2<i64> {
        // cycle indices so every row is a valid pair
        Array2::from_shape_fn((rows, 2), |(r, c)| ((r + c) % vocab_size) as i64)
    }

    #[test]
    fn batch_count_and_last_batch_size() {

        // 10 samples with batch size 4 -> 3 batches of sizes 4, 4, 2
        let dataset = PairDataset::new(toy_pairs(10, 3), 3).unwrap();
        assert_eq!(dataset.n_batches(4), 3);

        let mut rng = StdRng::seed_from_u64(0);
        let batches = dataset.epoch_batches(4, &mut rng);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].centers.len(), 4);
        assert_eq!(batches[1].centers.len(), 4);
        assert_eq!(batches[2].centers.len(), 2);
    }

    #[test]
    fn exact_multiple_has_no_short_batch() {

        let dataset = PairDataset::new(toy_pairs(8, 3), 3).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let batches = dataset.epoch_batches(4, &mut rng);
        assert_eq!(batches.len(), 2);
        assert!(batches.iter().all(|b| b.centers.len() == 4));
    }

    #[test]
    fn epoch_covers_every_sample_once() {

        let pairs = toy_pairs(10, 3);
        let dataset = PairDataset::new(pairs.clone(), 3).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        // collect the shuffled pairs back and compare as multisets
        let mut seen = Vec::new();
        for batch in dataset.epoch_batches(4, &mut rng) {
            for (center, context) in batch.centers.iter().zip(batch.contexts.iter()) {
                seen.push((*context, *center));
            }
        }
        seen.sort();

        let mut expected = (0..10)
            .map(|r| (pairs[[r, 0]] as usize, pairs[[r, 1]] as usize))
            .collect::<Vec<(usize, usize)>>();
        expected.sort();

        assert_eq!(seen, expected);
    }

    #[test]
    fn rejects_out_of_range_pair() {

        let mut pairs = toy_pairs(4, 3);
        pairs[[2, 1]] = 5;
        assert!(matches!(
            PairDataset::new(pairs, 3),
            Err(EmbedError::IndexOutOfRange { index: 5, vocab_size: 3 })
        ));
    }

    #[test]
    fn rejects_wrong_column_count() {

        let pairs = Array2::<i64>::zeros((4, 3));
        assert!(matches!(PairDataset::new(pairs, 3), Err(EmbedError::ShapeMismatch { .. })));
    }

}
