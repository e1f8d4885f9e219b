

// imports
use crate::error::EmbedError;
use crate::vocab::Vocab;

use ndarray::prelude::*;

pub struct Similarity {
    w_raw: Array2<f32>,
    w_unit: Array2<f32>,
    vocab: Vocab,
}

// a seed word with its k nearest neighbors and their raw embedding rows,
// shape (k, embedding_dim). built for visualization, never persisted.
pub struct Cluster {
    pub seed: String,
    pub tokens: Vec<String>,
    pub vectors: Array2<f32>,
}

impl Similarity {

    // keeps the raw matrix for cluster vectors and a row-normalized copy so
    // cosine similarity reduces to a dot product
    pub fn new(w: Array2<f32>, vocab: Vocab) -> Similarity {

        let mut w_unit = w.clone();
        for mut row in w_unit.axis_iter_mut(Axis(0)) {
            let norm = row.mapv(|a| a * a).sum().sqrt();
            if norm > 0.0 {
                row.mapv_inplace(|a| a / norm);
            }
        }

        Self { w_raw: w, w_unit, vocab }
    }

    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }

    // the k tokens whose embedding is closest to `token` by cosine similarity,
    // best first. the query token itself stays in the result, similarity 1.0
    // at rank 0. exactly equal scores keep ascending index order since the
    // sort is stable.
    pub fn nearest(&self, token: &str, k: usize) -> Result<Vec<(String, f32)>, EmbedError> {

        let i = self.vocab.index_of(token)?;
        let target = self.w_unit.slice(s![i, ..]);
        let scores = self.w_unit.dot(&target); // of size vocab

        let mut indexed_scores: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
        indexed_scores.sort_by(|(_i, s), (_j, t)| t.total_cmp(s));
        indexed_scores.truncate(k);

        let mut sim_tokens = Vec::with_capacity(indexed_scores.len());
        for (index, score) in indexed_scores {
            sim_tokens.push((self.vocab.token_of(index)?.to_string(), score));
        }

        Ok(sim_tokens)
    }

    // one cluster per seed word, each carrying the raw (unnormalized) rows of
    // its members so the later joint reduction sees the real geometry
    pub fn build_clusters(&self, seeds: &[String], k: usize) -> Result<Vec<Cluster>, EmbedError> {

        let mut clusters = Vec::with_capacity(seeds.len());
        for seed in seeds {

            let neighbors = self.nearest(seed, k)?;

            let mut vectors = Array2::zeros((neighbors.len(), self.w_raw.dim().1));
            let mut tokens = Vec::with_capacity(neighbors.len());
            for (j, (token, _score)) in neighbors.iter().enumerate() {
                let row = self.vocab.index_of(token)?;
                vectors.slice_mut(s![j, ..]).assign(&self.w_raw.slice(s![row, ..]));
                tokens.push(token.to_owned());
            }

            clusters.push(Cluster { seed: seed.to_owned(), tokens, vectors });
        }

        Ok(clusters)
    }

}


#[cfg(test)]
mod tests {

    use std::collections::HashMap;

    use super::Similarity;
    use crate::error::EmbedError;
    use crate::vocab::Vocab;
    use ndarray::prelude::*;

    // four tokens with hand-picked directions, deliberately not unit length:
    // "b" points 0.8-cosine away from "a", "c" is orthogonal, "d" opposite
    fn toy_similarity() -> Similarity {
        let mut t2i = HashMap::new();
        t2i.insert("a".to_string(), 0);
        t2i.insert("b".to_string(), 1);
        t2i.insert("c".to_string(), 2);
        t2i.insert("d".to_string(), 3);
        let vocab = Vocab::new(t2i).unwrap();

        let w = array![
            [2.0_f32, 0.0],
            [1.6, 1.2],
            [0.0, 3.0],
            [-2.0, 0.0],
        ];
        Similarity::new(w, vocab)
    }

    #[test]
    fn query_token_ranks_itself_first() {

        let sim_obj = toy_similarity();
        let neighbors = sim_obj.nearest("a", 4).unwrap();

        let (token, score) = &neighbors[0];
        assert_eq!(token, "a");
        assert!((score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn neighbors_are_ordered_by_cosine() {

        let sim_obj = toy_similarity();
        let neighbors = sim_obj.nearest("a", 4).unwrap();

        let tokens: Vec<&str> = neighbors.iter().map(|(t, _s)| t.as_str()).collect();
        assert_eq!(tokens, ["a", "b", "c", "d"]);

        // cos(a, b) = 0.8 regardless of the row magnitudes
        assert!((neighbors[1].1 - 0.8).abs() < 1e-5);
    }

    #[test]
    fn unknown_token_fails() {

        let sim_obj = toy_similarity();
        assert!(matches!(sim_obj.nearest("z", 3), Err(EmbedError::UnknownWord(_))));
    }

    #[test]
    fn clusters_carry_raw_vectors() {

        let sim_obj = toy_similarity();
        let seeds = ["a".to_string(), "c".to_string()];
        let clusters = sim_obj.build_clusters(&seeds, 3).unwrap();

        assert_eq!(clusters.len(), 2);
        for cluster in &clusters {
            assert_eq!(cluster.vectors.dim(), (3, 2));
            assert_eq!(cluster.tokens.len(), 3);
        }

        // the seed leads its own cluster and keeps its unnormalized row
        assert_eq!(clusters[0].tokens[0], "a");
        assert_eq!(clusters[0].vectors.slice(s![0, ..]), array![2.0_f32, 0.0].view());
    }

}
