

// imports
use crate::config::Config;
use crate::dataset::PairDataset;
use crate::model::SkipGram;
use crate::similarity::Similarity;
use crate::train::Trainer;
use crate::visualize;
use crate::vocab::Vocab;

use core::panic;
use std::env;
use std::time::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct Pipeline {}

impl Pipeline {

    // runs the main procedure of 4 steps -
    // -> configuration of arguments
    // -> loading the vocabulary and training pair artifacts
    // -> training (or restoring) the embedding matrices, saving them
    // -> nearest-neighbor clusters and 2d drawing

    pub fn run() {

        println!("entering program...");
        let args: Vec<String> = env::args().collect();

        println!("building parameters...");
        let params = match Config::new(&args) {
            Ok(config) => config.get_params(),
            Err(e) => panic!("{}", e)
        };
        println!("{}", params);

        // the vocabulary and dataset are external artifacts, consumed read-only
        let vocab = match Vocab::load(&params.vocab_file) {
            Ok(vocab) => vocab,
            Err(e) => panic!("{}", e)
        };
        println!("loaded vocabulary of {} tokens", vocab.len());

        let dataset = match PairDataset::load(&params.dataset_file, vocab.len()) {
            Ok(dataset) => dataset,
            Err(e) => panic!("{}", e)
        };
        println!("loaded {} training pairs", dataset.len());

        // one rng drives initialization and every epoch shuffle, so a fixed
        // seed makes the whole run reproducible
        let mut rng = match params.json_train.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy()
        };

        // fresh initialization, or a prior snapshot instead when load_saved is set
        let mut model = SkipGram::new(vocab.len(), params.json_train.embedding_dim, &mut rng);
        if params.load_saved {
            if let Err(e) = model.load(&params.output_dir) {
                panic!("{}", e)
            }
            println!("restored model weights from {}", &params.output_dir);
        }

        // run training part
        let timer = Instant::now();
        println!("starting training part...");
        if let Err(e) = Trainer::run(&mut model, &dataset, &params.json_train, &mut rng) {
            panic!("{}", e)
        }
        if let Err(e) = model.save(&params.output_dir) {
            panic!("{}", e)
        }
        println!("finished training, saved vecs. Took {} seconds ...", timer.elapsed().as_secs());

        // qualitative inspection of the trained space around the seed words
        if !params.seed_words.is_empty() {

            let sim_obj = Similarity::new(model.w_target().clone(), vocab);
            let clusters = match sim_obj.build_clusters(&params.seed_words, params.k_neighbors) {
                Ok(clusters) => clusters,
                Err(e) => panic!("{}", e)
            };

            let save_to = params.output_dir.to_string() + "/clusters.png";
            if let Err(e) = visualize::draw_clusters(&clusters, &save_to) {
                panic!("{}", e)
            }
            println!("saved cluster drawing to {}", save_to);
        }

    }

}
