
use core::panic;
use std::{collections::HashMap, env, error::Error, fs::File, io::{self, BufRead}};
use ndarray::Array2;
use skipgram_trainer::{files_handling, Similarity, Vocab};


// some checks on trained vectors, functionality to get the K most similar
// words to a given word. treated as a binary executable so it can be ran
// independently from main

fn main() {

    // arguments to this executable should be:
    // path to a queries file (one token per line)
    // path to the trained target matrix (npy, without extension)
    // path to the tokens file (txt, without extension)
    // example: ... Input/queries.txt Output/target Output/words
    let args: Vec<String> = env::args().collect();
    if args.len() != 4 { panic!("input arguments should be path to queries, path to npy, path to txt"); }

    // read queries file
    let open_in_file = File::open(&args[1]).expect("could not open queries file");
    let inputs = io::BufReader::new(open_in_file)
        .lines()
        .map(|line| line.expect("could not read line"))
        .collect::<Vec<String>>();

    // read in trained vecs and tokens
    let w = files_handling::read_input::<Array2<f32>>(&args[2]).expect("could not read weights");
    let t2i = files_handling::read_input::<HashMap<String, usize>>(&args[3]).expect("could not read tokens");
    let vocab = match Vocab::new(t2i) {
        Ok(vocab) => vocab,
        Err(e) => panic!("{}", e)
    };
    let sim_obj = Similarity::new(w, vocab);

    if let Err(e) = run_similarity(&inputs, 10, sim_obj) {
        panic!("{}", e);
    }

}

fn run_similarity(inputs: &[String], k: usize, similarity_object: Similarity) -> Result<(), Box<dyn Error>> {

    // finding the k most similar words to each of the input tokens

    for token in inputs {

        println!("searching {} most similar words to {}", k, token);
        let similarities = similarity_object.nearest(token, k)?;
        for (i, (similar_token, score)) in similarities.iter().enumerate() {
            println!("{} : {} ? {} = {}", i, token, similar_token, score);
        }
        println!("\n");
    }

    Ok(())

}
