

// imports
use serde_json::Value;
use std::error::Error;
use std::fmt::Display;
use std::fs;

#[derive(Clone, Debug)]
pub struct JsonTrain {
    pub embedding_dim: usize,
    pub batch_size: usize,
    pub num_epochs: usize,
    pub learning_rate: f32,
    pub seed: Option<u64>,
    pub progress_verbose: bool,
}

impl Display for JsonTrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "training hyper parameters:
        embedding_dim: {},
        batch_size: {},
        num_epochs: {},
        learning_rate: {},
        seed: {:?},
        progress_verbose: {}",
        self.embedding_dim, self.batch_size, self.num_epochs, self.learning_rate, self.seed, self.progress_verbose
        )
    }
}

#[derive(Clone, Debug)]
pub struct JsonTypes {
    pub vocab_file: String,
    pub dataset_file: String,
    pub output_dir: String,
    pub load_saved: bool,
    pub k_neighbors: usize,
    pub seed_words: Vec<String>,
    pub json_train: JsonTrain,
}

impl Display for JsonTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "using hyper-params:
        vocab_file: {}
        dataset_file: {}
        output_dir: {}
        load_saved: {}
        k_neighbors: {},
        seed_words: {:?},
        Using training hyper-params: {}",
        self.vocab_file, self.dataset_file, self.output_dir, self.load_saved, self.k_neighbors, self.seed_words, self.json_train)
    }
}

pub struct Config {
    params: JsonTypes,
}

impl Config {

    pub fn get_params(&self) -> JsonTypes {
        return self.params.clone()
    }

    pub fn new(args: &[String]) -> Result<Config, Box<dyn Error>> {

        if args.len() != 2 {
            return Err(format!("input should be a path to json file only").into());
        }

        // parse input json
        let f = fs::File::open(&args[1]).expect("cannot open json file");
        let json: Value = serde_json::from_reader(f).expect("cannot read json file");

        // validate the input artifacts and output location in json
        let vocab_file = json.get("vocab_file").expect("vocab_file was not supplied through json").as_str().expect("cannot cast vocab_file to string");
        let dataset_file = json.get("dataset_file").expect("dataset_file was not supplied through json").as_str().expect("cannot cast dataset_file to string");
        let output_dir = json.get("output_dir").expect("output_dir was not supplied through json").as_str().expect("cannot cast output path to string");

        // handle default vs input parameters
        let embedding_dim = match json.get("embedding_dim") {
            Some(embedding_dim) => embedding_dim.as_i64().expect("panic since given embedding_dim is not numeric"),
            None => 300
        };
        let batch_size = match json.get("batch_size") {
            Some(batch_size) => batch_size.as_i64().expect("panic since given batch_size is not numeric"),
            None => 1024
        };
        let num_epochs = match json.get("num_epochs") {
            Some(num_epochs) => num_epochs.as_i64().expect("panic since given num_epochs is not numeric"),
            None => 20
        };
        let learning_rate = match json.get("learning_rate") {
            Some(learning_rate) => learning_rate.as_f64().expect("panic since given learning_rate is not numeric"),
            None => 0.001
        };
        let k_neighbors = match json.get("k_neighbors") {
            Some(k_neighbors) => k_neighbors.as_i64().expect("panic since given k_neighbors is not numeric"),
            None => 5
        };
        let load_saved = match json.get("load_saved") {
            Some(load_saved) => load_saved.as_bool().expect("panic since given load_saved is not boolean"),
            None => false
        };
        let progress_verbose = match json.get("progress_verbose") {
            Some(progress_verbose) => progress_verbose.as_bool().expect("panic since given progress_verbose is not boolean"),
            None => false
        };
        let seed = json.get("seed").map(|seed| seed.as_u64().expect("panic since given seed is not numeric"));
        let seed_words = match json.get("seed_words") {
            Some(seed_words) => seed_words
                .as_array()
                .expect("panic since given seed_words is not a list")
                .iter()
                .map(|w| w.as_str().expect("panic since a seed word is not a string").to_string())
                .collect(),
            None => Vec::new()
        };

        let params = JsonTypes {
            vocab_file: vocab_file.to_owned(),
            dataset_file: dataset_file.to_owned(),
            output_dir: output_dir.to_owned(),
            load_saved: load_saved,
            k_neighbors: k_neighbors as usize,
            seed_words: seed_words,
            json_train: JsonTrain {
                embedding_dim: embedding_dim as usize,
                batch_size: batch_size as usize,
                num_epochs: num_epochs as usize,
                learning_rate: learning_rate as f32,
                seed: seed,
                progress_verbose: progress_verbose
            }
        };

        Ok (
            Self {
                params: params
            }
        )
    }

}


pub mod files_handling {

    use std::collections::HashMap;
    use std::error::Error;
    use std::fs::{self, File};
    use std::io::{BufReader, BufWriter};
    use ndarray::Array2;
    use ndarray_npy::{read_npy, write_npy, ReadNpyError};

    pub fn read_input<R: ReadFile>(file_path: &str) -> Result<<R as ReadFile>::Item, <R as ReadFile>::Error> {
        let input = <R as ReadFile>::read_file(file_path)?;
        Ok(input)
    }

    pub fn save_output<S: SaveFile>(output_dir: &str, file_name: &str, item: S) -> Result<(), <S as SaveFile>::Error> {

        // create output folder
        if let Err(e) = fs::create_dir_all(output_dir) {
            panic!("{}", e)
        }

        item.save_file(output_dir, file_name)?;
        return Ok(())

    }

    // file extensions are owned here, callers pass paths without them
    pub trait ReadFile {
        type Error;
        type Item;
        fn read_file(file_path: &str) -> Result<Self::Item, Self::Error>;
    }

    impl ReadFile for Array2<f32> {
        type Error = ReadNpyError;
        type Item = Self;
        fn read_file(file_path: &str) -> Result<Self::Item, Self::Error> {
            let in_file = file_path.to_string() + ".npy";
            let item = read_npy(in_file)?;
            Ok(item)
        }
    }

    impl ReadFile for Array2<i64> {
        type Error = ReadNpyError;
        type Item = Self;
        fn read_file(file_path: &str) -> Result<Self::Item, Self::Error> {
            let in_file = file_path.to_string() + ".npy";
            let item = read_npy(in_file)?;
            Ok(item)
        }
    }

    impl ReadFile for HashMap<String, usize> {
        type Error = std::io::Error;
        type Item = Self;
        fn read_file(file_path: &str) -> Result<Self::Item, Self::Error> {
            let in_file = file_path.to_string() + ".txt";
            let f = BufReader::new(File::open(in_file)?);
            let item = serde_json::from_reader(f)?;
            return Ok(item)
        }
    }

    pub trait SaveFile {
        type Error;
        fn save_file(&self, output_dir: &str, file_name: &str) -> Result<(), Self::Error>;
    }

    impl SaveFile for Array2<f32> {
        type Error = Box<dyn Error>;
        fn save_file(&self, output_dir: &str, file_name: &str) -> Result<(), Self::Error> {
            let out = output_dir.to_string() + "/" + file_name + ".npy";
            write_npy(out, self)?;
            Ok(())
        }
    }

    impl SaveFile for Array2<i64> {
        type Error = Box<dyn Error>;
        fn save_file(&self, output_dir: &str, file_name: &str) -> Result<(), Self::Error> {
            let out = output_dir.to_string() + "/" + file_name + ".npy";
            write_npy(out, self)?;
            Ok(())
        }
    }

    impl SaveFile for HashMap<String, usize> {
        type Error = std::io::Error;
        fn save_file(&self, output_dir: &str, file_name: &str) -> Result<(), Self::Error> {
            let out = output_dir.to_string() + "/" + file_name + ".txt";
            let f = BufWriter::new(File::create(out)?);
            serde_json::to_writer(f, self)?;
            return Ok(())
        }
    }

}
