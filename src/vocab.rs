

// imports
use crate::config::files_handling;
use crate::error::EmbedError;

use std::collections::HashMap;
use std::error::Error;

pub struct Vocab {
    t2i: HashMap<String, usize>,
    i2t: Vec<String>,
}

impl Vocab {

    // the vocabulary is produced externally and consumed read-only here.
    // indices must cover exactly 0..n with one token each, anything else
    // means the artifact does not match the dataset it was built with.
    pub fn new(t2i: HashMap<String, usize>) -> Result<Vocab, EmbedError> {

        let n = t2i.len();
        let mut i2t = vec![String::new(); n];
        let mut seen = vec![false; n];

        for (token, i) in &t2i {
            if *i >= n || seen[*i] {
                return Err(EmbedError::IndexOutOfRange { index: *i as i64, vocab_size: n });
            }
            seen[*i] = true;
            i2t[*i] = token.to_owned();
        }

        Ok(Self { t2i, i2t })
    }

    // reads the saved token-to-index map, a json object in a txt file
    pub fn load(file_path: &str) -> Result<Vocab, Box<dyn Error>> {
        let t2i = files_handling::read_input::<HashMap<String, usize>>(file_path)?;
        let vocab = Vocab::new(t2i)?;
        Ok(vocab)
    }

    pub fn len(&self) -> usize {
        self.i2t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.i2t.is_empty()
    }

    pub fn index_of(&self, token: &str) -> Result<usize, EmbedError> {
        match self.t2i.get(token) {
            Some(i) => Ok(*i),
            None => Err(EmbedError::UnknownWord(token.to_string())),
        }
    }

    pub fn token_of(&self, index: usize) -> Result<&str, EmbedError> {
        match self.i2t.get(index) {
            Some(token) => Ok(token),
            None => Err(EmbedError::IndexOutOfRange { index: index as i64, vocab_size: self.len() }),
        }
    }

}
