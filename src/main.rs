
use skipgram_trainer::Pipeline;

fn main() {
    Pipeline::run();
}
