pub mod evaluate;
pub mod ngrams;
pub mod optimize;
