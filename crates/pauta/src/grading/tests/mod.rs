mod common;
mod documents;
mod matrix;
