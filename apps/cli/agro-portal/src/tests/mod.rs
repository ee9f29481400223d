mod cli;
mod envelope;
