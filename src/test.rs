mod fixtures;
mod merge;
