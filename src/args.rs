use clap::Parser;
use std::path::PathBuf;

use crate::config::InspectConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Model file to inspect (.onnx)
    pub model: Option<PathBuf>,

    /// JSON config file (default: model-peek.json if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Tensor index to print, repeatable (default 0 and 10)
    #[arg(short = 't', long = "tensor-index")]
    pub tensor_indices: Vec<usize>,

    /// Print tensor and operator counts
    #[arg(long)]
    pub counts: bool,

    /// Print the full tensor table
    #[arg(long)]
    pub tensors: bool,

    /// Print the operator table
    #[arg(long)]
    pub ops: bool,

    /// Shorthand for --counts --tensors --ops
    #[arg(long)]
    pub all: bool,

    /// Wrap width for printed details
    #[arg(long)]
    pub width: Option<usize>,
}

impl Args {
    /// Layer command line flags over a loaded config.
    pub fn apply(&self, mut config: InspectConfig) -> InspectConfig {
        if !self.tensor_indices.is_empty() {
            config.tensor_indices = self.tensor_indices.clone();
        }
        config.show_counts |= self.counts || self.all;
        config.show_tensors |= self.tensors || self.all;
        config.show_ops |= self.ops || self.all;
        if let Some(width) = self.width {
            config.width = width;
        }
        config
    }
}
