use std::io::Write;
use std::path::Path;

use crate::config::InspectConfig;
use crate::error::Result;
use crate::interpreter::{Interpreter, ModelHandle};
use crate::pretty::pformat;
use crate::types::{OpDetails, TensorDetails};

/// One printed unit of the report
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Inputs(Vec<TensorDetails>),
    Tensor(TensorDetails),
    Outputs(Vec<TensorDetails>),
    Count(usize),
    Tensors(Vec<TensorDetails>),
    Ops(Vec<OpDetails>),
}

impl Block {
    fn render(&self, width: usize) -> Result<String> {
        let text = match self {
            Block::Inputs(details) | Block::Outputs(details) | Block::Tensors(details) => {
                pformat(details, width)?
            }
            Block::Tensor(details) => pformat(details, width)?,
            Block::Count(count) => count.to_string(),
            Block::Ops(ops) => pformat(ops, width)?,
        };
        Ok(text)
    }
}

/// Blocks in print order, fully resolved before anything is written.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub blocks: Vec<Block>,
}

impl Report {
    pub fn render(&self, width: usize) -> Result<String> {
        let mut out = String::new();
        for block in &self.blocks {
            out.push_str(&block.render(width)?);
            out.push('\n');
        }
        Ok(out)
    }
}

pub struct ModelInspector<I> {
    interpreter: I,
    config: InspectConfig,
}

impl<I: Interpreter> ModelInspector<I> {
    pub fn new(interpreter: I, config: InspectConfig) -> Self {
        Self {
            interpreter,
            config,
        }
    }

    /// Load and allocate the model, then gather the configured blocks.
    pub fn inspect(&self, path: &Path) -> Result<Report> {
        let mut handle = ModelHandle::load(&self.interpreter, path)?;
        handle.allocate(&self.interpreter)?;

        let mut blocks = vec![Block::Inputs(handle.input_details()?)];
        for &index in &self.config.tensor_indices {
            blocks.push(Block::Tensor(handle.tensor(index)?.clone()));
        }
        blocks.push(Block::Outputs(handle.output_details()?));

        if self.config.show_counts {
            blocks.push(Block::Count(handle.tensor_details()?.len()));
            blocks.push(Block::Count(handle.ops_details()?.len()));
        }
        if self.config.show_tensors {
            blocks.push(Block::Tensors(handle.tensor_details()?.to_vec()));
        }
        if self.config.show_ops {
            blocks.push(Block::Ops(handle.ops_details()?.to_vec()));
        }

        Ok(Report { blocks })
    }

    /// Inspect `path` and write the report to `out`. Nothing is written on failure.
    pub fn run<W: Write>(&self, path: &Path, out: &mut W) -> Result<()> {
        let text = self.inspect(path)?.render(self.config.width)?;
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
