use std::path::Path;

use crate::error::{InspectError, Result};
use crate::types::{GraphTables, OpDetails, TensorDetails};

/// External library that understands the model file format.
///
/// Loading and allocation are separate steps: `load` only parses the file,
/// `allocate` resolves types and shapes and exposes the graph tables.
pub trait Interpreter {
    type Model;

    fn load(&self, path: &Path) -> Result<Self::Model>;
    fn allocate(&self, model: Self::Model) -> Result<GraphTables>;
}

enum HandleState<M> {
    Loaded(M),
    Allocated(GraphTables),
    Failed,
}

/// A model owned by the inspector, either freshly loaded or allocated.
pub struct ModelHandle<M> {
    state: HandleState<M>,
}

impl<M> ModelHandle<M> {
    pub fn load<I>(interpreter: &I, path: &Path) -> Result<Self>
    where
        I: Interpreter<Model = M>,
    {
        tracing::debug!(path = %path.display(), "loading model");
        let model = interpreter.load(path)?;
        Ok(Self {
            state: HandleState::Loaded(model),
        })
    }

    /// Materialize the tensor tables. Calling it again on an allocated handle is a no-op.
    pub fn allocate<I>(&mut self, interpreter: &I) -> Result<()>
    where
        I: Interpreter<Model = M>,
    {
        match std::mem::replace(&mut self.state, HandleState::Failed) {
            HandleState::Loaded(model) => {
                let tables = interpreter.allocate(model)?;
                tables.validate()?;
                tracing::info!(
                    tensors = tables.tensors.len(),
                    ops = tables.ops.len(),
                    "allocated tensors"
                );
                self.state = HandleState::Allocated(tables);
                Ok(())
            }
            HandleState::Allocated(tables) => {
                self.state = HandleState::Allocated(tables);
                Ok(())
            }
            HandleState::Failed => Err(InspectError::NotAllocated),
        }
    }

    pub fn is_allocated(&self) -> bool {
        matches!(self.state, HandleState::Allocated(_))
    }

    fn tables(&self) -> Result<&GraphTables> {
        match &self.state {
            HandleState::Allocated(tables) => Ok(tables),
            _ => Err(InspectError::NotAllocated),
        }
    }

    pub fn input_details(&self) -> Result<Vec<TensorDetails>> {
        let tables = self.tables()?;
        Ok(tables.inputs.iter().map(|&i| tables.tensors[i].clone()).collect())
    }

    pub fn output_details(&self) -> Result<Vec<TensorDetails>> {
        let tables = self.tables()?;
        Ok(tables.outputs.iter().map(|&i| tables.tensors[i].clone()).collect())
    }

    pub fn tensor_details(&self) -> Result<&[TensorDetails]> {
        Ok(&self.tables()?.tensors)
    }

    /// Bounds-checked lookup into the tensor table.
    pub fn tensor(&self, index: usize) -> Result<&TensorDetails> {
        let tensors = &self.tables()?.tensors;
        tensors.get(index).ok_or(InspectError::TensorIndexOutOfRange {
            index,
            len: tensors.len(),
        })
    }

    pub fn ops_details(&self) -> Result<&[OpDetails]> {
        Ok(&self.tables()?.ops)
    }
}
