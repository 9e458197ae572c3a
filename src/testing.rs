//! In-memory interpreter used by unit tests.

use std::cell::Cell;
use std::path::Path;

use crate::error::{InspectError, Result};
use crate::interpreter::Interpreter;
use crate::types::{Dim, GraphTables, OpDetails, Quantization, TensorDetails};

pub struct FakeInterpreter {
    pub tables: GraphTables,
    fail_load: bool,
    allocations: Cell<usize>,
}

impl FakeInterpreter {
    /// A chain graph: tensor 0 is the input, the last tensor is the output,
    /// and one `Relu` op links each consecutive pair.
    pub fn with_tensors(count: usize) -> Self {
        let tensors = (0..count)
            .map(|index| TensorDetails {
                name: format!("tensor_{}", index),
                index,
                shape: vec![Dim::Symbol("N".to_string()), Dim::Fixed(3), Dim::Fixed(224)],
                dtype: "float32".to_string(),
                quantization: Quantization::default(),
            })
            .collect();
        let ops = (1..count)
            .map(|index| OpDetails {
                index: index - 1,
                name: format!("relu_{}", index),
                op_name: "Relu".to_string(),
                inputs: vec![index - 1],
                outputs: vec![index],
            })
            .collect();

        Self {
            tables: GraphTables {
                tensors,
                ops,
                inputs: if count > 0 { vec![0] } else { vec![] },
                outputs: if count > 0 { vec![count - 1] } else { vec![] },
            },
            fail_load: false,
            allocations: Cell::new(0),
        }
    }

    pub fn failing_load() -> Self {
        Self {
            fail_load: true,
            ..Self::with_tensors(0)
        }
    }

    pub fn allocations(&self) -> usize {
        self.allocations.get()
    }
}

impl Interpreter for FakeInterpreter {
    type Model = ();

    fn load(&self, path: &Path) -> Result<()> {
        if self.fail_load {
            return Err(InspectError::Load {
                path: path.to_path_buf(),
                source: anyhow::anyhow!("No such file or directory"),
            });
        }
        Ok(())
    }

    fn allocate(&self, _model: ()) -> Result<GraphTables> {
        self.allocations.set(self.allocations.get() + 1);
        Ok(self.tables.clone())
    }
}
