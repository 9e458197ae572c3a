use serde::{Deserialize, Serialize};

use crate::error::{InspectError, Result};

/// One dimension of a tensor shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dim {
    Fixed(u64),
    /// Symbolic size left open by the model (e.g. a batch dimension)
    Symbol(String),
}

/// Affine quantization of a tensor. Zeroed for float tensors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Quantization {
    pub scale: f64,
    pub zero_point: i64,
}

/// Details of one slot in the model's tensor table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensorDetails {
    pub name: String,
    pub index: usize,
    pub shape: Vec<Dim>,
    pub dtype: String,
    pub quantization: Quantization,
}

/// Details of one operator node in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpDetails {
    pub index: usize,
    pub name: String,
    pub op_name: String,
    /// Tensor table indices consumed by the node
    pub inputs: Vec<usize>,
    /// Tensor table indices produced by the node
    pub outputs: Vec<usize>,
}

/// Everything the interpreter exposes once tensors are allocated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphTables {
    pub tensors: Vec<TensorDetails>,
    pub ops: Vec<OpDetails>,
    pub inputs: Vec<usize>,
    pub outputs: Vec<usize>,
}

impl GraphTables {
    /// Check that every index the tables refer to lands inside the tensor table.
    pub fn validate(&self) -> Result<()> {
        let len = self.tensors.len();
        let dangling = |what: &str, index: usize| {
            InspectError::MalformedGraph(format!(
                "{} refers to tensor {} but the model has {} tensors",
                what, index, len
            ))
        };

        for &index in &self.inputs {
            if index >= len {
                return Err(dangling("input list", index));
            }
        }
        for &index in &self.outputs {
            if index >= len {
                return Err(dangling("output list", index));
            }
        }
        for op in &self.ops {
            if let Some(&index) = op.inputs.iter().chain(&op.outputs).find(|&&i| i >= len) {
                return Err(dangling(&format!("operator '{}'", op.name), index));
            }
        }
        Ok(())
    }
}
