use std::collections::HashMap;
use std::path::Path;

use tract_onnx::prelude::*;
use tract_onnx::tract_core::ops::konst::Const;
use tract_onnx::tract_core::ops::source::TypedSource;

use crate::error::{InspectError, Result};
use crate::interpreter::Interpreter;
use crate::types::{Dim, GraphTables, OpDetails, Quantization, TensorDetails};

/// ONNX interpreter backed by tract.
#[derive(Debug, Default)]
pub struct TractInterpreter;

impl TractInterpreter {
    pub fn new() -> Self {
        Self
    }
}

impl Interpreter for TractInterpreter {
    type Model = InferenceModel;

    fn load(&self, path: &Path) -> Result<InferenceModel> {
        tract_onnx::onnx()
            .model_for_path(path)
            .map_err(|source| InspectError::Load {
                path: path.to_path_buf(),
                source,
            })
    }

    fn allocate(&self, model: InferenceModel) -> Result<GraphTables> {
        let typed = model
            .into_typed()
            .map_err(|source| InspectError::Allocate { source })?;
        graph_tables(&typed).map_err(|source| InspectError::Allocate { source })
    }
}

fn graph_tables(model: &TypedModel) -> TractResult<GraphTables> {
    let mut tensors = Vec::new();
    let mut tensor_index: HashMap<OutletId, usize> = HashMap::new();

    for node in model.nodes() {
        for (slot, output) in node.outputs.iter().enumerate() {
            let outlet = OutletId::new(node.id, slot);
            let index = tensors.len();
            let name = match model.outlet_label(outlet) {
                Some(label) => label.to_string(),
                None if slot == 0 => node.name.clone(),
                None => format!("{}:{}", node.name, slot),
            };
            tensors.push(TensorDetails {
                name,
                index,
                shape: shape_of(&output.fact),
                dtype: dtype_name(output.fact.datum_type),
                quantization: quantization_of(output.fact.datum_type),
            });
            tensor_index.insert(outlet, index);
        }
    }

    let lookup = |outlet: &OutletId| -> TractResult<usize> {
        tensor_index
            .get(outlet)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("outlet {:?} has no tensor", outlet))
    };

    let mut ops = Vec::new();
    for node in model.nodes() {
        // Sources and constants only hold tensors; they are not computation.
        if node.op_is::<TypedSource>() || node.op_is::<Const>() {
            continue;
        }
        let inputs = node.inputs.iter().map(lookup).collect::<TractResult<Vec<_>>>()?;
        let outputs = (0..node.outputs.len())
            .map(|slot| lookup(&OutletId::new(node.id, slot)))
            .collect::<TractResult<Vec<_>>>()?;
        ops.push(OpDetails {
            index: ops.len(),
            name: node.name.clone(),
            op_name: node.op.name().to_string(),
            inputs,
            outputs,
        });
    }

    let inputs = model.input_outlets()?.iter().map(lookup).collect::<TractResult<Vec<_>>>()?;
    let outputs = model.output_outlets()?.iter().map(lookup).collect::<TractResult<Vec<_>>>()?;

    Ok(GraphTables {
        tensors,
        ops,
        inputs,
        outputs,
    })
}

fn shape_of(fact: &TypedFact) -> Vec<Dim> {
    fact.shape
        .iter()
        .map(|dim| match dim.to_i64() {
            Ok(size) if size >= 0 => Dim::Fixed(size as u64),
            _ => Dim::Symbol(dim.to_string()),
        })
        .collect()
}

fn dtype_name(datum_type: DatumType) -> String {
    let name = match datum_type.unquantized() {
        DatumType::Bool => "bool",
        DatumType::U8 => "uint8",
        DatumType::U16 => "uint16",
        DatumType::U32 => "uint32",
        DatumType::U64 => "uint64",
        DatumType::I8 => "int8",
        DatumType::I16 => "int16",
        DatumType::I32 => "int32",
        DatumType::I64 => "int64",
        DatumType::F16 => "float16",
        DatumType::F32 => "float32",
        DatumType::F64 => "float64",
        DatumType::String => "string",
        other => return format!("{:?}", other).to_lowercase(),
    };
    name.to_string()
}

fn quantization_of(datum_type: DatumType) -> Quantization {
    match datum_type.qparams() {
        Some(qparams) => {
            let (zero_point, scale) = qparams.zp_scale();
            Quantization {
                // Go through the f32 text form so 0.1f32 prints as 0.1, not 0.10000000149011612.
                scale: scale.to_string().parse().unwrap_or(f64::from(scale)),
                zero_point: i64::from(zero_point),
            }
        }
        None => Quantization::default(),
    }
}
