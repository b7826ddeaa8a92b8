use std::collections::HashMap;

use bytemuck::AnyBitPattern;
use safetensors::{Dtype, SafeTensors, tensor::TensorView};

use super::Tree;
use crate::{ArtifactErr, Result};

const FEATURE_NAMES_KEY: &str = "feature_names_in";
const N_ESTIMATORS_KEY: &str = "n_estimators";

const CHILDREN_LEFT: &str = "children_left";
const CHILDREN_RIGHT: &str = "children_right";
const FEATURE: &str = "feature";
const THRESHOLD: &str = "threshold";
const VALUE: &str = "value";

fn tensor_name(tree: usize, field: &str) -> String {
    format!("trees.{tree}.{field}")
}

fn malformed<T>(msg: String) -> Result<T> {
    Err(ArtifactErr::Malformed(msg))
}

/// Decodes the recorded feature names and every tree out of a safetensors buffer.
pub(super) fn decode(bytes: &[u8]) -> Result<(Vec<String>, Vec<Tree>)> {
    let (_, metadata) = SafeTensors::read_metadata(bytes)?;
    let Some(info) = metadata.metadata() else {
        return malformed("model has no metadata".into());
    };

    let Some(names) = info.get(FEATURE_NAMES_KEY) else {
        return malformed(format!("model metadata has no {FEATURE_NAMES_KEY}"));
    };
    let feature_names: Vec<String> = serde_json::from_str(names)
        .map_err(|e| ArtifactErr::Malformed(format!("invalid {FEATURE_NAMES_KEY}: {e}")))?;

    let Some(n_estimators) = info.get(N_ESTIMATORS_KEY) else {
        return malformed(format!("model metadata has no {N_ESTIMATORS_KEY}"));
    };
    let n_estimators: usize = n_estimators
        .parse()
        .map_err(|e| ArtifactErr::Malformed(format!("invalid {N_ESTIMATORS_KEY}: {e}")))?;

    let tensors = SafeTensors::deserialize(bytes)?;
    let trees = (0..n_estimators)
        .map(|i| {
            Tree::new(
                read(&tensors, &tensor_name(i, CHILDREN_LEFT), Dtype::I64)?,
                read(&tensors, &tensor_name(i, CHILDREN_RIGHT), Dtype::I64)?,
                read(&tensors, &tensor_name(i, FEATURE), Dtype::I64)?,
                read(&tensors, &tensor_name(i, THRESHOLD), Dtype::F64)?,
                read(&tensors, &tensor_name(i, VALUE), Dtype::F64)?,
                feature_names.len(),
            )
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((feature_names, trees))
}

/// Encodes the feature names and trees in the layout `decode` reads.
pub(super) fn encode(feature_names: &[String], trees: &[Tree]) -> Result<Vec<u8>> {
    let names = serde_json::to_string(feature_names)
        .map_err(|e| ArtifactErr::Malformed(format!("cannot encode feature names: {e}")))?;

    let metadata = HashMap::from([
        (FEATURE_NAMES_KEY.to_string(), names),
        (N_ESTIMATORS_KEY.to_string(), trees.len().to_string()),
    ]);

    let mut buffers = Vec::with_capacity(trees.len() * 5);
    for (i, tree) in trees.iter().enumerate() {
        let nodes = tree.value().len();
        let fields: [(&str, Dtype, &[u8]); 5] = [
            (CHILDREN_LEFT, Dtype::I64, bytemuck::cast_slice(tree.children_left())),
            (CHILDREN_RIGHT, Dtype::I64, bytemuck::cast_slice(tree.children_right())),
            (FEATURE, Dtype::I64, bytemuck::cast_slice(tree.feature())),
            (THRESHOLD, Dtype::F64, bytemuck::cast_slice(tree.threshold())),
            (VALUE, Dtype::F64, bytemuck::cast_slice(tree.value())),
        ];

        for (field, dtype, data) in fields {
            buffers.push((tensor_name(i, field), dtype, nodes, data));
        }
    }

    let views = buffers
        .iter()
        .map(|(name, dtype, nodes, data)| {
            TensorView::new(*dtype, vec![*nodes], data).map(|view| (name.as_str(), view))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(safetensors::serialize(views, &Some(metadata))?)
}

/// Reads a one dimensional tensor copying it out of the (possibly unaligned) buffer.
fn read<T: AnyBitPattern>(tensors: &SafeTensors, name: &str, dtype: Dtype) -> Result<Vec<T>> {
    let view = tensors.tensor(name)?;

    if view.dtype() != dtype {
        return malformed(format!(
            "tensor {name} has dtype {:?}, expected {dtype:?}",
            view.dtype()
        ));
    }

    if view.shape().len() != 1 {
        return malformed(format!(
            "tensor {name} has shape {:?}, expected a vector",
            view.shape()
        ));
    }

    Ok(view
        .data()
        .chunks_exact(size_of::<T>())
        .map(bytemuck::pod_read_unaligned)
        .collect())
}
