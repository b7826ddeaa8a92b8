use crate::{PricingErr, Result};

pub const INCHES: &str = "Inches";
pub const RAM: &str = "Ram";
pub const WEIGHT: &str = "Weight";
pub const SCRES_X: &str = "ScRes_X";
pub const SCRES_Y: &str = "ScRes_Y";
pub const SCRES_IS_TOUCHSCREEN: &str = "ScRes_is_touchscreen";
pub const SSD_CAPACITY: &str = "SSD_Capacity";
pub const HDD_CAPACITY: &str = "HDD_Capacity";
pub const FLASH_CAPACITY: &str = "Flash_Capacity";
pub const HYBRID_CAPACITY: &str = "Hybrid_Capacity";
pub const CPU_FREQUENCY: &str = "Cpu_Frequency";
pub const COMPANY: &str = "Company";
pub const TYPE_NAME: &str = "TypeName";
pub const OP_SYS: &str = "OpSys";
pub const STORAGE_TYPE: &str = "Storage_Type";
pub const CPU_TYPE: &str = "Cpu_Type";
pub const GPU_BRAND: &str = "Gpu_Brand";

/// The exact column order the scaler was fitted with.
pub const SCALER_COLUMNS: [&str; 17] = [
    INCHES,
    RAM,
    WEIGHT,
    SCRES_X,
    SCRES_Y,
    SCRES_IS_TOUCHSCREEN,
    SSD_CAPACITY,
    HDD_CAPACITY,
    FLASH_CAPACITY,
    HYBRID_CAPACITY,
    CPU_FREQUENCY,
    COMPANY,
    TYPE_NAME,
    OP_SYS,
    STORAGE_TYPE,
    CPU_TYPE,
    GPU_BRAND,
];

/// The columns the encoder was fitted with, in its own order.
pub const CATEGORICAL_COLUMNS: [&str; 6] =
    [COMPANY, TYPE_NAME, OP_SYS, STORAGE_TYPE, CPU_TYPE, GPU_BRAND];

/// The subset of `SCALER_COLUMNS` the model consumes, in the model's order.
pub const MODEL_COLUMNS: [&str; 13] = [
    RAM,
    SCRES_X,
    SCRES_Y,
    CPU_TYPE,
    WEIGHT,
    CPU_FREQUENCY,
    SSD_CAPACITY,
    INCHES,
    OP_SYS,
    STORAGE_TYPE,
    GPU_BRAND,
    COMPANY,
    TYPE_NAME,
];

/// Positions of a list of target columns inside a source column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    columns: Vec<&'static str>,
    indices: Vec<usize>,
}

impl Projection {
    /// Resolves every column of `to` inside `from`.
    ///
    /// # Arguments
    /// * `from` - The source column order.
    /// * `to` - The target column order.
    ///
    /// # Returns
    /// The projection or an error naming the first target column missing in the source.
    pub fn new(from: &[&'static str], to: &[&'static str]) -> Result<Self> {
        let indices = to
            .iter()
            .map(|col| {
                from.iter()
                    .position(|c| c == col)
                    .ok_or_else(|| PricingErr::Internal(format!("unknown column {col}")))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            columns: to.to_vec(),
            indices,
        })
    }

    /// The target column names, in target order.
    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    /// The source index of each target column.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

/// Checks that a fitted artifact recorded exactly the `expected` columns.
pub fn same_columns(got: &[String], expected: &[&str]) -> bool {
    got.len() == expected.len() && got.iter().zip(expected).all(|(g, e)| g == e)
}

/// Owned copy of a static column list, for error reporting.
pub fn to_owned(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}
