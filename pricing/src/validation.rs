use std::collections::HashMap;

use crate::{
    FeatureRecord, PricingErr, Result,
    columns::{COMPANY, CPU_TYPE, GPU_BRAND, OP_SYS, STORAGE_TYPE, TYPE_NAME},
    registry::CategoryRegistry,
};

/// A field value after parsing and checking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Float(f64),
    Int(i64),
    Category(&'static str),
}

#[derive(Debug, Clone, Copy)]
enum Check {
    Float {
        label: &'static str,
        min: f64,
        max: f64,
        unit: &'static str,
    },
    Int {
        label: &'static str,
        min: i64,
        max: i64,
        unit: &'static str,
    },
    Flag {
        label: &'static str,
    },
    OneOf {
        column: &'static str,
    },
}

/// The declared constraint on one request field.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub field: &'static str,
    check: Check,
}

const fn float(
    field: &'static str,
    label: &'static str,
    min: f64,
    max: f64,
    unit: &'static str,
) -> Rule {
    Rule {
        field,
        check: Check::Float {
            label,
            min,
            max,
            unit,
        },
    }
}

const fn int(
    field: &'static str,
    label: &'static str,
    min: i64,
    max: i64,
    unit: &'static str,
) -> Rule {
    Rule {
        field,
        check: Check::Int {
            label,
            min,
            max,
            unit,
        },
    }
}

const fn one_of(field: &'static str, column: &'static str) -> Rule {
    Rule {
        field,
        check: Check::OneOf { column },
    }
}

/// Every request field with its rule, in evaluation order.
pub static RULES: [Rule; 17] = [
    float("ram", "RAM", 2.0, 64.0, " GB"),
    int("scres_x", "Resolution X", 1366, 2880, ""),
    int("scres_y", "Resolution Y", 768, 1800, ""),
    Rule {
        field: "scres_is_touchscreen",
        check: Check::Flag {
            label: "Touchscreen",
        },
    },
    one_of("cpu_type", CPU_TYPE),
    float("weight", "Weight", 1.0, 3.0, " kg"),
    float("cpu_frequency", "CPU frequency", 1.2, 3.5, " GHz"),
    int("ssd_capacity", "SSD capacity", 0, 1000, " GB"),
    int("hdd_capacity", "HDD capacity", 0, 1000, " GB"),
    int("flash_capacity", "Flash capacity", 0, 1000, " GB"),
    int("hybrid_capacity", "Hybrid capacity", 0, 1000, " GB"),
    float("inches", "Inches", 10.0, 18.0, ""),
    one_of("opsys", OP_SYS),
    one_of("storage_type", STORAGE_TYPE),
    one_of("gpu_brand", GPU_BRAND),
    one_of("company", COMPANY),
    one_of("typename", TYPE_NAME),
];

impl Rule {
    fn invalid<T>(&self, msg: String) -> Result<T> {
        Err(PricingErr::Invalid {
            field: self.field,
            msg,
        })
    }

    /// Parses and checks the raw value of this rule's field.
    ///
    /// # Arguments
    /// * `raw` - The submitted value, `None` if the field is missing.
    ///
    /// # Returns
    /// The typed value or an `Invalid` error naming the field.
    pub fn check(&self, raw: Option<&str>) -> Result<Value> {
        let Some(raw) = raw else {
            return self.invalid(format!("missing field: {}", self.field));
        };

        match self.check {
            Check::Float {
                label,
                min,
                max,
                unit,
            } => {
                let Ok(x) = raw.trim().parse::<f64>() else {
                    return self.invalid(format!("{} must be a number, got '{raw}'", self.field));
                };

                // NaN falls outside every range.
                if !(min..=max).contains(&x) {
                    return self.invalid(format!("{label} must be between {min} and {max}{unit}"));
                }

                Ok(Value::Float(x))
            }
            Check::Int {
                label,
                min,
                max,
                unit,
            } => {
                let x = self.parse_int(raw)?;
                if !(min..=max).contains(&x) {
                    return self.invalid(format!("{label} must be between {min} and {max}{unit}"));
                }

                Ok(Value::Int(x))
            }
            Check::Flag { label } => match self.parse_int(raw)? {
                x @ (0 | 1) => Ok(Value::Int(x)),
                _ => self.invalid(format!("{label} must be 0 (no) or 1 (yes)")),
            },
            Check::OneOf { column } => {
                let registry = CategoryRegistry;
                match registry.lookup(column, raw) {
                    Some(value) => Ok(Value::Category(value)),
                    None => {
                        let allowed = registry.domain(column).unwrap_or_default();
                        self.invalid(format!("{column} must be one of {allowed:?}"))
                    }
                }
            }
        }
    }

    fn parse_int(&self, raw: &str) -> Result<i64> {
        match raw.trim().parse::<i64>() {
            Ok(x) => Ok(x),
            Err(_) => self.invalid(format!("{} must be an integer, got '{raw}'", self.field)),
        }
    }
}

/// Checks every field in `RULES` order, stopping at the first failure.
///
/// # Arguments
/// * `form` - The submitted field values by name.
///
/// # Returns
/// The typed record or the first field's error.
pub fn validate(form: &HashMap<String, String>) -> Result<FeatureRecord> {
    let values = RULES
        .iter()
        .map(|rule| rule.check(form.get(rule.field).map(String::as_str)))
        .collect::<Result<Vec<_>>>()?;

    assemble(&values)
}

fn assemble(values: &[Value]) -> Result<FeatureRecord> {
    use Value::{Category, Float, Int};

    let &[
        Float(ram),
        Int(scres_x),
        Int(scres_y),
        Int(scres_is_touchscreen),
        Category(cpu_type),
        Float(weight),
        Float(cpu_frequency),
        Int(ssd_capacity),
        Int(hdd_capacity),
        Int(flash_capacity),
        Int(hybrid_capacity),
        Float(inches),
        Category(op_sys),
        Category(storage_type),
        Category(gpu_brand),
        Category(company),
        Category(type_name),
    ] = values
    else {
        return Err(PricingErr::Internal(format!(
            "validated values don't follow the rule order: {values:?}"
        )));
    };

    Ok(FeatureRecord {
        inches,
        ram,
        weight,
        scres_x,
        scres_y,
        scres_is_touchscreen,
        ssd_capacity,
        hdd_capacity,
        flash_capacity,
        hybrid_capacity,
        cpu_frequency,
        company,
        type_name,
        op_sys,
        storage_type,
        cpu_type,
        gpu_brand,
    })
}
