use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::columns::{COMPANY, CPU_TYPE, GPU_BRAND, OP_SYS, STORAGE_TYPE, TYPE_NAME};

/// The allowed values of one categorical column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub column: &'static str,
    pub values: &'static [&'static str],
}

/// Every categorical column with the values the encoder was fitted on.
pub static CATEGORIES: [Category; 6] = [
    Category {
        column: CPU_TYPE,
        values: &[
            "Intel Core i3",
            "Intel Core i5",
            "Intel Core i7",
            "Intel Core i9",
            "Intel Pentium",
            "Intel Celeron",
            "AMD Ryzen",
            "AMD A-Series",
            "AMD E-Series",
            "Other",
        ],
    },
    Category {
        column: OP_SYS,
        values: &[
            "Windows 10",
            "No OS",
            "Linux",
            "Windows 7",
            "Chrome OS",
            "macOS",
            "Mac OS X",
            "Windows 10 S",
            "Android",
        ],
    },
    Category {
        column: STORAGE_TYPE,
        values: &["SSD", "HDD", "Flash Storage", "Hybrid", "Unknown"],
    },
    Category {
        column: GPU_BRAND,
        values: &["Intel", "Nvidia", "AMD", "ARM"],
    },
    Category {
        column: COMPANY,
        values: &[
            "Dell",
            "Lenovo",
            "HP",
            "Asus",
            "Acer",
            "MSI",
            "Toshiba",
            "Apple",
            "Samsung",
            "Razer",
            "Mediacom",
            "Microsoft",
            "Xiaomi",
            "Vero",
            "Chuwi",
            "Google",
            "Fujitsu",
            "LG",
            "Huawei",
        ],
    },
    Category {
        column: TYPE_NAME,
        values: &[
            "Notebook",
            "Gaming",
            "Ultrabook",
            "2 in 1 Convertible",
            "Workstation",
            "Netbook",
        ],
    },
];

/// Read-only view over `CATEGORIES`, serialized as a `column -> values` map in declaration
/// order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryRegistry;

impl CategoryRegistry {
    /// The allowed values of `column`, or `None` if it isn't categorical.
    pub fn domain(&self, column: &str) -> Option<&'static [&'static str]> {
        CATEGORIES
            .iter()
            .find(|c| c.column == column)
            .map(|c| c.values)
    }

    /// Resolves `value` to its static entry in the domain of `column`.
    pub fn lookup(&self, column: &str, value: &str) -> Option<&'static str> {
        self.domain(column)?.iter().copied().find(|v| *v == value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Category> {
        CATEGORIES.iter()
    }
}

impl Serialize for CategoryRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CATEGORIES.len()))?;
        for category in self.iter() {
            map.serialize_entry(category.column, category.values)?;
        }
        map.end()
    }
}
