use crate::columns::*;

/// One value of a record before encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Num(f64),
    Cat(&'static str),
}

/// A validated laptop configuration. Categorical values always point into the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub inches: f64,
    pub ram: f64,
    pub weight: f64,
    pub scres_x: i64,
    pub scres_y: i64,
    pub scres_is_touchscreen: i64,
    pub ssd_capacity: i64,
    pub hdd_capacity: i64,
    pub flash_capacity: i64,
    pub hybrid_capacity: i64,
    pub cpu_frequency: f64,
    pub company: &'static str,
    pub type_name: &'static str,
    pub op_sys: &'static str,
    pub storage_type: &'static str,
    pub cpu_type: &'static str,
    pub gpu_brand: &'static str,
}

impl FeatureRecord {
    /// Looks a value up by its training column name.
    pub fn cell(&self, column: &str) -> Option<Cell> {
        let cell = match column {
            INCHES => Cell::Num(self.inches),
            RAM => Cell::Num(self.ram),
            WEIGHT => Cell::Num(self.weight),
            SCRES_X => Cell::Num(self.scres_x as f64),
            SCRES_Y => Cell::Num(self.scres_y as f64),
            SCRES_IS_TOUCHSCREEN => Cell::Num(self.scres_is_touchscreen as f64),
            SSD_CAPACITY => Cell::Num(self.ssd_capacity as f64),
            HDD_CAPACITY => Cell::Num(self.hdd_capacity as f64),
            FLASH_CAPACITY => Cell::Num(self.flash_capacity as f64),
            HYBRID_CAPACITY => Cell::Num(self.hybrid_capacity as f64),
            CPU_FREQUENCY => Cell::Num(self.cpu_frequency),
            COMPANY => Cell::Cat(self.company),
            TYPE_NAME => Cell::Cat(self.type_name),
            OP_SYS => Cell::Cat(self.op_sys),
            STORAGE_TYPE => Cell::Cat(self.storage_type),
            CPU_TYPE => Cell::Cat(self.cpu_type),
            GPU_BRAND => Cell::Cat(self.gpu_brand),
            _ => return None,
        };

        Some(cell)
    }
}
