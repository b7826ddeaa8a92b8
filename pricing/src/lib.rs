pub mod columns;
pub mod error;
pub mod pipeline;
pub mod predictor;
pub mod record;
pub mod registry;
pub mod validation;

pub use error::{PricingErr, Result};
pub use pipeline::{FeaturePipeline, ModelFeatureSubset};
pub use predictor::{PricePredictor, clamp_price};
pub use record::FeatureRecord;
pub use registry::CategoryRegistry;
pub use validation::validate;
