pub mod artifacts;
pub mod encoder;
pub mod error;
pub mod forest;
mod io;
pub mod scaler;
mod traits;

pub use artifacts::{ArtifactPaths, Artifacts};
pub use encoder::OrdinalEncoder;
pub use error::{ArtifactErr, Result};
pub use forest::{RandomForest, Tree};
pub use scaler::MinMaxScaler;
pub use traits::{Encoder, Regressor, Scaler};
