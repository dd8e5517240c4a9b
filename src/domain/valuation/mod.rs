// Raw request handling
pub mod request;

// Categorical encoding
pub mod encoding;

// Feature derivation and ordering
pub mod features;

// Standard scaling
pub mod scaling;

pub use encoding::{CategoryEncoder, Encoded, EncodingTable};
pub use features::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector, build_features};
pub use request::{BikeRequest, REQUIRED_FIELDS};
pub use scaling::{FeatureScaler, ScalerParams};
