#[cfg(feature = "onnx")]
pub mod onnx_predictor;
pub mod predictor;
pub mod smartcore_predictor;

#[cfg(feature = "onnx")]
pub use onnx_predictor::OnnxPriceModel;
pub use predictor::PriceModel;
pub use smartcore_predictor::SmartCorePriceModel;
