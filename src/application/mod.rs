// Inference backends
pub mod ml;

// Request handling
pub mod valuation_service;
