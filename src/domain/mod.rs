// Port interfaces
pub mod ports;

// Listing valuation domain
pub mod valuation;

// Domain-specific error types
pub mod errors;
