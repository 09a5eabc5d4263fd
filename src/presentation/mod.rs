// Presentation layer - Reporting results to the CI runner
pub mod ci_output;
