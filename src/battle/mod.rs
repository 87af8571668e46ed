pub mod ai;
pub mod calculators;
pub mod engine;
pub mod replay;
pub mod state;
pub mod type_chart;

#[cfg(test)]
pub(crate) mod tests;
