/// Counter metric entity module
pub mod counter_metric;
/// Gauge metric entity module
pub mod gauge_metric;
