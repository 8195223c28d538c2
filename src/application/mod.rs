mod refresher;
mod scheduler;
mod telemetry;

pub use refresher::Refresher;
pub use scheduler::{Concurrency, FetchScheduler};
pub use telemetry::ExporterMetrics;
