pub mod csv;
pub mod dataset;
pub mod scaler;
pub mod synthetic;

pub use csv::{load_csv, parse_csv};
pub use dataset::Dataset;
pub use scaler::StandardScaler;
pub use synthetic::linearly_separable;
