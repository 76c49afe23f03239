mod model;
mod validation;

pub use model::{
    BadgeConfig, Config, DEFAULT_CONFIG_FILE, ExcludeConfig, ThresholdConfig, ThresholdOverride,
};
pub use validation::validate_config;
