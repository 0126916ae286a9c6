pub mod easing;
pub mod percent;

pub use easing::EasingHelper;
pub use percent::PercentHelper;
