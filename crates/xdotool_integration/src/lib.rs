mod error;
mod runner;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
mod xdotool;

pub use error::AutomationError;
pub use runner::{CommandRunner, ProcessRunner};
pub use xdotool::{parse_location, Xdotool, DEFAULT_TYPE_DELAY_MS};
