//! File locations, atomic writes and the best-effort error log

mod clock;
mod error_log;
mod io;
mod paths;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error_log::ErrorLog;
pub use io::{append_line, atomic_write};
pub use paths::{Paths, PROJECT_DIR_ENV};
