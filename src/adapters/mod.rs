//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements              | Connects to                 |
//! |-------------|-------------------------|-----------------------------|
//! | `hardware`  | KeyboardPort, MotorPort | keyboard driver, belt motor |
//! | `host`      | HostPort                | wall-clock fixed-step loop  |
//! | `log_sink`  | EventSink               | `vbelt:` lines on a writer  |

pub mod hardware;
pub mod host;
pub mod log_sink;
