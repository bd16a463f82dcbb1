//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                  |
//! |----------------|--------------------|------------------------------|
//! | `memory`       | SecurityRepository | Process memory               |
//! | `json_store`   | SecurityRepository | JSON snapshot on disk        |
//! | `log_sink`     | EventSink          | `log` facade                 |
//! | `cat_detector` | CatDetector        | Fixed / random stand-ins     |

pub mod cat_detector;
pub mod json_store;
pub mod log_sink;
pub mod memory;
