//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod control;
pub mod edge;
pub mod rx;
pub mod tick;
pub mod tx;

pub use control::control_task;
pub use edge::edge_task;
pub use rx::rx_task;
pub use tick::tick_task;
pub use tx::tx_task;
