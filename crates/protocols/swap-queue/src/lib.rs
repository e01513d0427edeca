//! Swap queue
//!
//! Queues inbound swaps, scores and orders them deterministically, and
//! executes a bounded share of the queue at the end of every block.
//!
//! # Flow
//!
//! 1. An inbound tx memo is parsed into a [`MsgSwap`] and queued
//! 2. At block end the queue is fetched, scored against the pools and sorted
//! 3. The first `todo` swaps run through the handler; failures are refunded
//! 4. Executed items leave the queue, the rest wait for the next block

pub mod errors;
pub mod events;
pub mod handler;
pub mod managers;
pub mod memo;
pub mod msg;
pub mod queue;
pub mod quote;
pub mod refund;
pub mod score;
pub mod sort;

// Re-exports
pub use errors::{RefundCode, SwapError};
pub use events::{Event, EventManager, FeeEvent, RefundEvent, SwapEvent};
pub use handler::{run_swap, validate, SwapOutcome};
pub use managers::{ManagerError, Managers};
pub use memo::{msg_swap_from_tx, SwapMemo};
pub use msg::{MsgSwap, OrderType, SwapItem};
pub use queue::{
    add_swap_queue_item, get_swap_queue, get_todo_num, queue_swap_from_tx, SwapQueue, SwapQueueV95,
};
pub use quote::{quote_swap, SwapQuote};
pub use refund::refund_tx;
pub use score::score_msgs;
pub use sort::sort_swap_items;
