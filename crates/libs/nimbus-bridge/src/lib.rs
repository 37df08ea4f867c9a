//! Callback-to-async bridge primitives.
//!
//! Collaborators in the nimbus SDK report results through callbacks on
//! threads they own. This crate turns those callbacks into async values:
//!
//! - [`pending::single`] for one-shot calls, as a [`PendingCall`] future
//! - [`sequence::batches`] and [`sequence::observe`] for item streams
//! - [`subscription::subscribe`] for live subscriptions with connection state
//! - [`transfer::transfer`] for transfers with progress and a final result
//!
//! Every shape honours cooperative cancellation through the collaborator's
//! [`CancelHandle`], including a cancel that races ahead of the handle
//! itself (see [`CancelPolicy`]).

pub mod callback;
pub mod cancel;
pub mod config;
pub mod error;
pub mod hub;
pub mod pending;
pub mod phase;
pub mod sequence;
pub mod shape;
pub mod subscription;
pub mod transfer;

pub use callback::{
    cancel_handle, noop_handle, Action, CancelHandle, Cancelable, Consumer, Listener,
};
pub use cancel::CancelSlot;
pub use config::{BridgeConfig, CancelPolicy, ConfigError, ReplayPolicy};
pub use error::BridgeError;
pub use hub::{Hub, HubStream};
pub use pending::{Canceler, PendingCall};
pub use phase::Phase;
pub use sequence::{BatchSink, ItemStream};
pub use shape::Shape;
pub use subscription::{ConnectionState, SubscriptionCallbacks, SubscriptionOperation};
pub use transfer::{TransferCallbacks, TransferOperation};
