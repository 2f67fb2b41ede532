//! Operations and their dispatch.
//!
//! An [`Operation`] is a single runnable command. It is constructed by the
//! [`Dispatcher`] right before it runs, owns whatever it was built with, and
//! reports its outcome as an [`ExitStatus`]. There is no error channel: an
//! operation that cannot complete returns a nonzero status.
//!
//! ## Operations
//!
//! | name            | type             |
//! |-----------------|------------------|
//! | `friend-list`   | [`FriendList`]   |
//! | `friend-remove` | [`FriendRemove`] |
//! | `interact`      | [`Interact`]     |

pub mod dispatch;
pub mod friend_list;
pub mod friend_remove;
pub mod interact;

pub use dispatch::{Dispatcher, OperationFactory, StandardFactory};
pub use friend_list::FriendList;
pub use friend_remove::FriendRemove;
pub use interact::Interact;

use crate::error::DispatchError;
use crate::friends::FriendId;
use crate::status::ExitStatus;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

/// A runnable command.
#[async_trait]
pub trait Operation: Send {
    /// Which operation this is.
    fn kind(&self) -> OperationKind;

    /// Run to completion and report the outcome.
    async fn run(&mut self) -> ExitStatus;
}

/// The closed set of operations the dispatcher knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    FriendList,
    FriendRemove,
    Interact,
}

impl OperationKind {
    pub const ALL: [Self; 3] = [Self::FriendList, Self::FriendRemove, Self::Interact];

    /// Canonical command-line name.
    pub fn name(self) -> &'static str {
        match self {
            Self::FriendList => "friend-list",
            Self::FriendRemove => "friend-remove",
            Self::Interact => "interact",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperationKind {
    type Err = DispatchError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DispatchError::UnknownOperation(raw.to_string()))
    }
}

/// Construction parameters for an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationArgs {
    /// Target companion for `friend-remove`.
    pub friend: Option<FriendId>,
}
