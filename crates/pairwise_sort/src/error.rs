use thiserror::Error;

use crate::item::ItemId;

/// Why a submitted decision was ignored. Engine state is untouched in every case.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Rejection {
    #[error("no comparison is pending")]
    NoPendingComparison,

    #[error("item {winner} is not part of the pending comparison")]
    NotAContender { winner: ItemId },
}
