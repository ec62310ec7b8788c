// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Errors for caller misuse of the object store.
//!
//! Unknown ids and unknown shapes are not errors; those operations report
//! `false` instead.

use thiserror::Error;

/// Rejected store mutation. The store is unchanged and nothing is notified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Batch insert with differing numbers of shapes and poses.
    #[error("object {id:?}: {shapes} shapes but {poses} poses")]
    LengthMismatch {
        /// Target object id.
        id: String,
        /// Number of shapes supplied.
        shapes: usize,
        /// Number of poses supplied.
        poses: usize,
    },
    /// A pose contained NaN or infinity and the store is configured to
    /// reject such poses.
    #[error("object {id:?}: pose is not finite")]
    NonFinitePose {
        /// Target object id.
        id: String,
    },
}
