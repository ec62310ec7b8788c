// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Change descriptors delivered with every store notification.

use std::fmt;

/// A single kind of change that can happen to an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// The object was created.
    Create,
    /// The object was destroyed.
    Destroy,
    /// One or more shapes in the object were moved.
    MoveShape,
    /// Shape(s) were added to the object.
    AddShape,
    /// Shape(s) were removed from the object.
    RemoveShape,
}

bitflags::bitflags! {
    /// Set of changes reported for one object in one notification.
    ///
    /// Several bits may be set at once, except [`ActionSet::DESTROY`], which is
    /// always reported alone.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ActionSet: u32 {
        /// Object was created.
        const CREATE = 1;
        /// Object was destroyed.
        const DESTROY = 2;
        /// One or more shapes in the object were moved.
        const MOVE_SHAPE = 4;
        /// Shape(s) were added to the object.
        const ADD_SHAPE = 8;
        /// Shape(s) were removed from the object.
        const REMOVE_SHAPE = 16;
    }
}

impl ChangeKind {
    /// Returns the bit for this kind.
    pub const fn as_set(self) -> ActionSet {
        match self {
            Self::Create => ActionSet::CREATE,
            Self::Destroy => ActionSet::DESTROY,
            Self::MoveShape => ActionSet::MOVE_SHAPE,
            Self::AddShape => ActionSet::ADD_SHAPE,
            Self::RemoveShape => ActionSet::REMOVE_SHAPE,
        }
    }
}

impl From<ChangeKind> for ActionSet {
    fn from(kind: ChangeKind) -> Self {
        kind.as_set()
    }
}

impl FromIterator<ChangeKind> for ActionSet {
    fn from_iter<I: IntoIterator<Item = ChangeKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, kind| set | kind.as_set())
    }
}

impl ActionSet {
    /// `true` when this set reports a destroyed object.
    pub const fn is_destroy(self) -> bool {
        self.contains(Self::DESTROY)
    }

    /// `true` when the set obeys the exclusivity rule: DESTROY appears alone.
    pub const fn is_well_formed(self) -> bool {
        !self.contains(Self::DESTROY) || self.bits() == Self::DESTROY.bits()
    }

    /// Iterates the individual kinds in this set, in bit order.
    pub fn kinds(self) -> impl Iterator<Item = ChangeKind> {
        [
            ChangeKind::Create,
            ChangeKind::Destroy,
            ChangeKind::MoveShape,
            ChangeKind::AddShape,
            ChangeKind::RemoveShape,
        ]
        .into_iter()
        .filter(move |kind| self.contains(kind.as_set()))
    }
}

impl fmt::Debug for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.kinds()).finish()
    }
}
