//! Lifecycle transition kinds.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// The six lifecycle transitions an instance can go through.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Fresh construction.
    Construct,
    /// Construction by duplicating another instance.
    CopyConstruct,
    /// Construction by taking over another instance's contents.
    MoveConstruct,
    /// Overwriting an existing instance with a duplicate of another.
    CopyAssign,
    /// Overwriting an existing instance by taking over another's contents.
    MoveAssign,
    /// Teardown.
    Destroy,
}

impl TransitionKind {
    /// Every transition, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Construct,
        Self::CopyConstruct,
        Self::MoveConstruct,
        Self::CopyAssign,
        Self::MoveAssign,
        Self::Destroy,
    ];

    /// Number of distinct transitions.
    pub const COUNT: usize = Self::ALL.len();

    /// Returns the position of this transition within [`TransitionKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Construct => 0,
            Self::CopyConstruct => 1,
            Self::MoveConstruct => 2,
            Self::CopyAssign => 3,
            Self::MoveAssign => 4,
            Self::Destroy => 5,
        }
    }

    /// Returns the snake_case name used for display and parsing.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Construct => "construct",
            Self::CopyConstruct => "copy_construct",
            Self::MoveConstruct => "move_construct",
            Self::CopyAssign => "copy_assign",
            Self::MoveAssign => "move_assign",
            Self::Destroy => "destroy",
        }
    }

    /// Returns `true` for the transitions that produce a new instance.
    #[must_use]
    pub const fn is_construction(self) -> bool {
        matches!(
            self,
            Self::Construct | Self::CopyConstruct | Self::MoveConstruct
        )
    }

    /// Returns `true` for the transitions that overwrite an existing instance.
    #[must_use]
    pub const fn is_assignment(self) -> bool {
        matches!(self, Self::CopyAssign | Self::MoveAssign)
    }

    const fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl Display for TransitionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TransitionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| Error::unknown_transition(s.trim()))
    }
}

/// Compact set of [`TransitionKind`]s.
///
/// Parses from a comma separated list of transition names, or the keywords
/// `all` and `none`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct TransitionSet(u8);

impl TransitionSet {
    const MASK: u8 = (1 << TransitionKind::COUNT) - 1;

    /// Returns a set with no transitions.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns a set containing every transition.
    #[must_use]
    pub const fn all() -> Self {
        Self(Self::MASK)
    }

    /// Returns a set containing a single transition.
    #[must_use]
    pub const fn only(kind: TransitionKind) -> Self {
        Self(kind.bit())
    }

    /// Returns a copy of the set with `kind` added.
    #[must_use]
    pub const fn with(self, kind: TransitionKind) -> Self {
        Self(self.0 | kind.bit())
    }

    /// Adds `kind`, returning `true` if it was not already present.
    pub fn insert(&mut self, kind: TransitionKind) -> bool {
        let absent = !self.contains(kind);
        self.0 |= kind.bit();
        absent
    }

    /// Removes `kind`, returning `true` if it was present.
    pub fn remove(&mut self, kind: TransitionKind) -> bool {
        let present = self.contains(kind);
        self.0 &= !kind.bit();
        present
    }

    /// Returns `true` if `kind` is part of the set.
    #[must_use]
    pub const fn contains(self, kind: TransitionKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Returns `true` if the set holds no transitions.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of transitions in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the contained transitions in declaration order.
    #[must_use]
    pub fn iter(self) -> TransitionSetIter {
        TransitionSetIter { set: self, next: 0 }
    }
}

impl FromIterator<TransitionKind> for TransitionSet {
    fn from_iter<I: IntoIterator<Item = TransitionKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl IntoIterator for TransitionSet {
    type Item = TransitionKind;
    type IntoIter = TransitionSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the members of a [`TransitionSet`].
#[derive(Clone, Debug)]
pub struct TransitionSetIter {
    set: TransitionSet,
    next: usize,
}

impl Iterator for TransitionSetIter {
    type Item = TransitionKind;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(kind) = TransitionKind::ALL.get(self.next).copied() {
            self.next += 1;
            if self.set.contains(kind) {
                return Some(kind);
            }
        }
        None
    }
}

impl Display for TransitionSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        for (i, kind) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            Display::fmt(&kind, f)?;
        }
        Ok(())
    }
}

impl FromStr for TransitionSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" => return Err(Error::EmptyTransitionList),
            "all" => return Ok(Self::all()),
            "none" => return Ok(Self::empty()),
            _ => {}
        }

        let mut set = Self::empty();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            set.insert(part.parse()?);
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_round_trip() {
        for kind in TransitionKind::ALL {
            assert_eq!(kind.to_string().parse::<TransitionKind>(), Ok(kind));
        }
    }

    #[test]
    fn kind_parsing_accepts_kebab_case() {
        assert_eq!(
            "Copy-Construct".parse::<TransitionKind>(),
            Ok(TransitionKind::CopyConstruct)
        );
    }

    #[test]
    fn unknown_kind_errors() {
        let err = "teleport".parse::<TransitionKind>().expect_err("unknown");
        assert_eq!(err, Error::unknown_transition("teleport"));
    }

    #[test]
    fn indices_match_declaration_order() {
        for (i, kind) in TransitionKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn kind_serializes_as_snake_case() {
        let json = serde_json::to_string(&TransitionKind::MoveAssign).unwrap();
        assert_eq!(json, "\"move_assign\"");
        let kind: TransitionKind = serde_json::from_str("\"copy_construct\"").unwrap();
        assert_eq!(kind, TransitionKind::CopyConstruct);
    }

    #[test]
    fn classifies_constructions_and_assignments() {
        assert!(TransitionKind::MoveConstruct.is_construction());
        assert!(!TransitionKind::Destroy.is_construction());
        assert!(TransitionKind::CopyAssign.is_assignment());
        assert!(!TransitionKind::Construct.is_assignment());
    }

    #[test]
    fn set_parses_lists_and_keywords() {
        let set: TransitionSet = "copy_construct, destroy".parse().unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(TransitionKind::CopyConstruct));
        assert!(set.contains(TransitionKind::Destroy));
        assert!(!set.contains(TransitionKind::Construct));

        assert_eq!("ALL".parse::<TransitionSet>(), Ok(TransitionSet::all()));
        assert_eq!("none".parse::<TransitionSet>(), Ok(TransitionSet::empty()));
        assert_eq!(
            "  ".parse::<TransitionSet>(),
            Err(Error::EmptyTransitionList)
        );
        assert!(matches!(
            "destroy,warp".parse::<TransitionSet>(),
            Err(Error::UnknownTransition { .. })
        ));
    }

    #[test]
    fn set_insert_and_remove_report_changes() {
        let mut set = TransitionSet::empty();
        assert!(set.insert(TransitionKind::MoveAssign));
        assert!(!set.insert(TransitionKind::MoveAssign));
        assert!(set.remove(TransitionKind::MoveAssign));
        assert!(!set.remove(TransitionKind::MoveAssign));
        assert!(set.is_empty());
    }

    #[test]
    fn set_display_lists_members_in_order() {
        let set: TransitionSet = [TransitionKind::Destroy, TransitionKind::Construct]
            .into_iter()
            .collect();
        assert_eq!(set.to_string(), "construct,destroy");
        assert_eq!(TransitionSet::empty().to_string(), "none");
        assert_eq!(set.to_string().parse::<TransitionSet>(), Ok(set));
    }
}
