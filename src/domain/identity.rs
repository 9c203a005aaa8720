//! Persistence identity of a record.

/// Identity assigned by the store on first save.
///
/// Equality follows the persistence rule: two identities are equal only when both
/// are `Saved` with the same id. `Unsaved` is never equal to anything, itself included,
/// which is why this type implements `PartialEq` but not `Eq`.
#[derive(Clone, Copy, Debug, Default)]
pub enum Identity {
    #[default]
    Unsaved,
    Saved(i64),
}

impl Identity {
    pub fn id(self) -> Option<i64> {
        match self {
            Identity::Unsaved => None,
            Identity::Saved(id) => Some(id),
        }
    }

    pub fn is_saved(self) -> bool {
        matches!(self, Identity::Saved(_))
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Identity::Saved(a), Identity::Saved(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Option<i64>> for Identity {
    fn from(id: Option<i64>) -> Self {
        id.map_or(Identity::Unsaved, Identity::Saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsaved_is_never_equal() {
        let a = Identity::Unsaved;
        assert_ne!(a, a);
        assert_ne!(Identity::Unsaved, Identity::Saved(1));
    }

    #[test]
    fn saved_compares_ids() {
        assert_eq!(Identity::Saved(3), Identity::Saved(3));
        assert_ne!(Identity::Saved(3), Identity::Saved(4));
    }

    #[test]
    fn from_option() {
        assert_eq!(Identity::from(Some(9)).id(), Some(9));
        assert!(!Identity::from(None).is_saved());
    }
}
