use crate::model::OptionKey;

/// Selected option per question index.
///
/// Dense over `[0, len)`: every question has exactly one slot, `None` meaning
/// unanswered. Selecting again overwrites the slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnswerSet {
    slots: Vec<Option<OptionKey>>,
}

impl AnswerSet {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&OptionKey> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn is_answered(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Store `key` for `index`, returning the previous selection.
    ///
    /// Returns `None` without storing anything when `index` is out of range;
    /// callers check the range first.
    pub(crate) fn select(&mut self, index: usize, key: OptionKey) -> Option<Option<OptionKey>> {
        let slot = self.slots.get_mut(index)?;
        Some(slot.replace(key))
    }

    /// Iterate slots in question order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&OptionKey>> {
        self.slots.iter().map(Option::as_ref)
    }
}
