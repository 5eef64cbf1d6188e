//! Next-record computation for a single (date, hour) slot.

use crate::model::{DayRecordSet, TaskRecord};

/// Plain user edit: replace the text, carry the provenance flag over from
/// whatever was in the slot (false when the slot was empty). Editing a
/// repeated cell's text does not erase its propagation marker.
pub fn edit(previous: Option<&TaskRecord>, text: &str) -> TaskRecord {
    TaskRecord {
        text: text.to_string(),
        repeated: previous.is_some_and(|record| record.repeated),
    }
}

/// Repeat fan-out: unconditional overwrite of the target slot, marked as
/// propagated. Not a merge.
pub fn repeat(text: &str) -> TaskRecord {
    TaskRecord {
        text: text.to_string(),
        repeated: true,
    }
}

/// Delete-repeats: drop the slot entirely, but only when its content was
/// propagated. Manually entered text is never touched. Returns whether a
/// slot was removed.
pub fn remove_repeated(slots: &mut DayRecordSet, hour_label: &str) -> bool {
    if slots.get(hour_label).is_some_and(|record| record.repeated) {
        slots.remove(hour_label);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_defaults_to_unrepeated_for_fresh_slots() {
        let next = edit(None, "Gym");
        assert_eq!(next, TaskRecord::manual("Gym"));
    }

    #[test]
    fn edit_preserves_the_repeated_marker() {
        let previous = repeat("Standup");
        let next = edit(Some(&previous), "Standup (moved)");
        assert_eq!(next.text, "Standup (moved)");
        assert!(next.repeated, "plain edits must not clear provenance");
    }

    #[test]
    fn edit_keeps_manual_slots_manual() {
        let previous = TaskRecord::manual("Lunch");
        assert!(!edit(Some(&previous), "Late lunch").repeated);
    }

    #[test]
    fn empty_text_is_a_valid_edit() {
        let previous = repeat("Standup");
        let next = edit(Some(&previous), "");
        assert_eq!(next.text, "");
        assert!(next.repeated);
    }

    #[test]
    fn remove_repeated_only_touches_propagated_slots() {
        let mut slots = DayRecordSet::new();
        slots.insert("9:00".into(), repeat("Gym"));
        slots.insert("10:00".into(), TaskRecord::manual("Dentist"));

        assert!(remove_repeated(&mut slots, "9:00"));
        assert!(!slots.contains_key("9:00"), "slot deleted, not emptied");

        assert!(!remove_repeated(&mut slots, "10:00"));
        assert_eq!(slots.get("10:00"), Some(&TaskRecord::manual("Dentist")));

        assert!(!remove_repeated(&mut slots, "11:00"));
    }
}
