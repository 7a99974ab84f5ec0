//! Override-memory strings surfaced when the user overrides a recommendation.

use once_cell::sync::Lazy;

use crate::ports::Effect;

/// Fixed pool of contextual strings, keyed only by "an override occurred".
///
/// Divergence magnitude plays no role in the wording.
static OVERRIDE_MEMORIES: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        (
            "Noted for next time",
            "Sometimes the heart picks before the math finishes.",
        ),
        (
            "A new page in the cake book",
            "Today's pick said something the profile hadn't heard yet.",
        ),
        (
            "Taste has the last word",
            "The recommendation proposed; the fork disposed.",
        ),
        (
            "Preference updated in spirit",
            "Every detour teaches the concierge a little more.",
        ),
        (
            "Off the beaten crumb",
            "An unexpected slice makes the best stories.",
        ),
    ]
});

/// Returns the memory effect for the nth override, cycling through the pool.
pub fn override_memory(cursor: usize) -> Effect {
    let (notification, moment) = OVERRIDE_MEMORIES[cursor % OVERRIDE_MEMORIES.len()];
    Effect::ShowOverrideMemory {
        notification: notification.to_string(),
        moment: moment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_memory_cycles_through_the_pool() {
        let first = override_memory(0);
        let wrapped = override_memory(OVERRIDE_MEMORIES.len());
        assert_eq!(first, wrapped);

        let second = override_memory(1);
        assert_ne!(first, second);
    }

    #[test]
    fn every_pool_entry_is_nonempty() {
        for i in 0..OVERRIDE_MEMORIES.len() {
            match override_memory(i) {
                Effect::ShowOverrideMemory { notification, moment } => {
                    assert!(!notification.is_empty());
                    assert!(!moment.is_empty());
                }
                _ => panic!("expected an override memory effect"),
            }
        }
    }
}
