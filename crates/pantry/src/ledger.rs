use grocer_shared::{Action, Entity, Pantry};

/// Applies extracted entities to a pantry, in order, and returns the result.
///
/// Adds accumulate. A removal of zero, or of at least the stored amount,
/// deletes the key; a smaller removal decrements. Removing something the
/// pantry does not hold is a no-op. No key is ever left at zero.
pub fn apply(mut pantry: Pantry, entities: &[Entity]) -> Pantry {
    for entity in entities {
        match entity.action {
            Action::Add => {
                if entity.quantity == 0 {
                    continue;
                }

                let stored = pantry.entry(entity.item.clone()).or_insert(0);
                *stored = stored.saturating_add(entity.quantity);
            }
            Action::Remove => {
                let Some(stored) = pantry.get(&entity.item).copied() else {
                    continue;
                };

                if entity.quantity == 0 || entity.quantity >= stored {
                    pantry.remove(&entity.item);
                } else {
                    pantry.insert(entity.item.clone(), stored - entity.quantity);
                }
            }
        }
    }

    pantry
}
