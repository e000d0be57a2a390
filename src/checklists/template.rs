use crate::storage::ItemSeed;

/// The six buckets every checklist item falls into, ordered from furthest
/// out to after the move.
pub const TIMEFRAMES: [&str; 6] = [
    "8-weeks",
    "4-weeks",
    "2-weeks",
    "1-week",
    "moving-day",
    "after-move",
];

struct TaskTemplate {
    task: &'static str,
    description: &'static str,
    category: &'static str,
    timeframe: &'static str,
}

/// Fixed task catalog: three tasks per timeframe. Content is curated static
/// data; the timeframe label drives ordering and filtering, no calendar
/// dates are attached.
static TASK_CATALOG: [TaskTemplate; 18] = [
    TaskTemplate {
        task: "Set a moving budget",
        description: "Estimate total costs and decide how much to spend on movers vs. DIY.",
        category: "planning",
        timeframe: "8-weeks",
    },
    TaskTemplate {
        task: "Research moving companies",
        description: "Collect at least three quotes and check reviews and insurance coverage.",
        category: "planning",
        timeframe: "8-weeks",
    },
    TaskTemplate {
        task: "Declutter room by room",
        description: "Sell, donate, or toss anything you don't want to pay to move.",
        category: "planning",
        timeframe: "8-weeks",
    },
    TaskTemplate {
        task: "Order packing supplies",
        description: "Boxes, tape, bubble wrap, markers, and furniture blankets.",
        category: "packing",
        timeframe: "4-weeks",
    },
    TaskTemplate {
        task: "Pack rarely used items",
        description: "Start with seasonal gear, books, and storage closets.",
        category: "packing",
        timeframe: "4-weeks",
    },
    TaskTemplate {
        task: "Give notice on your current home",
        description: "Notify your landlord or coordinate your sale timeline.",
        category: "admin",
        timeframe: "4-weeks",
    },
    TaskTemplate {
        task: "File a change of address",
        description: "Submit USPS mail forwarding and update billing addresses.",
        category: "admin",
        timeframe: "2-weeks",
    },
    TaskTemplate {
        task: "Transfer utilities",
        description: "Schedule shutoff at the old place and activation at the new one.",
        category: "admin",
        timeframe: "2-weeks",
    },
    TaskTemplate {
        task: "Confirm mover details",
        description: "Reconfirm date, arrival window, and parking or elevator reservations.",
        category: "planning",
        timeframe: "2-weeks",
    },
    TaskTemplate {
        task: "Pack an essentials box",
        description: "Chargers, toiletries, medications, and a few days of clothes.",
        category: "packing",
        timeframe: "1-week",
    },
    TaskTemplate {
        task: "Clean out the refrigerator",
        description: "Use up perishables and defrost the freezer the day before.",
        category: "cleaning",
        timeframe: "1-week",
    },
    TaskTemplate {
        task: "Finish packing everything else",
        description: "Label every box with its room and contents.",
        category: "packing",
        timeframe: "1-week",
    },
    TaskTemplate {
        task: "Do a final walkthrough",
        description: "Check closets, cabinets, and the garage for anything left behind.",
        category: "moving-day",
        timeframe: "moving-day",
    },
    TaskTemplate {
        task: "Direct the movers",
        description: "Walk the crew through the home and verify the inventory list.",
        category: "moving-day",
        timeframe: "moving-day",
    },
    TaskTemplate {
        task: "Hand over the keys",
        description: "Return keys, fobs, and garage remotes to the landlord or buyer.",
        category: "moving-day",
        timeframe: "moving-day",
    },
    TaskTemplate {
        task: "Unpack the essentials first",
        description: "Beds, bathroom, and kitchen basics before anything decorative.",
        category: "unpacking",
        timeframe: "after-move",
    },
    TaskTemplate {
        task: "Update your license and registration",
        description: "Most states give you 30 days after an in-state or inbound move.",
        category: "settling-in",
        timeframe: "after-move",
    },
    TaskTemplate {
        task: "Meet the neighbors",
        description: "Introduce yourself and find the essentials: grocery, pharmacy, transit.",
        category: "settling-in",
        timeframe: "after-move",
    },
];

/// Instantiates the fixed task catalog as item seeds. Every item starts
/// incomplete; the store attaches ids when the checklist is created.
pub fn item_seeds() -> Vec<ItemSeed> {
    TASK_CATALOG
        .iter()
        .map(|t| ItemSeed {
            task: t.task.to_string(),
            description: Some(t.description.to_string()),
            category: t.category.to_string(),
            timeframe: t.timeframe.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_timeframe_has_multiple_tasks() {
        let seeds = item_seeds();
        for timeframe in TIMEFRAMES {
            let count = seeds.iter().filter(|s| s.timeframe == timeframe).count();
            assert!(count >= 2, "timeframe {timeframe} has only {count} tasks");
        }
    }

    #[test]
    fn no_timeframe_outside_the_enumeration() {
        for seed in item_seeds() {
            assert!(
                TIMEFRAMES.contains(&seed.timeframe.as_str()),
                "unexpected timeframe {}",
                seed.timeframe
            );
        }
    }

    #[test]
    fn catalog_is_stable_in_size_and_content() {
        let seeds = item_seeds();
        assert_eq!(seeds.len(), 18);
        assert!(seeds.iter().all(|s| !s.task.is_empty()));
        assert!(seeds.iter().all(|s| !s.category.is_empty()));
        assert!(seeds.iter().all(|s| s.description.is_some()));
    }
}
