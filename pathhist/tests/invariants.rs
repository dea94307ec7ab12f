//! Property tests for the one-current-record invariant.
//!
//! Random sequences of renames, record deletions, restores and alias
//! insertions are applied to a small category tree; after every step each
//! owner must have at most one current record, and every owner with records
//! left after a rename or restore must have exactly one.

mod common;

use common::shop::{Shop, CATEGORY};
use pathhist::RelatedRef;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Rename { category: usize, slug: usize },
    DeleteRecord { pick: usize },
    Restore { category: usize },
    Alias { pick: usize },
}

const SLUGS: [&str; 4] = ["alpha", "beta", "gamma", "delta"];

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0usize..3, 0usize..SLUGS.len()).prop_map(|(category, slug)| Step::Rename { category, slug }),
        any::<usize>().prop_map(|pick| Step::DeleteRecord { pick }),
        (0usize..3).prop_map(|category| Step::Restore { category }),
        any::<usize>().prop_map(|pick| Step::Alias { pick }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    #[test]
    fn at_most_one_current_record(steps in prop::collection::vec(step_strategy(), 1..25)) {
        let mut shop = Shop::new();
        let root = shop.create_category("root", None);
        let child = shop.create_category("child", Some(root.id));
        let leaf = shop.create_category("leaf", Some(child.id));
        let ids = [root.id, child.id, leaf.id];

        for (n, step) in steps.into_iter().enumerate() {
            match step {
                Step::Rename { category, slug } => {
                    let id = ids[category];
                    shop.rename_category(id, &format!("{}-{n}", SLUGS[slug]));
                    prop_assert!(!shop.current(&RelatedRef::new(CATEGORY, id)).is_empty());
                }
                Step::DeleteRecord { pick } => {
                    let records = shop.paths.database().store().list_all().unwrap();
                    if !records.is_empty() {
                        let id = records[pick % records.len()].id;
                        shop.paths.delete_record(id).unwrap();
                    }
                }
                Step::Restore { category } => {
                    let entity = shop.category(ids[category]);
                    let owner = RelatedRef::new(CATEGORY, entity.id);
                    let had_records = !shop.paths.path_history(&owner).unwrap().is_empty();
                    shop.paths.on_restore(&entity).unwrap();
                    prop_assert_eq!(had_records, !shop.current(&owner).is_empty());
                }
                Step::Alias { pick } => {
                    let table = shop.paths.database().table().to_string();
                    let roots: Vec<_> = shop
                        .paths
                        .database()
                        .store()
                        .list_all()
                        .unwrap()
                        .into_iter()
                        .filter(|r| !r.is_self_related(&table))
                        .collect();
                    if !roots.is_empty() {
                        let root_id = roots[pick % roots.len()].id;
                        shop.paths.add_alias(root_id, &format!("alias-{pick}")).unwrap();
                    }
                }
            }

            prop_assert!(shop.max_current_per_owner() <= 1);
            let table = shop.paths.database().table().to_string();
            let store = shop.paths.database().store();
            for record in store.list_all().unwrap() {
                if record.is_self_related(&table) {
                    prop_assert!(!record.is_current);
                    prop_assert!(store.find_by_id(record.related_id).unwrap().is_some());
                }
            }
        }
    }

    #[test]
    fn deleting_any_record_keeps_a_current_one(count in 1usize..6, pick in any::<usize>()) {
        let mut shop = Shop::new();
        let entity = shop.create_category("slug-0", None);
        for i in 1..count {
            shop.rename_category(entity.id, &format!("slug-{i}"));
        }
        let owner = RelatedRef::new(CATEGORY, entity.id);
        let history = shop.paths.path_history(&owner).unwrap();
        prop_assert_eq!(history.len(), count);

        let victim = history[pick % history.len()].id;
        shop.paths.delete_record(victim).unwrap();

        let remaining = shop.paths.path_history(&owner).unwrap();
        prop_assert_eq!(remaining.len(), count - 1);
        let current = remaining.iter().filter(|r| r.is_current).count();
        prop_assert_eq!(current, usize::from(!remaining.is_empty()));
    }
}
