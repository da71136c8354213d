//! Property-based tests for sibling ordering
//!
//! Random sequences of inserts, moves and deletes over two parents are run
//! against a plain `Vec` model. After every step each parent's positions must
//! be exactly `0..N` and the order must match the model.

use proptest::prelude::*;
use std::collections::HashMap;
use uuid::Uuid;

use boardwalk::backend::ordering::{
    move_child, plan_delete, plan_insert, plan_move, remove_child, reserve_slot, OrderingError,
    Placement, Scope, Shift, SiblingKind,
};
use boardwalk::backend::store::{MemoryStore, NewBoard, NewUser, Store, StoreTx};

const KIND: SiblingKind = SiblingKind::List;

#[derive(Debug, Clone)]
enum Op {
    Insert { parent: usize, position: Option<i32> },
    Move { child: usize, parent: usize, position: i32 },
    Delete { child: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..2usize, prop::option::of(-1..8i32))
            .prop_map(|(parent, position)| Op::Insert { parent, position }),
        (0..16usize, 0..2usize, -1..8i32)
            .prop_map(|(child, parent, position)| Op::Move { child, parent, position }),
        (0..16usize).prop_map(|child| Op::Delete { child }),
    ]
}

/// Reference ordering: child ids per parent, in order
#[derive(Debug, Default)]
struct Model {
    children: [Vec<Uuid>; 2],
}

impl Model {
    fn locate(&self, id: Uuid) -> Option<(usize, usize)> {
        self.children.iter().enumerate().find_map(|(p, ids)| {
            ids.iter().position(|c| *c == id).map(|i| (p, i))
        })
    }

    fn all(&self) -> Vec<Uuid> {
        self.children.iter().flatten().copied().collect()
    }

    /// Applies the op if it is in range; returns whether it was applied.
    fn apply(&mut self, op: &Op, new_id: Uuid) -> bool {
        match *op {
            Op::Insert { parent, position } => {
                let len = self.children[parent].len();
                match position {
                    None => self.children[parent].push(new_id),
                    Some(p) if p >= 0 && (p as usize) <= len => {
                        self.children[parent].insert(p as usize, new_id)
                    }
                    Some(_) => return false,
                }
                true
            }
            Op::Move { child, parent, position } => {
                let Some(id) = self.all().get(child).copied() else {
                    return false;
                };
                let (from, index) = self.locate(id).expect("child in model");
                let max = if from == parent {
                    self.children[parent].len() - 1
                } else {
                    self.children[parent].len()
                };
                if position < 0 || position as usize > max {
                    return false;
                }
                self.children[from].remove(index);
                self.children[parent].insert(position as usize, id);
                true
            }
            Op::Delete { child } => {
                let Some(id) = self.all().get(child).copied() else {
                    return false;
                };
                let (from, index) = self.locate(id).expect("child in model");
                self.children[from].remove(index);
                true
            }
        }
    }
}

fn apply_shift(placements: &mut HashMap<Uuid, Placement>, shift: &Shift, skip: Option<Uuid>) {
    for (id, placement) in placements.iter_mut() {
        if Some(*id) != skip && shift.applies_to(placement.parent, placement.position) {
            placement.position += shift.delta;
        }
    }
}

fn ordered(placements: &HashMap<Uuid, Placement>, parent: Uuid) -> Vec<(Uuid, i32)> {
    let mut children: Vec<(Uuid, i32)> = placements
        .iter()
        .filter(|(_, p)| p.parent == parent)
        .map(|(id, p)| (*id, p.position))
        .collect();
    children.sort_by_key(|(_, position)| *position);
    children
}

fn assert_matches_model(placements: &[Vec<(Uuid, i32)>; 2], model: &Model) {
    for (parent, children) in placements.iter().enumerate() {
        let positions: Vec<i32> = children.iter().map(|(_, p)| *p).collect();
        let dense: Vec<i32> = (0..children.len() as i32).collect();
        assert_eq!(positions, dense, "parent {} is not dense", parent);

        let ids: Vec<Uuid> = children.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, model.children[parent], "parent {} order differs", parent);
    }
}

proptest! {
    #[test]
    fn prop_plans_keep_positions_dense(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let parents = [Uuid::from_u128(1), Uuid::from_u128(2)];
        let mut placements: HashMap<Uuid, Placement> = HashMap::new();
        let mut model = Model::default();

        for op in &ops {
            let new_id = Uuid::new_v4();
            let accepted = model.apply(op, new_id);

            let planned = match *op {
                Op::Insert { parent, position } => {
                    let scope = Scope::new(KIND, parents[parent]);
                    let count = ordered(&placements, parents[parent]).len() as i64;
                    plan_insert(scope, count, position).map(|plan| {
                        if let Some(shift) = plan.shift {
                            apply_shift(&mut placements, &shift, None);
                        }
                        placements.insert(new_id, Placement { parent: parents[parent], position: plan.position });
                    })
                }
                Op::Move { child, parent, position } => {
                    let mut ids: Vec<Uuid> = ordered(&placements, parents[0])
                        .into_iter()
                        .chain(ordered(&placements, parents[1]))
                        .map(|(id, _)| id)
                        .collect();
                    if child >= ids.len() {
                        continue;
                    }
                    let id = ids.swap_remove(child);
                    let current = placements[&id];
                    let source_count = ordered(&placements, current.parent).len() as i64;
                    let dest_count = ordered(&placements, parents[parent]).len() as i64;
                    plan_move(KIND, current, parents[parent], position, source_count, dest_count).map(|plan| {
                        for shift in &plan.shifts {
                            apply_shift(&mut placements, shift, Some(id));
                        }
                        placements.insert(id, plan.target);
                    })
                }
                Op::Delete { child } => {
                    let ids: Vec<Uuid> = ordered(&placements, parents[0])
                        .into_iter()
                        .chain(ordered(&placements, parents[1]))
                        .map(|(id, _)| id)
                        .collect();
                    let Some(id) = ids.get(child).copied() else {
                        continue;
                    };
                    let removed = placements.remove(&id).expect("placement");
                    apply_shift(&mut placements, &plan_delete(KIND, removed), None);
                    Ok(())
                }
            };

            match planned {
                Ok(()) => prop_assert!(accepted, "planner accepted {:?}", op),
                Err(OrderingError::OutOfRange { .. }) => prop_assert!(!accepted, "planner rejected {:?}", op),
                Err(other) => prop_assert!(false, "unexpected error {:?}", other),
            }

            let snapshot = [ordered(&placements, parents[0]), ordered(&placements, parents[1])];
            assert_matches_model(&snapshot, &model);
        }
    }
}

async fn run_against_store(ops: Vec<Op>) {
    let store = MemoryStore::new();
    let owner = store
        .insert_user(NewUser {
            name: "Prop".into(),
            email: "prop@example.com".into(),
            password_hash: "x".into(),
        })
        .await
        .unwrap();
    let mut parents = [Uuid::nil(); 2];
    for (i, parent) in parents.iter_mut().enumerate() {
        *parent = store
            .insert_board(NewBoard {
                owner_id: owner.id,
                title: format!("board {}", i),
                description: None,
            })
            .await
            .unwrap()
            .id;
    }
    let mut model = Model::default();

    for op in &ops {
        let all = model.all();
        let mut tx = store.begin().await.unwrap();
        let (result, new_id) = match *op {
            Op::Insert { parent, position } => {
                let scope = Scope::new(KIND, parents[parent]);
                match reserve_slot(tx.as_mut(), scope, position).await {
                    Ok(slot) => {
                        let list = tx.insert_list(parents[parent], "l", slot).await.unwrap();
                        (Ok(()), list.id)
                    }
                    Err(e) => (Err(e), Uuid::nil()),
                }
            }
            Op::Move { child, parent, position } => {
                let Some(id) = all.get(child).copied() else {
                    continue;
                };
                let moved = move_child(tx.as_mut(), KIND, id, Some(parents[parent]), position).await;
                (moved.map(|_| ()), Uuid::nil())
            }
            Op::Delete { child } => {
                let Some(id) = all.get(child).copied() else {
                    continue;
                };
                (remove_child(tx.as_mut(), KIND, id).await.map(|_| ()), Uuid::nil())
            }
        };

        let accepted = model.apply(op, new_id);
        match result {
            Ok(()) => {
                assert!(accepted, "store accepted {:?}", op);
                tx.commit().await.unwrap();
            }
            Err(OrderingError::OutOfRange { .. }) => {
                assert!(!accepted, "store rejected {:?}", op);
                drop(tx);
            }
            Err(other) => panic!("unexpected error {:?}", other),
        }

        let snapshot = [
            store.positions(Scope::new(KIND, parents[0])).await.unwrap(),
            store.positions(Scope::new(KIND, parents[1])).await.unwrap(),
        ];
        assert_matches_model(&snapshot, &model);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_memory_store_matches_model(ops in prop::collection::vec(op_strategy(), 1..30)) {
        tokio_test::block_on(run_against_store(ops));
    }
}
