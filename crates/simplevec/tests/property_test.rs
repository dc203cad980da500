//! Property-based tests for SimpleVector.
//!
//! Random operation sequences are replayed against both a `SimpleVector` and
//! a `Vec` model; after every step the contents must agree and the capacity
//! must follow the doubling rule.
//!
//! Run with: `cargo test --test property_test`

mod common;

use common::{DropCounter, Probe};
use proptest::prelude::*;
use simplevec::{Error, SimpleVector};

#[derive(Debug, Clone)]
enum Op {
    Push(i32),
    Insert(usize, i32),
    Erase(usize),
    PopBack,
    Clear,
    Resize(usize),
    Reserve(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::Push),
        3 => (any::<usize>(), any::<i32>()).prop_map(|(i, x)| Op::Insert(i, x)),
        2 => any::<usize>().prop_map(Op::Erase),
        1 => Just(Op::PopBack),
        1 => Just(Op::Clear),
        1 => (0usize..48).prop_map(Op::Resize),
        1 => (0usize..64).prop_map(Op::Reserve),
    ]
}

/// Capacity after one slot-consuming insertion into a sequence that is full.
fn doubled(capacity: usize) -> usize {
    if capacity == 0 { 1 } else { capacity * 2 }
}

/// Applies `op` to both containers, tracking the capacity the sequence should
/// end up with.
fn apply(v: &mut SimpleVector<i32>, model: &mut Vec<i32>, capacity: &mut usize, op: &Op) {
    match *op {
        Op::Push(x) => {
            if model.len() == *capacity {
                *capacity = doubled(*capacity);
            }
            v.push(x);
            model.push(x);
        }
        Op::Insert(i, x) => {
            let index = i % (model.len() + 1);
            if model.len() == *capacity {
                *capacity = doubled(*capacity);
            }
            assert_eq!(v.insert(index, x), index);
            model.insert(index, x);
        }
        Op::Erase(i) => {
            if !model.is_empty() {
                let index = i % model.len();
                assert_eq!(v.erase(index), index);
                model.remove(index);
            }
        }
        Op::PopBack => {
            v.pop_back();
            model.pop();
        }
        Op::Clear => {
            v.clear();
            model.clear();
        }
        Op::Resize(n) => {
            *capacity = (*capacity).max(n);
            v.resize(n);
            model.resize(n, 0);
        }
        Op::Reserve(n) => {
            *capacity = (*capacity).max(n);
            v.reserve(n);
        }
    }
}

proptest! {
    #[test]
    fn test_matches_vec_model(ops in prop::collection::vec(arb_op(), 0..128)) {
        let mut v = SimpleVector::new();
        let mut model = Vec::new();
        let mut capacity = 0;

        for op in &ops {
            apply(&mut v, &mut model, &mut capacity, op);
            prop_assert_eq!(v.as_slice(), model.as_slice(), "after {:?}", op);
            prop_assert_eq!(v.capacity(), capacity, "after {:?}", op);
            prop_assert!(v.len() <= v.capacity());
        }
    }

    #[test]
    fn test_at_agrees_with_bounds(
        items in prop::collection::vec(any::<i16>(), 0..32),
        probe in 0usize..64,
    ) {
        let v: SimpleVector<i16> = items.iter().copied().collect();
        match v.at(probe) {
            Ok(value) => prop_assert_eq!(Some(value), items.get(probe)),
            Err(err) => {
                prop_assert!(probe >= items.len());
                prop_assert_eq!(err, Error::OutOfRange { index: probe, len: items.len() });
            }
        }
    }

    #[test]
    fn test_insert_then_erase_is_identity(
        items in prop::collection::vec(any::<u8>(), 0..32),
        pos in any::<usize>(),
        value in any::<u8>(),
    ) {
        let original: SimpleVector<u8> = SimpleVector::from(items.as_slice());
        let mut v = original.clone();
        let index = pos % (items.len() + 1);

        let at = v.insert(index, value);
        prop_assert_eq!(v[at], value);
        v.erase(at);
        prop_assert_eq!(v, original);
    }

    #[test]
    fn test_clone_is_exact_and_independent(items in prop::collection::vec(any::<u32>(), 0..32)) {
        let mut source: SimpleVector<u32> = SimpleVector::new();
        source.extend(items.iter().copied());
        let copy = source.clone();

        prop_assert_eq!(copy.capacity(), copy.len());
        prop_assert_eq!(&copy, &source);

        source.push(7);
        prop_assert_eq!(copy.as_slice(), items.as_slice());
    }

    #[test]
    fn test_values_dropped_once(ops in prop::collection::vec(arb_op(), 0..64)) {
        let counter = DropCounter::new();
        let mut pushed = 0;
        {
            let mut v: SimpleVector<Probe> = SimpleVector::new();
            for op in &ops {
                match *op {
                    Op::Push(_) | Op::Insert(..) => {
                        let probe = counter.probe(pushed);
                        pushed += 1;
                        match *op {
                            Op::Insert(i, _) => {
                                let index = i % (v.len() + 1);
                                v.insert(index, probe);
                            }
                            _ => v.push(probe),
                        }
                    }
                    Op::Erase(i) if !v.is_empty() => {
                        let index = i % v.len();
                        v.erase(index);
                    }
                    Op::PopBack => v.pop_back(),
                    Op::Clear => v.clear(),
                    Op::Resize(n) => v.resize(n),
                    Op::Reserve(n) => v.reserve(n),
                    Op::Erase(_) => {}
                }
            }
        }
        prop_assert_eq!(counter.drops(), pushed as usize);
    }
}
