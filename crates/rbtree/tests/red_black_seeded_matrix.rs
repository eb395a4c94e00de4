use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use rbtree::{NodeRef, RbTree};

const SEEDS: [u64; 5] = [
    0x5eed_c0de,
    0x0000_0000_0000_0001,
    0x0000_0000_0000_00ff,
    0x0000_0000_00c0_ffee,
    0x0123_4567_89ab_cdef,
];

/// Sorted `Vec` used as the reference model.
fn model_insert(model: &mut Vec<u16>, key: u16) {
    let at = model.partition_point(|&k| k <= key);
    model.insert(at, key);
}

fn model_remove(model: &mut Vec<u16>, key: u16) -> bool {
    match model.binary_search(&key) {
        Ok(at) => {
            model.remove(at);
            true
        }
        Err(_) => false,
    }
}

#[test]
fn rb_seeded_insert_remove_against_model() {
    for seed in SEEDS {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let mut tree = RbTree::new();
        let mut model = Vec::new();

        for step in 0..4000 {
            let key: u16 = rng.gen_range(0..512);
            if rng.gen_bool(0.55) {
                tree.insert(key).unwrap();
                model_insert(&mut model, key);
            } else {
                let removed = tree.remove(&key);
                assert_eq!(
                    removed.is_some(),
                    model_remove(&mut model, key),
                    "remove({key}) disagrees with model (seed={seed:#x}, step={step})"
                );
            }

            if let Err(err) = tree.assert_valid() {
                panic!("seed={seed:#x} step={step}: {err}");
            }
            assert_eq!(tree.len(), model.len(), "seed={seed:#x} step={step}");
        }

        assert_eq!(tree.to_sorted_sequence(usize::MAX), model, "seed={seed:#x}");
        assert_eq!(
            tree.min().and_then(|n| tree.key(n)),
            model.first(),
            "seed={seed:#x}"
        );
        assert_eq!(tree.max().and_then(|n| tree.key(n)), model.last(), "seed={seed:#x}");
    }
}

#[test]
fn rb_seeded_erase_by_handle_drains_tree() {
    for seed in SEEDS {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let mut tree = RbTree::new();
        let mut handles: Vec<(NodeRef, u32)> = Vec::new();

        for _ in 0..2000 {
            let key: u32 = rng.gen();
            handles.push((tree.insert(key).unwrap(), key));
        }
        tree.assert_valid().unwrap();

        while !handles.is_empty() {
            let at = rng.gen_range(0..handles.len());
            let (node, key) = handles.swap_remove(at);
            assert_eq!(tree.erase(node), Ok(key), "seed={seed:#x}");
            if let Err(err) = tree.assert_valid() {
                panic!("seed={seed:#x} remaining={}: {err}", handles.len());
            }
        }

        assert!(tree.is_empty());
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
    }
}

#[test]
fn rb_seeded_height_stays_logarithmic() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(SEEDS[0]);
    let mut tree = RbTree::new();
    for _ in 0..10_000 {
        tree.insert(rng.gen::<i64>()).unwrap();
    }

    fn height(tree: &RbTree<i64>, node: Option<NodeRef>) -> usize {
        match node {
            None => 0,
            Some(n) => 1 + height(tree, tree.left(n)).max(height(tree, tree.right(n))),
        }
    }

    // h <= 2 * log2(n + 1)
    let bound = 2.0 * ((tree.len() + 1) as f64).log2();
    assert!((height(&tree, tree.root()) as f64) <= bound);
}
