use std::fs;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use skipmap::{Geometric, Options, PersistError, SkipList};

mod common;

use common::TempStore;

#[test]
fn test_overwrite_keeps_size() {
    let mut list = SkipList::new();
    for i in 1..=5 {
        list.insert(i, i);
    }
    list.insert(1, 6);

    assert_eq!(list.find(&1).value(), Some(&6));
    assert_eq!(list.size(), 5);
}

#[test]
fn test_erase_then_iterate() {
    let mut list = SkipList::new();
    for i in 1..=8 {
        list.insert(i, i);
    }

    assert!(list.erase(&1));
    assert!(list.find(&1) == list.end());
    assert_eq!(list.keys().copied().collect::<Vec<_>>(), vec![2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(list.size(), 7);
}

#[test]
fn test_reverse_inserts_iterate_sorted() {
    let mut list = SkipList::new();
    for i in [5, 4, 3, 2, 1] {
        list.insert(i, i);
    }
    assert_eq!(list.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_empty_misses() {
    let mut list = SkipList::<i32, i32>::new();
    assert!(!list.erase(&42));
    assert!(list.find(&42).is_end());
    assert_eq!(list.size(), 0);
    assert_eq!(list.top_level(), 0);
}

#[test]
fn test_dump_load_round_trip() {
    let store = TempStore::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1000);

    let mut list = SkipList::with_generator(Geometric::seeded(1));
    while list.len() < 1000 {
        list.insert(rng.gen::<i64>(), rng.gen::<u32>());
    }

    assert_eq!(list.dump(store.path()).unwrap(), 1000);

    let mut loaded = SkipList::<i64, u32>::new();
    assert_eq!(loaded.load(store.path()).unwrap(), 1000);
    assert_eq!(
        list.iter().collect::<Vec<_>>(),
        loaded.iter().collect::<Vec<_>>()
    );
    loaded.check_invariants().unwrap();
}

#[test]
fn test_at_on_absent_key() {
    let mut list = SkipList::<i32, i32>::new();
    list.insert(1, 1);
    let before = list.size();

    let value = list.at(99);
    assert_eq!(*value, 0);
    *value = 7;

    assert_eq!(list.find(&99).value(), Some(&7));
    assert_eq!(list.size(), before + 1);
}

#[test]
fn test_dump_truncates() {
    let store = TempStore::new();

    let big = (0..100).map(|i| (i, i)).collect::<SkipList<i32, i32>>();
    big.dump(store.path()).unwrap();

    let small = (0..2).map(|i| (i, i * 3)).collect::<SkipList<i32, i32>>();
    small.dump(store.path()).unwrap();

    assert_eq!(fs::read_to_string(store.path()).unwrap(), "0 0\n1 3\n");
}

#[test]
fn test_load_missing_file() {
    let store = TempStore::new();
    let mut list = SkipList::<i32, i32>::new();
    list.insert(1, 1);

    let err = list.load(store.path()).unwrap_err();
    assert!(matches!(err, PersistError::Io(_)));
    assert_eq!(list.size(), 1);
}

#[test]
fn test_dump_to_unwritable_path() {
    let store = TempStore::new();
    let list = (0..3).map(|i| (i, i)).collect::<SkipList<i32, i32>>();
    list.dump(store.path()).unwrap();

    // a directory cannot be opened as the store file
    let dir = store.path().parent().unwrap();
    let err = list.dump(dir).unwrap_err();
    assert!(matches!(err, PersistError::Io(_)));
    assert_eq!(list.size(), 3);
}

#[test]
fn test_load_merges_into_existing() {
    let store = TempStore::new();
    let saved = (0..10).map(|i| (i, i)).collect::<SkipList<i32, i32>>();
    saved.dump(store.path()).unwrap();

    let mut list = SkipList::new();
    list.insert(5, 500);
    list.insert(20, 20);
    list.load(store.path()).unwrap();

    assert_eq!(list.size(), 11);
    assert_eq!(list.get(&5), Some(&5));
    assert_eq!(list.get(&20), Some(&20));
}

#[test]
fn test_options_drive_the_list() {
    let store = TempStore::new();
    let yaml = format!("seed: 4\nstore_file: {}\n", store.path().display());
    let options = Options::from_yaml(&yaml).unwrap();

    let mut a = SkipList::from_options(&options);
    let mut b = SkipList::from_options(&options);
    for i in 0..500 {
        a.insert(i, i);
        b.insert(i, i);
    }
    // same seed, same shape
    assert_eq!(a.levels().to_string(), b.levels().to_string());

    a.dump(&options.store_file).unwrap();
    let mut c = SkipList::<i32, i32>::new();
    c.load(&options.store_file).unwrap();
    assert_eq!(a.iter().collect::<Vec<_>>(), c.iter().collect::<Vec<_>>());
}

#[test]
fn test_string_values() {
    let store = TempStore::new();
    let mut list = SkipList::new();
    list.insert("banana".to_string(), "yellow".to_string());
    list.insert("apple".to_string(), "red".to_string());
    list.dump(store.path()).unwrap();

    assert_eq!(
        fs::read_to_string(store.path()).unwrap(),
        "apple red\nbanana yellow\n"
    );

    let mut loaded = SkipList::<String, String>::new();
    loaded.load(store.path()).unwrap();
    assert_eq!(loaded.get(&"apple".to_string()), Some(&"red".to_string()));
}
