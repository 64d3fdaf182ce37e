use pretty_assertions::assert_eq;
use test_log::test;

use super::OrderedHashMap;

#[test]
fn test_iteration_follows_insertion_order() {
    let mut map = OrderedHashMap::<&str, usize>::default();
    map.insert("%handle", 2);
    map.insert("%root", 0);
    map.insert("%tiled", 1);
    map.insert("%root", 3);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["%handle", "%root", "%tiled"]);
    assert_eq!(map.get("%root"), Some(&3));
}

#[test]
fn test_eq_respects_order() {
    let a: OrderedHashMap<usize, usize> = [(1, 10), (2, 20)].into_iter().collect();
    let b: OrderedHashMap<usize, usize> = [(2, 20), (1, 10)].into_iter().collect();
    assert!(a != b);
    assert_eq!(a, [(1, 10), (2, 20)].into_iter().collect());
}
