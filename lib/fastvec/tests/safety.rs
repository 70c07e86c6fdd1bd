use fastvec::{FastVec, FastView};

/// Shrinking and regrowing past the original capacity must not crash and must report the new
/// length; the regrown contents are unspecified.
#[test]
fn resize_not_preserving_regrow() {
    let mut v = FastVec::<u32>::with_len(4);
    v.resize_not_preserving(10);
    v.resize_not_preserving(3);
    v.resize_not_preserving(10);
    assert_eq!(v.len(), 10);
    v.resize_not_preserving(50);
    assert_eq!(v.len(), 50);
    // every slot is writable after growth
    v.fill(1);
    assert_eq!(v.iter().sum::<u32>(), 50);
}

/// Test safety of capacity reservation functions
#[test]
fn reserve() {
    let mut v = FastVec::<u64>::new();
    v.reserve(0);
    assert_eq!(v.capacity(), 0);
    v.reserve(16);
    assert!(v.capacity() >= 16);
    assert!(v.is_empty());
    v.push(3);
    v.reserve(1);
    assert_eq!(v.as_slice(), &[3]);
}

#[test]
fn view_aliases_owner() {
    let owner: FastVec<u16> = vec![5, 6, 7].into();
    let view = owner.view();
    assert_eq!(view.as_slice().as_ptr(), owner.as_ptr());
    assert_eq!(&*view, &[5, 6, 7]);

    let copied = view.to_owned_vec();
    assert_eq!(copied, owner);
    assert_ne!(copied.as_ptr(), owner.as_ptr());
}

#[test]
fn view_over_foreign_memory() {
    let words = [1u32, 2, 3, 4];
    let view = FastView::from_slice(&words[1..]);
    assert_eq!(view.len(), 3);
    assert_eq!(view.iter().copied().max(), Some(4));
    assert!(FastView::<u32>::default().is_empty());
}
