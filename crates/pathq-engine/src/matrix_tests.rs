use crate::matrix::{BoolMatrix, dimension};

fn entries(matrix: &BoolMatrix) -> Vec<(u32, u32)> {
    matrix.iter().collect()
}

#[test]
fn set_get_and_count() {
    let mut m = BoolMatrix::zeros(3, 4);
    assert!(m.is_zero());
    assert!(m.set(0, 3));
    assert!(!m.set(0, 3));
    m.set(2, 1);
    assert!(m.get(0, 3));
    assert!(!m.get(1, 1));
    assert!(!m.get(9, 0));
    assert_eq!(m.nnz(), 2);
    assert_eq!(entries(&m), [(0, 3), (2, 1)]);
}

#[test]
fn boolean_product_never_counts() {
    // Two distinct paths 0 -> 1 -> 2 and 0 -> 3 -> 2 still give one entry.
    let a: BoolMatrix = [(0, 1), (0, 3)].into_iter().collect();
    let mut b = BoolMatrix::zeros(4, 3);
    b.set(1, 2);
    b.set(3, 2);
    let product = a.mul(&b);
    assert_eq!(entries(&product), [(0, 2)]);
    assert_eq!(product.nrows(), 1);
    assert_eq!(product.ncols(), 3);
}

#[test]
fn identity_is_neutral() {
    let m: BoolMatrix = [(0, 1), (1, 2), (2, 0)].into_iter().collect();
    assert_eq!(m.mul(&BoolMatrix::identity(3)), m);
    assert_eq!(BoolMatrix::identity(3).mul(&m), m);
}

#[test]
fn kronecker_layout() {
    let a: BoolMatrix = [(0, 1)].into_iter().collect(); // 1x2
    let mut b = BoolMatrix::zeros(2, 2);
    b.set(0, 0);
    b.set(1, 1);
    let k = a.kron(&b);
    assert_eq!((k.nrows(), k.ncols()), (2, 4));
    assert_eq!(entries(&k), [(0, 2), (1, 3)]);
}

#[test]
fn or_and_difference() {
    let mut a: BoolMatrix = [(0, 0), (1, 1)].into_iter().collect();
    let b: BoolMatrix = [(0, 1), (1, 1)].into_iter().collect();
    assert_eq!(entries(&a.difference(&b)), [(0, 0)]);
    a.or_assign(&b);
    assert_eq!(entries(&a), [(0, 0), (0, 1), (1, 1)]);
}

#[test]
fn dimension_guards_index_space() {
    assert_eq!(dimension(7).unwrap(), 7);
    assert!(dimension(u32::MAX as usize + 1).is_err());
}
