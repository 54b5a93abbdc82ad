// File: crates/figkit-core/tests/panels.rs
// Purpose: Container indexing, iteration and pairing through the public API.

use figkit_core::{subplots, Ix, PanelArray2, Selection, SubplotOptions};

fn grid(rows: usize, cols: usize) -> PanelArray2 {
    let (fig, panels) = subplots(&SubplotOptions::new(rows, cols)).unwrap();
    // Handles stay valid after the figure is dropped; drawing still shares state.
    drop(fig);
    panels.into_array2().unwrap()
}

#[test]
fn two_containers_pair_elementwise() {
    let a = grid(2, 2);
    let b = grid(2, 2);
    for (i, p) in a.iter().enumerate() {
        p.set_title(format!("a{i}"));
    }
    for (i, p) in b.iter().enumerate() {
        p.set_title(format!("b{i}"));
    }
    let pairs: Vec<(String, String)> = a.iter().zip(&b).map(|(x, y)| (x.title(), y.title())).collect();
    assert_eq!(pairs.len(), 4);
    for (i, (x, y)) in pairs.iter().enumerate() {
        assert_eq!(x, &format!("a{i}"));
        assert_eq!(y, &format!("b{i}"));
    }
}

#[test]
fn iteration_is_restartable() {
    let a = grid(2, 3);
    let first: Vec<String> = (&a).into_iter().map(|p| format!("{p:?}")).collect();
    let second: Vec<String> = (&a).into_iter().map(|p| format!("{p:?}")).collect();
    assert_eq!(first.len(), 6);
    assert_eq!(first, second);
}

#[test]
fn negative_indices_and_slices() {
    let a = grid(3, 4);
    assert!(a.get(-1, -1).unwrap().same_as(&a[(2, 3)]));
    assert!(a.get(3, 0).is_err());

    let Selection::Array2(sub) = a.select(1.., Ix::all().step(2)).unwrap() else {
        panic!("expected a 2-D selection");
    };
    assert_eq!(sub.shape(), [2, 2]);
    assert!(sub[(0, 0)].same_as(&a[(1, 0)]));
    assert!(sub[(1, 1)].same_as(&a[(2, 2)]));

    let Selection::Array1(row) = a.select(-2, ..).unwrap() else {
        panic!("expected a 1-D selection");
    };
    assert_eq!(row.len(), 4);
    assert!(row.get(-1).unwrap().same_as(&a[(1, 3)]));
}

#[test]
fn delegates_to_dense_slice() {
    let a = grid(2, 2);
    assert_eq!(a.len(), 4);
    assert_eq!(a.ndim(), 2);
    assert_eq!(a.size(), 4);
    assert!(a.first().unwrap().same_as(&a[(0, 0)]));
    assert!(a.last().unwrap().same_as(&a[(1, 1)]));
    assert_eq!(a.chunks(2).count(), 2);
}

#[test]
fn selections_are_views_not_copies() {
    let a = grid(2, 2);
    let col = a.col(1).unwrap();
    col[0].set_xlabel("shared");
    col[0].plot(&[0.0, 1.0], &[1.0, 2.0]).unwrap();
    assert_eq!(a[(0, 1)].mark_count(), 1);
    assert_eq!(a[(0, 1)].state().x_axis.label, "shared");
}
