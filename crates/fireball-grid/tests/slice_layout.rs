use fireball_grid::{GridArena, Lattice};

#[test]
fn slice_views_cover_every_cell_once() {
    let lattice = Lattice::new(5, 3, 7, 0.2, 0.2, 0.1).unwrap();
    let mut arena = GridArena::new(lattice);

    for mut slice in arena.current.slices_mut() {
        for iy in 0..slice.ny() {
            for ix in 0..slice.nx() {
                slice.at_mut(ix, iy).epsilon += 1.0;
            }
        }
    }

    assert!(arena.current.cells().iter().all(|c| c.epsilon == 1.0));
    assert!(arena.previous.cells().iter().all(|c| c.epsilon == 0.0));
}

#[test]
fn storage_order_is_x_fastest_then_y_then_eta() {
    let lattice = Lattice::new(4, 3, 2, 0.5, 0.5, 0.5).unwrap();
    let mut arena = GridArena::new(lattice);
    for ieta in 0..2 {
        for iy in 0..3 {
            for ix in 0..4 {
                arena.current[(ix, iy, ieta)].epsilon = lattice.flat_index(ix, iy, ieta) as f64;
            }
        }
    }
    for (i, cell) in arena.current.cells().iter().enumerate() {
        assert_eq!(cell.epsilon, i as f64);
    }
    assert_eq!(lattice.flat_index(1, 2, 1), 1 + 4 * (2 + 3));
}

#[test]
fn coordinates_are_symmetric_about_the_origin() {
    let lattice = Lattice::new(11, 9, 21, 0.3, 0.25, 0.1).unwrap();
    for ix in 0..lattice.nx {
        let mirror = lattice.nx - 1 - ix;
        assert!((lattice.x(ix) + lattice.x(mirror)).abs() < 1e-12);
    }
    assert!(lattice.eta(10).abs() < 1e-12);
    assert!((lattice.y(0) + lattice.y_size / 2.0).abs() < 1e-12);
}
