//! Tests for observation stores and data subsets:
//! construction, alignment, indexed access, extraction, random sampling,
//! shuffling, and iteration.

use approx::assert_relative_eq;
use ndarray::{array, Array1, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use stograd::data::ObservationStore;
use stograd::{DataSubset, OptError};

fn example_sources() -> (Array2<f64>, Array1<f64>) {
    // 2 features x 4 observations; observations are columns.
    let x = array![[1.0, 2.0, 3.0, 4.0], [10.0, 20.0, 30.0, 40.0]];
    let y = array![0.1, 0.2, 0.3, 0.4];
    (x, y)
}

#[test]
fn store_counts_along_observation_axis() {
    let (x, y) = example_sources();
    assert_eq!(x.n_obs(), 4);
    assert_eq!(y.n_obs(), 4);
}

#[test]
fn store_obs_drops_the_observation_axis() {
    let (x, y) = example_sources();
    assert_eq!(x.obs(2), array![3.0, 30.0]);
    assert_relative_eq!(y.obs(2), 0.3);
}

#[test]
fn store_try_obs_rejects_out_of_range() {
    let (_, y) = example_sources();
    assert!(matches!(
        y.try_obs(4),
        Err(OptError::OutOfRange { index: 4, len: 4 })
    ));
}

#[test]
fn store_slice_preserves_container_kind() {
    let (x, _) = example_sources();
    let block = x.slice_obs(1, 3).unwrap();
    assert_eq!(block, array![[2.0, 3.0], [20.0, 30.0]]);
}

#[test]
fn store_slice_blames_the_offending_bound() {
    let (x, _) = example_sources();
    // End past the store.
    assert!(matches!(
        x.slice_obs(1, 5),
        Err(OptError::OutOfRange { index: 5, len: 4 })
    ));
    // Inverted range: start is the bad value, even though it is a valid
    // observation index on its own.
    assert!(matches!(
        x.slice_obs(3, 2),
        Err(OptError::OutOfRange { index: 3, len: 2 })
    ));
}

#[test]
fn full_range_subset_has_source_length() {
    let (x, y) = example_sources();
    let sub = DataSubset::new((x, y)).unwrap();
    assert_eq!(sub.len(), 4);
}

#[test]
fn at_matches_each_sources_observation() {
    let (x, y) = example_sources();
    let sub = DataSubset::new((x.clone(), y.clone())).unwrap();
    for i in 0..sub.len() {
        let (xc, yv) = sub.get(i).unwrap();
        assert_eq!(xc, x.column(i).to_owned());
        assert_relative_eq!(yv, y[i]);
    }
}

#[test]
fn example_scenario_two_by_four() {
    // X = 2x4 matrix, y = length-4 vector: length 4, position 1 pairs
    // column 1 with element 1, iteration yields 4 tuples in index order.
    let (x, y) = example_sources();
    let sub = DataSubset::new((x, y)).unwrap();
    assert_eq!(sub.len(), 4);

    let (xc, yv) = sub.get(1).unwrap();
    assert_eq!(xc, array![2.0, 20.0]);
    assert_relative_eq!(yv, 0.2);

    let walked: Vec<f64> = sub.iter().map(|(_, yv)| yv).collect();
    assert_eq!(walked, vec![0.1, 0.2, 0.3, 0.4]);
}

#[test]
fn get_rejects_out_of_range_position() {
    let (x, y) = example_sources();
    let sub = DataSubset::new((x, y)).unwrap();
    assert!(matches!(
        sub.get(4),
        Err(OptError::OutOfRange { index: 4, len: 4 })
    ));
}

#[test]
fn mismatched_sources_fail_for_every_size_pair() {
    for (nx, ny) in [(3usize, 4usize), (4, 3), (0, 1), (5, 2)] {
        let x: Array2<f64> = Array2::zeros((2, nx));
        let y: Array1<f64> = Array1::zeros(ny);
        let err = DataSubset::new((x, y)).unwrap_err();
        assert!(
            matches!(err, OptError::SizeMismatch { expected, got } if expected == nx && got == ny)
        );
    }
}

#[test]
fn extract_materializes_leading_slice() {
    let (x, y) = example_sources();
    let sub = DataSubset::with_indices((x.clone(), y.clone()), vec![0, 1, 2]).unwrap();
    let (xb, yb) = sub.extract();
    assert_eq!(xb, array![[1.0, 2.0, 3.0], [10.0, 20.0, 30.0]]);
    assert_eq!(yb, array![0.1, 0.2, 0.3]);
}

#[test]
fn shuffled_preserves_index_multiset_and_length() {
    let (x, y) = example_sources();
    let sub = DataSubset::new((x, y)).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let shuffled = sub.shuffled(&mut rng);

    assert_eq!(shuffled.len(), sub.len());
    let mut original = sub.indices().to_vec();
    let mut permuted = shuffled.indices().to_vec();
    original.sort_unstable();
    permuted.sort_unstable();
    assert_eq!(original, permuted);
    // The original's order is untouched.
    assert_eq!(sub.indices(), &[0, 1, 2, 3]);
}

#[test]
fn random_batch_members_come_from_the_view() {
    let (x, y) = example_sources();
    let sub = DataSubset::with_indices((x, y), vec![1, 3]).unwrap();
    let mut rng = StdRng::seed_from_u64(11);

    let (xb, yb) = sub.rand_batch(&mut rng, 6).unwrap();
    assert_eq!(xb.ncols(), 6);
    assert_eq!(yb.len(), 6);
    for v in yb.iter() {
        assert!(*v == 0.2 || *v == 0.4, "unexpected member {v}");
    }
    for col in xb.columns() {
        assert!(col[0] == 2.0 || col[0] == 4.0);
    }
}

#[test]
fn rand_obs_draws_from_the_view() {
    let (x, y) = example_sources();
    let sub = DataSubset::with_indices((x, y), vec![0]).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let (xc, yv) = sub.rand_obs(&mut rng).unwrap();
    assert_eq!(xc, array![1.0, 10.0]);
    assert_relative_eq!(yv, 0.1);
}

#[test]
fn infinite_batches_never_run_dry() {
    let (x, y) = example_sources();
    let sub = DataSubset::new((x, y)).unwrap();
    let rng = StdRng::seed_from_u64(9);
    let n = sub.repeat_batches(rng, 2).take(100).count();
    assert_eq!(n, 100);
}

#[test]
fn three_source_subsets_align_positionally() {
    let a = array![1.0, 2.0];
    let b = array![[5.0, 6.0], [7.0, 8.0]];
    let c = vec![true, false];
    let sub = DataSubset::new((a, b, c)).unwrap();
    let (av, bc, cv) = sub.get(1).unwrap();
    assert_relative_eq!(av, 2.0);
    assert_eq!(bc, array![6.0, 8.0]);
    assert!(!cv);
}
