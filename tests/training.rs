use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use trinet::data::linearly_separable;
use trinet::{train_epoch, Matrix, Network, Parameters, Sgd, TrainConfig, train_loop};

fn hand_seeded_parameters() -> Parameters {
    Parameters {
        w1: Matrix::from_fn(10, 2, |i, j| 0.01 * (i + 1) as f64 + 0.005 * j as f64),
        b1: Matrix::ones(10, 1),
        w2: Matrix::from_fn(5, 10, |i, j| 0.02 - 0.001 * i as f64 + 0.0005 * j as f64),
        b2: Matrix::ones(5, 1),
        w3: Matrix::from_fn(1, 5, |_, j| 0.01 * (j + 1) as f64),
        b3: Matrix::ones(1, 1),
    }
}

#[test]
fn single_step_matches_hand_computed_values() {
    let mut net = Network::from_parameters(hand_seeded_parameters(), 0.1).unwrap();
    let x = Matrix::column(&[1.0, 2.0]);

    let y_hat = net.forward_prop(&x).unwrap();
    assert_abs_diff_eq!(y_hat, 0.75285919103495846, epsilon = 1e-9);
    assert_abs_diff_eq!(Network::cross_entropy_loss(y_hat, 1.0), 0.28387706596594997, epsilon = 1e-9);

    let grads = net.compute_gradients(y_hat, 1.0).unwrap().clone();
    let dw3 = [
        -0.18861075838267533,
        -0.18826894250016146,
        -0.18792575712727874,
        -0.18758120408507312,
        -0.18723528528921679,
    ];
    for (j, expected) in dw3.iter().enumerate() {
        assert_abs_diff_eq!(grads.dw3[(0, j)], *expected, epsilon = 1e-9);
    }
    assert_abs_diff_eq!(grads.db3[(0, 0)], -0.24714080896504154, epsilon = 1e-9);

    let db2 = [
        -0.00044668451457881156,
        -0.00089695781840072424,
        -0.001350812943019464,
        -0.0018082424258465558,
        -0.0022692383064566155,
    ];
    for (i, expected) in db2.iter().enumerate() {
        assert_abs_diff_eq!(grads.db2[(i, 0)], *expected, epsilon = 1e-9);
    }
    assert_abs_diff_eq!(grads.dw2[(0, 0)], -0.00033003285631429466, epsilon = 1e-9);
    assert_abs_diff_eq!(grads.dw2[(4, 9)], -0.0017870550201556739, epsilon = 1e-9);
    assert_abs_diff_eq!(grads.db1[(0, 0)], -2.2640534232908013e-05, epsilon = 1e-9);
    assert_abs_diff_eq!(grads.db1[(9, 0)], -2.4734324318137966e-05, epsilon = 1e-9);
    assert_abs_diff_eq!(grads.dw1[(0, 1)], -4.5281068465816027e-05, epsilon = 1e-9);
    assert_abs_diff_eq!(grads.dw1[(9, 0)], -2.4734324318137966e-05, epsilon = 1e-9);

    net.update().unwrap();
    let p = net.parameters();
    let w3 = [
        0.028861075838267532,
        0.038826894250016147,
        0.048792575712727874,
        0.058758120408507315,
        0.06872352852892169,
    ];
    for (j, expected) in w3.iter().enumerate() {
        assert_abs_diff_eq!(p.w3[(0, j)], *expected, epsilon = 1e-9);
    }
    assert_abs_diff_eq!(p.b3[(0, 0)], 1.0247140808965041, epsilon = 1e-9);
    assert_abs_diff_eq!(p.w1[(9, 1)], 0.10500494686486364, epsilon = 1e-9);
    assert_abs_diff_eq!(p.b1[(0, 0)], 1.0000022640534232, epsilon = 1e-9);
    assert_abs_diff_eq!(p.w2[(2, 3)], 0.019602099696773487, epsilon = 1e-9);
}

#[test]
fn back_prop_equals_compute_then_update() {
    let x = Matrix::column(&[1.0, 2.0]);

    let mut combined = Network::from_parameters(hand_seeded_parameters(), 0.1).unwrap();
    let y_hat = combined.forward_prop(&x).unwrap();
    combined.back_prop(y_hat, 1.0).unwrap();

    let mut split = Network::from_parameters(hand_seeded_parameters(), 0.1).unwrap();
    let y_hat = split.forward_prop(&x).unwrap();
    split.compute_gradients(y_hat, 1.0).unwrap();
    split.update().unwrap();

    assert_eq!(combined.parameters(), split.parameters());
}

#[test]
fn zero_step_leaves_parameters_unchanged() {
    let mut net = Network::from_parameters(hand_seeded_parameters(), 0.1).unwrap();
    let y_hat = net.forward_prop(&Matrix::column(&[1.0, 2.0])).unwrap();
    let grads = net.compute_gradients(y_hat, 1.0).unwrap().clone();

    let mut params = net.parameters().clone();
    Sgd::new(0.0).step(&mut params, &grads).unwrap();
    assert_eq!(&params, net.parameters());
}

#[test]
fn loss_decreases_on_separable_data() {
    let data = linearly_separable(40).unwrap();
    let mut rng = StdRng::seed_from_u64(17);
    let mut net = Network::with_rng(2, 0.5, &mut rng).unwrap();

    let history = train_loop(&mut net, &data, None, &TrainConfig::new(30, 0.5)).unwrap();
    assert_eq!(history.len(), 30);

    for pair in history.windows(2) {
        assert!(
            pair[1].mean_loss <= pair[0].mean_loss + 1e-9,
            "mean loss rose from {} to {} at epoch {}",
            pair[0].mean_loss,
            pair[1].mean_loss,
            pair[1].epoch
        );
        assert!(
            pair[1].loss <= pair[0].loss + 1e-9,
            "last-sample loss rose from {} to {} at epoch {}",
            pair[0].loss,
            pair[1].loss,
            pair[1].epoch
        );
    }
    let first = &history[0];
    let last = &history[history.len() - 1];
    assert!(last.mean_loss < first.mean_loss * 0.1);
}

#[test]
fn trained_network_separates_the_classes() {
    let data = linearly_separable(40).unwrap();
    let mut net = Network::with_rng(2, 0.5, &mut StdRng::seed_from_u64(99)).unwrap();
    for _ in 0..30 {
        train_epoch(&mut net, &data).unwrap();
    }
    let eval = trinet::evaluate(&mut net, &data).unwrap();
    assert_eq!(eval.accuracy, 1.0);
    assert!(eval.mean_loss < 0.05);
}

#[test]
fn reported_epoch_loss_is_the_last_sample() {
    let data = linearly_separable(6).unwrap();
    let params = hand_seeded_parameters();

    let mut replay = Network::from_parameters(params.clone(), 0.2).unwrap();
    let mut last = 0.0;
    for (x, y) in data.iter() {
        let y_hat = replay.forward_prop(&x).unwrap();
        last = Network::cross_entropy_loss(y_hat, y);
        replay.back_prop(y_hat, y).unwrap();
    }

    let mut net = Network::from_parameters(params, 0.2).unwrap();
    let epoch = train_epoch(&mut net, &data).unwrap();
    assert_eq!(epoch.last, last);
    assert_eq!(net.parameters(), replay.parameters());
}
