use rand::rngs::StdRng;
use rand::SeedableRng;

use trinet::data::linearly_separable;
use trinet::{Network, TrainConfig, train_loop};

fn main() -> trinet::Result<()> {
    let mut rng = StdRng::seed_from_u64(2024);

    let mut data = linearly_separable(60)?;
    data.shuffle(&mut rng);
    let (train, test) = data.split(0.25)?;

    let mut network = Network::with_rng(train.n_features(), 0.5, &mut rng)?;
    let history = train_loop(&mut network, &train, test.as_ref(), &TrainConfig::new(15, 0.5))?;

    for stats in &history {
        println!(
            "Epoch {:>2}: loss = {:.6}, mean = {:.6}, val acc = {:.2}",
            stats.epoch,
            stats.loss,
            stats.mean_loss,
            stats.val_accuracy.unwrap_or(0.0)
        );
    }

    for (x, y) in train.iter().take(4) {
        let y_hat = network.forward_prop(&x)?;
        println!("Input: {:?} -> Output: {:.4} (label {})", x.data, y_hat, y);
    }
    Ok(())
}
