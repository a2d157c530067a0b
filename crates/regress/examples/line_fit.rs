//! Fits a straight line to a small sample and prints the model.

use nalgebra::vector;
use regress::LineFit;

fn main() {
    let x = vector![1.0, 2.0, 3.0, 4.0, 5.0];
    let y = vector![2.0, 4.0, 5.0, 4.0, 5.0];

    let mut model = LineFit::new();
    model.fit(&x, &y);

    println!(
        "Model fitted: y = {}x + {}",
        model.slope(),
        model.intercept()
    );
}
