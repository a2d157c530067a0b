//! Solves a fixed 3x3 system and prints the solution vector.

use nalgebra::{matrix, vector};

fn main() {
    tracing_subscriber::fmt::init();

    let mut mat_a = matrix![
        3.0, 2.0, -4.0;
        2.0, 3.0, 3.0;
        5.0, -3.0, 1.0;
    ];
    let mut b = vector![3.0, 15.0, 14.0];

    println!("Starting Gaussian elimination solver...");

    match gauss::solve(&mut mat_a, &mut b) {
        Ok(x) => {
            println!("Computed solution vector:");
            for (i, x_i) in x.iter().enumerate() {
                println!("x[{}] = {:.6}", i, x_i);
            }
        }
        Err(err) => {
            eprintln!("An error occurred during numerical computation: {}", err);
            std::process::exit(1);
        }
    }
}
