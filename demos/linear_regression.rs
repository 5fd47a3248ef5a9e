//! Fit a line to generated data with gradient descent.
//!
//! ```text
//! cargo run --example linear_regression -- --count 500 --slope 2 --intercept 1 --noise 0.5
//! VECMATH_LOG=debug cargo run --example linear_regression -- --backend serial
//! ```

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use vecmath::prelude::*;
use vecmath::regression::{generator, GradientDescent};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum BackendChoice {
    /// Detected hardware capability
    Auto,
    /// Flat buffers and scalar loops
    Serial,
}

#[derive(Parser, Debug)]
#[command(version, about = "Linear regression by gradient descent")]
struct Args {
    /// Number of generated points
    #[arg(long, default_value_t = 1000)]
    count: usize,

    /// Slope of the generating line
    #[arg(long, default_value_t = 1.0)]
    slope: f32,

    /// Intercept of the generating line
    #[arg(long, default_value_t = 0.0)]
    intercept: f32,

    /// Standard deviation of Gaussian noise added to y (0 for an exact line)
    #[arg(long, default_value_t = 0.0)]
    noise: f32,

    /// Seed for the noise generator
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Gradient descent step size
    #[arg(long, default_value_t = 0.75)]
    learning_rate: f32,

    /// Strategy to run the vector operations with
    #[arg(long, value_enum, default_value_t = BackendChoice::Auto)]
    backend: BackendChoice,
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("VECMATH_LOG", "warn,vecmath=info"))
        .init();

    let args = Args::parse();

    let ctx = match args.backend {
        BackendChoice::Auto => *Context::global(),
        BackendChoice::Serial => Context::serial(),
    };

    let points = if args.noise > 0.0 {
        generator::noisy(args.count, args.slope, args.intercept, args.noise, args.seed)?
    } else {
        generator::linear(args.count, args.slope, args.intercept)
    };

    println!("hardware accelerated: {}", is_hardware_accelerated());
    println!("backend:              {}", ctx.backend());

    let result = GradientDescent::new()
        .learning_rate(args.learning_rate)
        .fit(&points, &ctx)?;

    println!("fitted (rescaled):    {}", result);
    println!("iterations:           {}", result.iterations);
    println!("duration:             {:?}", result.duration);

    let last = args.count.saturating_sub(1) as f32;
    for x in [0.0, last / 2.0, last] {
        println!(
            "h({:>8.2}) = {:>10.4}   expected {:>10.4}",
            x,
            result.predict(x),
            args.intercept + args.slope * x
        );
    }

    Ok(())
}
