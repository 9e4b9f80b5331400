//! Example that demonstrates the exact usage shown in the README.md file.
//!
//! A toy structure generator carves spheres out of a cubic lattice and a naive
//! calculator evaluates the Debye sum directly, so the harness has real work to
//! measure without any accelerator involved.

use std::path::Path;

use debye_bench::{
    BenchmarkOptions, Benchmarker, CalculatorConfig, CollaboratorError, DebyeParameters, Device,
    Nanoparticle, ScatteringCalculator, ScatteringFunction, StructureGenerator,
};

/// Lattice spacing of the toy crystal, in ångström.
const SPACING: f64 = 1.5;

/// Grid cells searched in each direction, covering radii up to 30 Å.
const GRID_LIMIT: i32 = 20;

/// Momentum transfer samples evaluated by the toy calculator.
const Q_POINTS: u32 = 64;

#[derive(Debug)]
struct LatticeGenerator;

impl StructureGenerator for LatticeGenerator {
    fn generate(
        &self,
        _structure_file: &Path,
        radii: &[f64],
        _device: Device,
    ) -> Result<Vec<Nanoparticle>, CollaboratorError> {
        Ok(radii.iter().map(|&radius| carve_sphere(radius)).collect())
    }
}

fn carve_sphere(radius: f64) -> Nanoparticle {
    let mut elements = Vec::new();
    let mut xyz = Vec::new();

    for i in -GRID_LIMIT..=GRID_LIMIT {
        for j in -GRID_LIMIT..=GRID_LIMIT {
            for k in -GRID_LIMIT..=GRID_LIMIT {
                let point = [
                    f64::from(i) * SPACING,
                    f64::from(j) * SPACING,
                    f64::from(k) * SPACING,
                ];
                let [x, y, z] = point;

                if (x * x + y * y + z * z).sqrt() <= radius {
                    elements.push("C".to_string());
                    xyz.push(point);
                }
            }
        }
    }

    Nanoparticle::new(elements, xyz)
}

#[derive(Debug)]
struct NaiveDebyeCalculator {
    q_grid: Vec<f64>,
}

impl ScatteringCalculator for NaiveDebyeCalculator {
    fn configure(&mut self, config: &CalculatorConfig) -> Result<(), CollaboratorError> {
        self.q_grid = build_q_grid(config.parameters());
        Ok(())
    }

    fn compute(
        &self,
        _function: ScatteringFunction,
        structure: &Nanoparticle,
    ) -> Result<Vec<f64>, CollaboratorError> {
        let xyz = structure.xyz();

        Ok(self
            .q_grid
            .iter()
            .map(|&q| {
                let mut intensity = 0.0;

                for a in xyz {
                    let [ax, ay, az] = *a;

                    for b in xyz {
                        let [bx, by, bz] = *b;
                        let (dx, dy, dz) = (ax - bx, ay - by, az - bz);
                        let argument = q * (dx * dx + dy * dy + dz * dz).sqrt();

                        intensity += if argument.abs() < f64::EPSILON {
                            1.0
                        } else {
                            argument.sin() / argument
                        };
                    }
                }

                intensity
            })
            .collect())
    }
}

fn build_q_grid(parameters: &DebyeParameters) -> Vec<f64> {
    let step = (parameters.q_max() - parameters.q_min()) / f64::from(Q_POINTS);

    (0..Q_POINTS)
        .map(|index| parameters.q_min() + f64::from(index) * step)
        .collect()
}

fn main() -> Result<(), debye_bench::Error> {
    println!("=== Debye Bench README Example ===");

    let mut benchmarker = Benchmarker::new(
        LatticeGenerator,
        NaiveDebyeCalculator { q_grid: Vec::new() },
        ScatteringFunction::Gr,
    );
    benchmarker.set_radii([2.0, 4.0, 6.0]);
    benchmarker.set_device(Device::Cpu);

    let statistics = benchmarker.benchmark(&BenchmarkOptions::default())?;
    statistics.print_to_stdout();

    // Recorded reference runs ship with the crate for comparison.
    debye_bench::reference::titan_rtx().print_to_stdout();

    println!("README example completed successfully!");

    Ok(())
}
