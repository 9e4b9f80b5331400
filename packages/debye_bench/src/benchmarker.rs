//! The benchmark sweep driver.
//!
//! A [`Benchmarker`] repeatedly times the scattering calculator over structures of
//! each configured radius, discards warm-up trials and reduces the retained samples
//! into a [`Statistics`] record.

use std::hint;
use std::num::NonZero;
use std::path::{Path, PathBuf};
use std::time::Duration;

use accel_tracker::{NoAccelerator, PeakMemoryProbe};
use derive_more::Debug;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::pal::{Platform, PlatformFacade};
use crate::{
    CalculatorConfig, DebyeParameters, Device, Error, Nanoparticle, RunMetadata,
    ScatteringCalculator, ScatteringFunction, Statistics, StructureGenerator, write_csv,
};

/// Calculation trials discarded at the start of every radius's measurement, before
/// the retained trials begin.
pub const WARMUP_TRIALS: u32 = 2;

/// File name of the reference structure benchmarked when no custom structure file
/// is configured.
pub const DEFAULT_STRUCTURE_FILE: &str = "benchmark_structure.cif";

const DEFAULT_RADIUS: f64 = 5.0;
const DEFAULT_REPETITIONS: NonZero<u32> = NonZero::new(1).expect("1 is not zero");

/// Options controlling a single [`Benchmarker::benchmark()`] run.
///
/// The defaults generate structures individually per radius, retain one trial per
/// radius and do not persist a CSV file.
#[derive(Clone, Debug)]
pub struct BenchmarkOptions {
    generate_individually: bool,
    repetitions: NonZero<u32>,
    csv_path: Option<PathBuf>,
}

impl BenchmarkOptions {
    /// Whether each radius's structure is generated (and its generation memory
    /// measured) in a separate collaborator call rather than in one batched call
    /// covering the whole sweep.
    #[must_use]
    pub fn generate_individually(&self) -> bool {
        self.generate_individually
    }

    /// Retained trials per radius, not counting the discarded warm-up trials.
    #[must_use]
    pub fn repetitions(&self) -> NonZero<u32> {
        self.repetitions
    }

    /// Where the run's statistics are persisted, if anywhere.
    #[must_use]
    pub fn csv_path(&self) -> Option<&Path> {
        self.csv_path.as_deref()
    }

    /// Sets whether structures are generated individually per radius.
    #[must_use]
    pub fn with_generate_individually(mut self, generate_individually: bool) -> Self {
        self.generate_individually = generate_individually;
        self
    }

    /// Sets the number of retained trials per radius.
    #[must_use]
    pub fn with_repetitions(mut self, repetitions: NonZero<u32>) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Sets a file path to persist the run's statistics to as CSV.
    #[must_use]
    pub fn with_csv_path(mut self, csv_path: impl Into<PathBuf>) -> Self {
        self.csv_path = Some(csv_path.into());
        self
    }
}

impl Default for BenchmarkOptions {
    fn default() -> Self {
        Self {
            generate_individually: true,
            repetitions: DEFAULT_REPETITIONS,
            csv_path: None,
        }
    }
}

/// Drives repeated timed trials of an externally supplied structure generator and
/// scattering calculator, reducing them into a [`Statistics`] record.
///
/// Freshly constructed, a benchmarker sweeps a single radius of 5.0 Å over the
/// conventional reference structure on the default device with default calculation
/// parameters, displaying progress and reporting zero memory (install a probe with
/// [`set_memory_probe()`][Self::set_memory_probe] to measure accelerator memory).
///
/// All setters take effect on the next run; a run in progress works from a frozen
/// snapshot of the configuration.
#[derive(Debug)]
pub struct Benchmarker<G, C> {
    #[debug(skip)]
    generator: G,

    #[debug(skip)]
    calculator: C,

    function: ScatteringFunction,
    radii: Vec<f64>,
    device: Device,
    batch_size: NonZero<usize>,
    parameters: DebyeParameters,
    structure_file: PathBuf,
    show_progress: bool,
    probe: Box<dyn PeakMemoryProbe>,
    platform: PlatformFacade,
}

impl<G, C> Benchmarker<G, C>
where
    G: StructureGenerator,
    C: ScatteringCalculator,
{
    /// Creates a benchmarker measuring the given scattering function with default
    /// configuration.
    #[must_use]
    pub fn new(generator: G, calculator: C, function: ScatteringFunction) -> Self {
        Self::with_platform(generator, calculator, function, PlatformFacade::real())
    }

    pub(crate) fn with_platform(
        generator: G,
        calculator: C,
        function: ScatteringFunction,
        platform: PlatformFacade,
    ) -> Self {
        Self {
            generator,
            calculator,
            function,
            radii: vec![DEFAULT_RADIUS],
            device: Device::default(),
            batch_size: crate::DEFAULT_BATCH_SIZE,
            parameters: DebyeParameters::default(),
            structure_file: PathBuf::from(DEFAULT_STRUCTURE_FILE),
            show_progress: true,
            probe: Box::new(NoAccelerator),
            platform,
        }
    }

    /// Replaces the radii swept by the next run, in ångström.
    pub fn set_radii(&mut self, radii: impl IntoIterator<Item = f64>) {
        self.radii = radii.into_iter().collect();
    }

    /// Sets the device the calculator is asked to run on.
    pub fn set_device(&mut self, device: Device) {
        self.device = device;
    }

    /// Sets the number of structure pairs per device dispatch.
    pub fn set_batch_size(&mut self, batch_size: NonZero<usize>) {
        self.batch_size = batch_size;
    }

    /// Replaces the Debye calculation parameters handed to the calculator.
    ///
    /// The parameters are validated when the next run starts, not here.
    pub fn set_debye_parameters(&mut self, parameters: DebyeParameters) {
        self.parameters = parameters;
    }

    /// Sets the structure file handed to the generator. Its file name portion
    /// becomes the name recorded in the run's statistics.
    pub fn set_structure_file(&mut self, structure_file: impl Into<PathBuf>) {
        self.structure_file = structure_file.into();
    }

    /// Enables or disables the progress display (one tick per radius).
    pub fn show_progress(&mut self, show: bool) {
        self.show_progress = show;
    }

    /// Installs the probe used to read peak accelerator memory around each unit of
    /// measured work.
    ///
    /// Without a probe, memory columns report exactly zero and the run still
    /// succeeds.
    pub fn set_memory_probe(&mut self, probe: impl PeakMemoryProbe) {
        self.probe = Box::new(probe);
    }

    /// The radii swept by the next run, in ångström.
    #[must_use]
    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    /// The device the calculator is asked to run on.
    #[must_use]
    pub fn device(&self) -> Device {
        self.device
    }

    /// Structure pairs per device dispatch.
    #[must_use]
    pub fn batch_size(&self) -> NonZero<usize> {
        self.batch_size
    }

    /// The scattering function measured by this benchmarker.
    #[must_use]
    pub fn function(&self) -> ScatteringFunction {
        self.function
    }

    /// Runs the benchmark and returns the reduced statistics.
    ///
    /// Per radius, the structure is generated (individually or taken from one
    /// batched generation call, per the options), then the calculator runs
    /// `repetitions + 2` timed trials of which the first two are discarded as
    /// warm-up. Retained times reduce to mean and population standard deviation;
    /// retained peak-memory samples reduce to their mean, in MB.
    ///
    /// A collaborator failure aborts the run with no partial result.
    ///
    /// # Example
    ///
    /// ```
    /// use std::path::Path;
    ///
    /// use debye_bench::{
    ///     BenchmarkOptions, Benchmarker, CalculatorConfig, CollaboratorError, Device,
    ///     Nanoparticle, ScatteringCalculator, ScatteringFunction, StructureGenerator,
    /// };
    ///
    /// #[derive(Debug)]
    /// struct LatticeGenerator;
    ///
    /// impl StructureGenerator for LatticeGenerator {
    ///     fn generate(
    ///         &self,
    ///         _structure_file: &Path,
    ///         radii: &[f64],
    ///         _device: Device,
    ///     ) -> Result<Vec<Nanoparticle>, CollaboratorError> {
    ///         Ok(radii
    ///             .iter()
    ///             .map(|_| Nanoparticle::new(vec!["C".to_string()], vec![[0.0, 0.0, 0.0]]))
    ///             .collect())
    ///     }
    /// }
    ///
    /// #[derive(Debug)]
    /// struct FlatCalculator;
    ///
    /// impl ScatteringCalculator for FlatCalculator {
    ///     fn configure(&mut self, _config: &CalculatorConfig) -> Result<(), CollaboratorError> {
    ///         Ok(())
    ///     }
    ///
    ///     fn compute(
    ///         &self,
    ///         _function: ScatteringFunction,
    ///         structure: &Nanoparticle,
    ///     ) -> Result<Vec<f64>, CollaboratorError> {
    ///         Ok(vec![0.0; structure.size()])
    ///     }
    /// }
    ///
    /// # fn main() -> Result<(), debye_bench::Error> {
    /// let mut benchmarker =
    ///     Benchmarker::new(LatticeGenerator, FlatCalculator, ScatteringFunction::Gr);
    /// benchmarker.set_radii([5.0, 10.0]);
    /// benchmarker.show_progress(false);
    ///
    /// let statistics = benchmarker.benchmark(&BenchmarkOptions::default())?;
    ///
    /// assert_eq!(statistics.len(), 2);
    /// println!("{statistics}");
    /// # Ok(())
    /// # }
    /// ```
    pub fn benchmark(&mut self, options: &BenchmarkOptions) -> crate::Result<Statistics> {
        let config = CalculatorConfig::new(self.device, self.batch_size, self.parameters.clone())?;
        self.calculator
            .configure(&config)
            .map_err(Error::Calculation)?;

        let radii = self.radii.clone();
        let total_trials = options
            .repetitions
            .get()
            .checked_add(WARMUP_TRIALS)
            .expect("repetitions do not fit in u32; this indicates an unrealistic scenario");

        let batch = if options.generate_individually {
            None
        } else {
            Some(self.generate_batch(&radii)?)
        };

        let progress = self.new_progress_bar(radii.len());

        let mut atom_counts = Vec::with_capacity(radii.len());
        let mut mean_times = Vec::with_capacity(radii.len());
        let mut std_times = Vec::with_capacity(radii.len());
        let mut generation_memory = Vec::with_capacity(radii.len());
        let mut calculation_memory = Vec::with_capacity(radii.len());

        for (index, &radius) in radii.iter().enumerate() {
            let generated;
            let (structure, generation_mb) = match &batch {
                Some((structures, memory)) => {
                    let structure = structures.get(index).ok_or_else(|| {
                        Error::Generation(
                            format!(
                                "generator returned {} structures for {} radii",
                                structures.len(),
                                radii.len()
                            )
                            .into(),
                        )
                    })?;

                    (structure, *memory)
                }
                None => {
                    let (structure, memory) = self.generate_one(radius)?;
                    generated = structure;
                    (&generated, memory)
                }
            };

            let (times, memories) = self.run_trials(structure, total_trials)?;
            let (mean, std) = mean_and_population_std(&times);
            let calculation_mb = mean_of(&memories);

            debug!(radius, mean, std, calculation_mb, "reduced retained trials");

            atom_counts.push(structure.size());
            mean_times.push(mean);
            std_times.push(std);
            generation_memory.push(generation_mb);
            calculation_memory.push(calculation_mb);

            progress.inc(1);
        }

        progress.finish_and_clear();

        let metadata = RunMetadata::new(
            structure_name(&self.structure_file),
            self.function.as_str(),
            self.device.as_str(),
            self.batch_size.get(),
        );

        let statistics = Statistics::new(
            metadata,
            radii,
            atom_counts,
            mean_times,
            std_times,
            generation_memory,
            calculation_memory,
        );

        if let Some(path) = options.csv_path() {
            write_csv(&statistics, path)?;
            debug!(path = %path.display(), "wrote benchmark statistics");
        }

        Ok(statistics)
    }

    /// Generates the structure for one radius, returning it with the peak memory
    /// (in MB) observed during generation.
    fn generate_one(&self, radius: f64) -> crate::Result<(Nanoparticle, f64)> {
        self.probe.reset_peak();

        let started = self.platform.timestamp();
        let structures = self
            .generator
            .generate(&self.structure_file, &[radius], self.device)
            .map_err(Error::Generation)?;
        let elapsed = elapsed_since(&self.platform, started);
        let memory = bytes_to_megabytes(self.probe.peak_bytes());

        debug!(radius, elapsed = ?elapsed, "generated structure");

        let structure = structures.into_iter().next().ok_or_else(|| {
            Error::Generation(
                format!("generator returned no structure for radius {radius}").into(),
            )
        })?;

        Ok((structure, memory))
    }

    /// Generates the structures for the whole sweep in one collaborator call,
    /// returning them with the single peak-memory figure (in MB) shared by every
    /// radius of the run.
    fn generate_batch(&self, radii: &[f64]) -> crate::Result<(Vec<Nanoparticle>, f64)> {
        self.probe.reset_peak();

        let started = self.platform.timestamp();
        let structures = self
            .generator
            .generate(&self.structure_file, radii, self.device)
            .map_err(Error::Generation)?;
        let elapsed = elapsed_since(&self.platform, started);
        let memory = bytes_to_megabytes(self.probe.peak_bytes());

        debug!(structures = structures.len(), elapsed = ?elapsed, "generated structure batch");

        Ok((structures, memory))
    }

    /// Runs the warm-up and retained trials over one structure, returning the
    /// retained elapsed times (seconds) and peak-memory samples (MB).
    fn run_trials(
        &self,
        structure: &Nanoparticle,
        total_trials: u32,
    ) -> crate::Result<(Vec<f64>, Vec<f64>)> {
        let mut times = Vec::new();
        let mut memories = Vec::new();

        for trial in 0..total_trials {
            self.probe.reset_peak();

            let started = self.platform.timestamp();
            let curve = self
                .calculator
                .compute(self.function, structure)
                .map_err(Error::Calculation)?;
            let elapsed = elapsed_since(&self.platform, started);
            let peak_bytes = self.probe.peak_bytes();

            // The collaborator's work must not be optimized away just because the
            // harness ignores its output.
            _ = hint::black_box(curve);

            if trial >= WARMUP_TRIALS {
                times.push(elapsed.as_secs_f64());
                memories.push(bytes_to_megabytes(peak_bytes));
            }
        }

        Ok((times, memories))
    }

    #[cfg_attr(test, mutants::skip)] // Cosmetic; tests run with the progress display disabled.
    fn new_progress_bar(&self, radius_count: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress = ProgressBar::new(
            u64::try_from(radius_count).expect("radius count fits in u64 on all supported platforms"),
        );
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40}] {pos}/{len}")
                .expect("progress bar template is statically known to be valid"),
        );
        progress.set_message("Benchmarking calculator");

        progress
    }
}

fn elapsed_since(platform: &PlatformFacade, started: Duration) -> Duration {
    platform
        .timestamp()
        .checked_sub(started)
        .expect("timestamps from a monotonic clock cannot run backwards")
}

/// The file name portion of the structure file path, as recorded in statistics.
fn structure_name(structure_file: &Path) -> String {
    structure_file.file_name().map_or_else(
        || structure_file.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Converts a peak byte reading to the megabytes recorded in statistics.
fn bytes_to_megabytes(bytes: u64) -> f64 {
    #[expect(
        clippy::cast_precision_loss,
        reason = "peak memory readings sit far below f64's 52-bit mantissa"
    )]
    let bytes = bytes as f64;

    bytes / 1_000_000.0
}

/// Arithmetic mean of the samples, or 0.0 for an empty slice.
fn mean_of(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "sample counts are tiny compared to f64's 52-bit mantissa"
    )]
    let count = samples.len() as f64;

    samples.iter().sum::<f64>() / count
}

/// Arithmetic mean and population standard deviation of the samples.
///
/// Uses the population form (dividing by the sample count), so a single sample
/// yields a standard deviation of exactly 0.0.
fn mean_and_population_std(samples: &[f64]) -> (f64, f64) {
    if samples.is_empty() {
        return (0.0, 0.0);
    }

    let mean = mean_of(samples);
    let variance = mean_of(
        &samples
            .iter()
            .map(|sample| {
                let deviation = sample - mean;
                deviation * deviation
            })
            .collect::<Vec<_>>(),
    );

    (mean, variance.sqrt())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use accel_tracker::PeakCounter;
    use approx::assert_abs_diff_eq;
    use static_assertions::assert_impl_all;

    use super::*;
    use crate::pal::FakePlatform;
    use crate::{CollaboratorError, read_csv};

    assert_impl_all!(Benchmarker<ScriptedGenerator, ScriptedCalculator>: Send, Sync);

    /// Arguments of one recorded `generate` call.
    #[derive(Debug)]
    struct RecordedGeneration {
        structure_file: PathBuf,
        radii: Vec<f64>,
        device: Device,
    }

    /// Test generator producing structures with deterministic, distinct atom
    /// counts (100, 200, 300 and so on, in generation order).
    #[derive(Debug)]
    struct ScriptedGenerator {
        calls: Arc<Mutex<Vec<RecordedGeneration>>>,
        next_size: AtomicUsize,
        counter: Option<PeakCounter>,
        allocation_bytes: u64,
        drop_last_structure: bool,
        fail: bool,
    }

    impl ScriptedGenerator {
        fn new() -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                next_size: AtomicUsize::new(100),
                counter: None,
                allocation_bytes: 0,
                drop_last_structure: false,
                fail: false,
            }
        }

        fn with_allocations(counter: PeakCounter, bytes: u64) -> Self {
            Self {
                counter: Some(counter),
                allocation_bytes: bytes,
                ..Self::new()
            }
        }
    }

    impl StructureGenerator for ScriptedGenerator {
        fn generate(
            &self,
            structure_file: &Path,
            radii: &[f64],
            device: Device,
        ) -> Result<Vec<Nanoparticle>, CollaboratorError> {
            if self.fail {
                return Err("scripted generation failure".into());
            }

            self.calls
                .lock()
                .expect("test lock is never poisoned")
                .push(RecordedGeneration {
                    structure_file: structure_file.to_path_buf(),
                    radii: radii.to_vec(),
                    device,
                });

            if let Some(counter) = &self.counter {
                counter.record_alloc(self.allocation_bytes);
                counter.record_free(self.allocation_bytes);
            }

            let mut structures: Vec<Nanoparticle> = radii
                .iter()
                .map(|_| {
                    let size = self.next_size.fetch_add(100, Ordering::Relaxed);
                    nanoparticle_with_size(size)
                })
                .collect();

            if self.drop_last_structure {
                _ = structures.pop();
            }

            Ok(structures)
        }
    }

    /// Test calculator whose trials take scripted amounts of fake time and record
    /// scripted peak allocations. Scripts cycle when exhausted.
    #[derive(Debug)]
    struct ScriptedCalculator {
        platform: FakePlatform,
        durations: Vec<Duration>,
        allocations: Vec<u64>,
        counter: Option<PeakCounter>,
        calls: Arc<AtomicUsize>,
        configured: Arc<Mutex<Option<CalculatorConfig>>>,
        fail_configure: bool,
        fail_on_call: Option<usize>,
    }

    impl ScriptedCalculator {
        fn new(platform: &FakePlatform) -> Self {
            Self {
                platform: platform.clone(),
                durations: Vec::new(),
                allocations: Vec::new(),
                counter: None,
                calls: Arc::new(AtomicUsize::new(0)),
                configured: Arc::new(Mutex::new(None)),
                fail_configure: false,
                fail_on_call: None,
            }
        }

        fn with_durations(platform: &FakePlatform, durations: Vec<Duration>) -> Self {
            Self {
                durations,
                ..Self::new(platform)
            }
        }
    }

    impl ScatteringCalculator for ScriptedCalculator {
        fn configure(&mut self, config: &CalculatorConfig) -> Result<(), CollaboratorError> {
            if self.fail_configure {
                return Err("scripted configuration failure".into());
            }

            *self
                .configured
                .lock()
                .expect("test lock is never poisoned") = Some(config.clone());

            Ok(())
        }

        fn compute(
            &self,
            _function: ScatteringFunction,
            structure: &Nanoparticle,
        ) -> Result<Vec<f64>, CollaboratorError> {
            let call = self.calls.fetch_add(1, Ordering::Relaxed);

            if Some(call) == self.fail_on_call {
                return Err("scripted calculation failure".into());
            }

            if let Some(duration) = cycle(&self.durations, call) {
                self.platform.advance(duration);
            }

            if let Some(bytes) = cycle(&self.allocations, call) {
                if let Some(counter) = &self.counter {
                    counter.record_alloc(bytes);
                    counter.record_free(bytes);
                }
            }

            Ok(vec![0.0; structure.size()])
        }
    }

    /// The scripted sample for the given zero-based call index, cycling through
    /// the script. `None` when the script is empty.
    fn cycle<T: Copy>(samples: &[T], call: usize) -> Option<T> {
        let index = call.checked_rem(samples.len())?;
        samples.get(index).copied()
    }

    fn nanoparticle_with_size(size: usize) -> Nanoparticle {
        Nanoparticle::new(vec!["C".to_string(); size], vec![[0.0, 0.0, 0.0]; size])
    }

    fn quiet_benchmarker(
        generator: ScriptedGenerator,
        calculator: ScriptedCalculator,
        platform: FakePlatform,
    ) -> Benchmarker<ScriptedGenerator, ScriptedCalculator> {
        let mut benchmarker = Benchmarker::with_platform(
            generator,
            calculator,
            ScatteringFunction::Gr,
            platform.into(),
        );
        benchmarker.show_progress(false);
        benchmarker
    }

    fn repetitions(count: u32) -> NonZero<u32> {
        NonZero::new(count).expect("test repetition counts are nonzero")
    }

    #[test]
    fn returns_parallel_sequences_for_every_radius() {
        let platform = FakePlatform::new();
        let calculator =
            ScriptedCalculator::with_durations(&platform, vec![Duration::from_millis(10)]);
        let mut benchmarker = quiet_benchmarker(ScriptedGenerator::new(), calculator, platform);
        benchmarker.set_radii([4.0, 8.0, 12.0]);

        let statistics = benchmarker
            .benchmark(&BenchmarkOptions::default())
            .expect("scripted run succeeds");

        assert_eq!(statistics.len(), 3);
        assert_eq!(statistics.atom_counts().len(), 3);
        assert_eq!(statistics.mean_times().len(), 3);
        assert_eq!(statistics.std_times().len(), 3);
        assert_eq!(statistics.generation_memory().len(), 3);
        assert_eq!(statistics.calculation_memory().len(), 3);
        assert_abs_diff_eq!(statistics.radii(), &[4.0, 8.0, 12.0][..]);
    }

    #[test]
    fn warm_up_trials_never_influence_the_mean() {
        // Each radius consumes one full cycle of the script: two extremely slow
        // warm-up trials followed by the single retained trial.
        let platform = FakePlatform::new();
        let calculator = ScriptedCalculator::with_durations(
            &platform,
            vec![
                Duration::from_secs(100),
                Duration::from_secs(100),
                Duration::from_secs(1),
            ],
        );
        let mut benchmarker = quiet_benchmarker(ScriptedGenerator::new(), calculator, platform);
        benchmarker.set_radii([5.0, 10.0]);

        let statistics = benchmarker
            .benchmark(&BenchmarkOptions::default())
            .expect("scripted run succeeds");

        assert_abs_diff_eq!(statistics.mean_times(), &[1.0, 1.0][..]);
        assert_abs_diff_eq!(statistics.std_times(), &[0.0, 0.0][..]);
    }

    #[test]
    fn retained_trials_reduce_to_mean_and_population_std() {
        let platform = FakePlatform::new();
        let calculator = ScriptedCalculator::with_durations(
            &platform,
            vec![
                Duration::from_secs(100),
                Duration::from_secs(100),
                Duration::from_secs(1),
                Duration::from_secs(3),
            ],
        );
        let mut benchmarker = quiet_benchmarker(ScriptedGenerator::new(), calculator, platform);

        let statistics = benchmarker
            .benchmark(&BenchmarkOptions::default().with_repetitions(repetitions(2)))
            .expect("scripted run succeeds");

        // Retained samples are 1 s and 3 s: mean 2 s, population std 1 s.
        assert_abs_diff_eq!(statistics.mean_times(), &[2.0][..]);
        assert_abs_diff_eq!(statistics.std_times(), &[1.0][..]);
    }

    #[test]
    fn runs_repetitions_plus_two_trials_per_radius() {
        let platform = FakePlatform::new();
        let generator = ScriptedGenerator::new();
        let generation_calls = Arc::clone(&generator.calls);
        let calculator = ScriptedCalculator::new(&platform);
        let compute_calls = Arc::clone(&calculator.calls);
        let mut benchmarker = quiet_benchmarker(generator, calculator, platform);
        benchmarker.set_radii([5.0, 10.0]);

        let statistics = benchmarker
            .benchmark(&BenchmarkOptions::default().with_repetitions(repetitions(1)))
            .expect("scripted run succeeds");

        assert_eq!(statistics.len(), 2);
        assert_eq!(compute_calls.load(Ordering::Relaxed), 6);

        let calls = generation_calls.lock().expect("test lock is never poisoned");
        assert_eq!(calls.len(), 2);

        let first = calls.first().expect("two generation calls were recorded");
        assert_abs_diff_eq!(first.radii.as_slice(), &[5.0][..]);
        assert_eq!(first.device, Device::Cuda);
        assert_eq!(first.structure_file, Path::new(DEFAULT_STRUCTURE_FILE));

        let second = calls.last().expect("two generation calls were recorded");
        assert_abs_diff_eq!(second.radii.as_slice(), &[10.0][..]);
    }

    #[test]
    fn batched_generation_happens_in_one_call() {
        let platform = FakePlatform::new();
        let counter = PeakCounter::default();
        let generator = ScriptedGenerator::with_allocations(counter.clone(), 7_000_000);
        let generation_calls = Arc::clone(&generator.calls);
        let calculator = ScriptedCalculator::new(&platform);
        let mut benchmarker = quiet_benchmarker(generator, calculator, platform);
        benchmarker.set_radii([5.0, 10.0]);
        benchmarker.set_memory_probe(counter);

        let statistics = benchmarker
            .benchmark(&BenchmarkOptions::default().with_generate_individually(false))
            .expect("scripted run succeeds");

        let calls = generation_calls.lock().expect("test lock is never poisoned");
        assert_eq!(calls.len(), 1);

        let call = calls.first().expect("one generation call was recorded");
        assert_abs_diff_eq!(call.radii.as_slice(), &[5.0, 10.0][..]);

        // The one batched peak-memory figure is recorded for every radius.
        assert_abs_diff_eq!(statistics.generation_memory(), &[7.0, 7.0][..]);
        assert_eq!(statistics.atom_counts(), &[100, 200]);
    }

    #[test]
    fn calculation_memory_discards_warm_up_samples() {
        let platform = FakePlatform::new();
        let counter = PeakCounter::default();
        let mut calculator = ScriptedCalculator::new(&platform);
        calculator.allocations = vec![9_000_000, 9_000_000, 3_000_000];
        calculator.counter = Some(counter.clone());
        let mut benchmarker =
            quiet_benchmarker(ScriptedGenerator::new(), calculator, platform);
        benchmarker.set_memory_probe(counter);

        let statistics = benchmarker
            .benchmark(&BenchmarkOptions::default())
            .expect("scripted run succeeds");

        // Including the 9 MB warm-up allocations would yield a 7 MB mean.
        assert_abs_diff_eq!(statistics.calculation_memory(), &[3.0][..]);
    }

    #[test]
    fn missing_accelerator_reports_zero_memory_without_error() {
        let platform = FakePlatform::new();
        let calculator =
            ScriptedCalculator::with_durations(&platform, vec![Duration::from_millis(25)]);
        let mut benchmarker = quiet_benchmarker(ScriptedGenerator::new(), calculator, platform);

        let statistics = benchmarker
            .benchmark(&BenchmarkOptions::default())
            .expect("a missing accelerator must not fail the run");

        assert_abs_diff_eq!(statistics.generation_memory(), &[0.0][..]);
        assert_abs_diff_eq!(statistics.calculation_memory(), &[0.0][..]);
        assert_abs_diff_eq!(statistics.mean_times(), &[0.025][..]);
    }

    #[test]
    fn generation_failure_aborts_the_run() {
        let platform = FakePlatform::new();
        let mut generator = ScriptedGenerator::new();
        generator.fail = true;
        let calculator = ScriptedCalculator::new(&platform);
        let compute_calls = Arc::clone(&calculator.calls);
        let mut benchmarker = quiet_benchmarker(generator, calculator, platform);

        let error = benchmarker
            .benchmark(&BenchmarkOptions::default())
            .expect_err("the generator is scripted to fail");

        assert!(matches!(error, Error::Generation(_)));
        assert_eq!(compute_calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn calculation_failure_aborts_the_run() {
        let platform = FakePlatform::new();
        let mut calculator = ScriptedCalculator::new(&platform);
        calculator.fail_on_call = Some(4);
        let mut benchmarker = quiet_benchmarker(ScriptedGenerator::new(), calculator, platform);
        benchmarker.set_radii([5.0, 10.0]);

        let error = benchmarker
            .benchmark(&BenchmarkOptions::default())
            .expect_err("the calculator is scripted to fail mid-sweep");

        assert!(matches!(error, Error::Calculation(_)));
    }

    #[test]
    fn configuration_failure_prevents_all_collaborator_calls() {
        let platform = FakePlatform::new();
        let generator = ScriptedGenerator::new();
        let generation_calls = Arc::clone(&generator.calls);
        let mut calculator = ScriptedCalculator::new(&platform);
        calculator.fail_configure = true;
        let compute_calls = Arc::clone(&calculator.calls);
        let mut benchmarker = quiet_benchmarker(generator, calculator, platform);

        let error = benchmarker
            .benchmark(&BenchmarkOptions::default())
            .expect_err("the calculator rejects configuration");

        assert!(matches!(error, Error::Calculation(_)));
        assert_eq!(
            generation_calls
                .lock()
                .expect("test lock is never poisoned")
                .len(),
            0
        );
        assert_eq!(compute_calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn invalid_parameters_fail_before_any_collaborator_call() {
        let platform = FakePlatform::new();
        let generator = ScriptedGenerator::new();
        let generation_calls = Arc::clone(&generator.calls);
        let calculator = ScriptedCalculator::new(&platform);
        let configured = Arc::clone(&calculator.configured);
        let mut benchmarker = quiet_benchmarker(generator, calculator, platform);
        benchmarker.set_debye_parameters(DebyeParameters::default().with_q_step(0.0));

        let error = benchmarker
            .benchmark(&BenchmarkOptions::default())
            .expect_err("a zero q step is invalid");

        assert!(matches!(error, Error::InvalidConfiguration { .. }));
        assert!(
            configured
                .lock()
                .expect("test lock is never poisoned")
                .is_none()
        );
        assert_eq!(
            generation_calls
                .lock()
                .expect("test lock is never poisoned")
                .len(),
            0
        );
    }

    #[test]
    fn calculator_receives_the_frozen_configuration() {
        let platform = FakePlatform::new();
        let calculator = ScriptedCalculator::new(&platform);
        let configured = Arc::clone(&calculator.configured);
        let mut benchmarker = quiet_benchmarker(ScriptedGenerator::new(), calculator, platform);
        benchmarker.set_device(Device::Cpu);
        benchmarker.set_batch_size(NonZero::new(500).expect("500 is not zero"));
        benchmarker.set_debye_parameters(DebyeParameters::default().with_q_min(2.0));

        let statistics = benchmarker
            .benchmark(&BenchmarkOptions::default())
            .expect("scripted run succeeds");

        let config = configured
            .lock()
            .expect("test lock is never poisoned")
            .clone()
            .expect("configure ran before the first trial");
        assert_eq!(config.device(), Device::Cpu);
        assert_eq!(config.batch_size().get(), 500);
        assert_abs_diff_eq!(config.parameters().q_min(), 2.0);

        assert_eq!(statistics.device(), "cpu");
        assert_eq!(statistics.batch_size(), 500);
    }

    #[test]
    fn statistics_carry_the_structure_file_name() {
        let platform = FakePlatform::new();
        let calculator = ScriptedCalculator::new(&platform);
        let mut benchmarker = quiet_benchmarker(ScriptedGenerator::new(), calculator, platform);
        benchmarker.set_structure_file("/data/particles/rutile.cif");

        let statistics = benchmarker
            .benchmark(&BenchmarkOptions::default())
            .expect("scripted run succeeds");

        assert_eq!(statistics.name(), "rutile.cif");
        assert_eq!(statistics.function_name(), "gr");
    }

    #[test]
    fn defaults_sweep_a_single_radius_of_the_reference_structure() {
        let platform = FakePlatform::new();
        let calculator = ScriptedCalculator::new(&platform);
        let mut benchmarker = quiet_benchmarker(ScriptedGenerator::new(), calculator, platform);

        let statistics = benchmarker
            .benchmark(&BenchmarkOptions::default())
            .expect("scripted run succeeds");

        assert_abs_diff_eq!(statistics.radii(), &[5.0][..]);
        assert_eq!(statistics.name(), DEFAULT_STRUCTURE_FILE);
        assert_eq!(statistics.device(), "cuda");
        assert_eq!(statistics.batch_size(), 10_000);
    }

    #[test]
    fn csv_path_persists_the_run() {
        let directory = tempfile::tempdir().expect("temporary directory is available");
        let path = directory.path().join("run.csv");

        let platform = FakePlatform::new();
        let calculator =
            ScriptedCalculator::with_durations(&platform, vec![Duration::from_millis(10)]);
        let mut benchmarker = quiet_benchmarker(ScriptedGenerator::new(), calculator, platform);

        let statistics = benchmarker
            .benchmark(&BenchmarkOptions::default().with_csv_path(&path))
            .expect("scripted run succeeds");

        let loaded = read_csv(&path).expect("the run's CSV file was written");
        assert_eq!(loaded.name(), statistics.name());
        assert_eq!(loaded.len(), statistics.len());
        assert_eq!(loaded.atom_counts(), statistics.atom_counts());
    }

    #[test]
    fn empty_radius_sweep_produces_empty_statistics() {
        let platform = FakePlatform::new();
        let generator = ScriptedGenerator::new();
        let generation_calls = Arc::clone(&generator.calls);
        let calculator = ScriptedCalculator::new(&platform);
        let compute_calls = Arc::clone(&calculator.calls);
        let mut benchmarker = quiet_benchmarker(generator, calculator, platform);
        benchmarker.set_radii(std::iter::empty::<f64>());

        let statistics = benchmarker
            .benchmark(&BenchmarkOptions::default())
            .expect("an empty sweep is permitted");

        assert!(statistics.is_empty());
        assert_eq!(
            generation_calls
                .lock()
                .expect("test lock is never poisoned")
                .len(),
            0
        );
        assert_eq!(compute_calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn short_batch_is_a_generation_error() {
        let platform = FakePlatform::new();
        let mut generator = ScriptedGenerator::new();
        generator.drop_last_structure = true;
        let calculator = ScriptedCalculator::new(&platform);
        let mut benchmarker = quiet_benchmarker(generator, calculator, platform);
        benchmarker.set_radii([5.0, 10.0]);

        let error = benchmarker
            .benchmark(&BenchmarkOptions::default().with_generate_individually(false))
            .expect_err("the batch is one structure short");

        assert!(matches!(error, Error::Generation(_)));
        assert!(error.to_string().contains("for 2 radii"));
    }

    #[test]
    fn default_options_retain_one_individually_generated_trial() {
        let options = BenchmarkOptions::default();

        assert!(options.generate_individually());
        assert_eq!(options.repetitions().get(), 1);
        assert!(options.csv_path().is_none());
    }
}
