//! Host-side simulation of the full streaming pipeline.
//!
//! Two threads stand in for the interrupt contexts: a producer
//! synthesizing 16-sample sine bursts at the real-time cadence, and a
//! mock DMA engine that "plays" one buffer per block period and raises
//! the completion signal. The main thread polls the scheduler, flips the
//! filter mode halfway through, and prints the run statistics.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use pdm_stream::constants::{
    BLOCK_SAMPLES, MIC_BUFFER_SAMPLES, MIC_BURST_SAMPLES, SAMPLE_RATE_HZ,
};
use pdm_stream::mode::ModeSelector;
use pdm_stream::ring::SampleRing;
use pdm_stream::stream::{Activity, CaptureInput, ClipIndicator, OutputBufferPair, StreamScheduler};

static RING: SampleRing<MIC_BUFFER_SAMPLES> = SampleRing::new();
static OUTPUT: OutputBufferPair = OutputBufferPair::new();
static MODE: ModeSelector = ModeSelector::new();
static CLIP: ClipIndicator = ClipIndicator::new();

static RUNNING: AtomicBool = AtomicBool::new(true);
static DMA_STARTED: AtomicBool = AtomicBool::new(false);

const TONE_HZ: f32 = 440.0;
const TONE_AMPLITUDE: f32 = 12_000.0;

fn main() {
    let burst_period = Duration::from_micros(
        MIC_BURST_SAMPLES as u64 * 1_000_000 / SAMPLE_RATE_HZ as u64,
    );
    let block_period = Duration::from_micros(
        BLOCK_SAMPLES as u64 * 1_000_000 / SAMPLE_RATE_HZ as u64,
    );

    // Producer context: the PDM decimator "interrupt".
    let producer = thread::spawn(move || {
        let mut capture = CaptureInput::new(&RING, &CLIP);
        let mut phase = 0.0f32;
        let step = 2.0 * core::f32::consts::PI * TONE_HZ / SAMPLE_RATE_HZ as f32;

        while RUNNING.load(Ordering::Relaxed) {
            let mut burst = [0i16; MIC_BURST_SAMPLES];
            for s in burst.iter_mut() {
                *s = (libm::sinf(phase) * TONE_AMPLITUDE) as i16;
                phase += step;
                if phase > 2.0 * core::f32::consts::PI {
                    phase -= 2.0 * core::f32::consts::PI;
                }
            }
            capture.on_samples_ready(&burst);
            thread::sleep(burst_period);
        }
    });

    // Playback context: the DMA completion "interrupt".
    let dma = thread::spawn(move || {
        while RUNNING.load(Ordering::Relaxed) {
            if !DMA_STARTED.load(Ordering::Acquire) {
                thread::yield_now();
                continue;
            }
            thread::sleep(block_period);
            // SAFETY: Read-only view of the active buffer between
            // ownership flips; only this thread flips ownership.
            let frame = unsafe { OUTPUT.hardware_buffer() };
            let peak = frame.iter().map(|&s| (s as i32).abs()).max().unwrap_or(0);
            println!("played buffer {} (peak {peak})", OUTPUT.active_index());
            OUTPUT.on_buffer_consumed();
        }
    });

    // Foreground loop: poll the scheduler for two seconds of audio.
    let mut sched = StreamScheduler::new(&RING, &OUTPUT, &MODE);
    let start = std::time::Instant::now();
    let mut mode_flipped = false;

    while start.elapsed() < Duration::from_secs(2) {
        match sched.poll() {
            Ok(Activity::Armed) => {
                println!("startup margin reached; playback armed");
                DMA_STARTED.store(true, Ordering::Release);
            }
            Ok(Activity::Refilled { .. }) | Ok(Activity::Idle) => {}
            Err(e) => {
                eprintln!("stream halted: {e}");
                break;
            }
        }

        if !mode_flipped && start.elapsed() > Duration::from_secs(1) {
            println!("button press: enabling low-pass");
            MODE.bump();
            mode_flipped = true;
        }

        thread::yield_now();
    }

    RUNNING.store(false, Ordering::Relaxed);
    producer.join().unwrap();
    dma.join().unwrap();

    let stats = sched.stats();
    println!(
        "done: {} blocks, {} overruns, {} underruns, clip={}",
        stats.blocks,
        stats.overruns,
        stats.underruns,
        CLIP.is_set()
    );
}
