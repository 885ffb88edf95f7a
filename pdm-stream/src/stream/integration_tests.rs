//! Integration tests exercising the full pipeline in software.
//!
//! These tests wire the capture adapter, ring, scheduler and output pair
//! together and play the part of both interrupt contexts:
//!
//! ```text
//! bursts → CaptureInput → SampleRing → StreamScheduler → OutputBufferPair
//!                                            ▲                  │
//!                                            └── on_buffer_consumed (simulated DMA)
//! ```

#[cfg(test)]
mod tests {
    use crate::constants::{
        BLOCK_SAMPLES, MIC_BUFFER_SAMPLES, MIC_BURST_SAMPLES, OUT_BUFFER_SAMPLES,
        START_THRESHOLD_SAMPLES,
    };
    use crate::mode::ModeSelector;
    use crate::ring::SampleRing;
    use crate::stream::capture::CaptureInput;
    use crate::stream::clip::ClipIndicator;
    use crate::stream::output::OutputBufferPair;
    use crate::stream::scheduler::{Activity, SchedulerState, StreamScheduler};

    struct Board {
        ring: SampleRing<MIC_BUFFER_SAMPLES>,
        output: OutputBufferPair,
        mode: ModeSelector,
        clip: ClipIndicator,
    }

    impl Board {
        fn new() -> Self {
            Board {
                ring: SampleRing::new(),
                output: OutputBufferPair::new(),
                mode: ModeSelector::new(),
                clip: ClipIndicator::new(),
            }
        }

        /// Snapshot the buffer the hardware would currently be playing.
        fn playing(&self) -> [i16; OUT_BUFFER_SAMPLES] {
            unsafe { *self.output.hardware_buffer() }
        }
    }

    /// Feed `count` ramp samples through the capture adapter in
    /// burst-sized chunks, like the decimator interrupt would.
    fn feed_ramp(capture: &mut CaptureInput<'_, MIC_BUFFER_SAMPLES>, start: i16, count: usize) {
        let mut next = start;
        let mut burst = [0i16; MIC_BURST_SAMPLES];
        for _ in 0..count / MIC_BURST_SAMPLES {
            for s in burst.iter_mut() {
                *s = next;
                next = next.wrapping_add(1);
            }
            capture.on_samples_ready(&burst);
        }
    }

    #[test]
    fn end_to_end_passthrough() {
        let board = Board::new();
        let mut capture = CaptureInput::new(&board.ring, &board.clip);
        let mut sched = StreamScheduler::new(&board.ring, &board.output, &board.mode);

        // Nothing happens until the startup margin is established.
        feed_ramp(&mut capture, 0, START_THRESHOLD_SAMPLES - MIC_BURST_SAMPLES);
        assert_eq!(sched.poll(), Ok(Activity::Idle));

        feed_ramp(
            &mut capture,
            (START_THRESHOLD_SAMPLES - MIC_BURST_SAMPLES) as i16,
            MIC_BURST_SAMPLES,
        );
        assert_eq!(sched.poll(), Ok(Activity::Armed));

        // The hardware starts on silence while buffer 1 holds real audio.
        assert!(board.playing().iter().all(|&s| s == 0));

        // Simulate three DMA periods and check each played buffer carries
        // the next 512 ramp samples, duplicated L/R, in order.
        for block in 0..3usize {
            // Keep the producer ahead of the consumer.
            feed_ramp(
                &mut capture,
                ((block + 2) * BLOCK_SAMPLES) as i16,
                BLOCK_SAMPLES,
            );

            board.output.on_buffer_consumed();
            let played = board.playing();
            for i in 0..BLOCK_SAMPLES {
                let expected = (block * BLOCK_SAMPLES + i) as i16;
                assert_eq!(played[i * 2], expected, "block {block} left slot {i}");
                assert_eq!(played[i * 2 + 1], expected, "block {block} right slot {i}");
            }

            assert!(matches!(sched.poll(), Ok(Activity::Refilled { .. })));
        }

        let stats = sched.stats();
        assert_eq!(stats.blocks, 4);
        assert_eq!(stats.underruns, 0);
        assert_eq!(stats.overruns, 0);
        assert!(!board.clip.is_set());
    }

    #[test]
    fn filtered_stream_of_silence_stays_silent() {
        let board = Board::new();
        board.mode.bump(); // enable the low-pass
        let mut capture = CaptureInput::new(&board.ring, &board.clip);
        let mut sched = StreamScheduler::new(&board.ring, &board.output, &board.mode);

        let quiet = [0i16; MIC_BURST_SAMPLES];
        for _ in 0..START_THRESHOLD_SAMPLES / MIC_BURST_SAMPLES {
            capture.on_samples_ready(&quiet);
        }

        assert_eq!(sched.poll(), Ok(Activity::Armed));
        for _ in 0..4 {
            for _ in 0..BLOCK_SAMPLES / MIC_BURST_SAMPLES {
                capture.on_samples_ready(&quiet);
            }
            board.output.on_buffer_consumed();
            sched.poll().unwrap();
            assert!(board.playing().iter().all(|&s| s == 0));
        }
    }

    #[test]
    fn stalled_producer_degrades_to_silence_then_recovers() {
        let board = Board::new();
        let mut capture = CaptureInput::new(&board.ring, &board.clip);
        let mut sched = StreamScheduler::new(&board.ring, &board.output, &board.mode);

        feed_ramp(&mut capture, 1, START_THRESHOLD_SAMPLES);
        sched.poll().unwrap(); // arm; one block left in the ring

        // Producer stalls: drain the remaining block, then underrun twice.
        for _ in 0..3 {
            board.output.on_buffer_consumed();
            sched.poll().unwrap();
        }
        assert_eq!(sched.stats().underruns, 2);
        assert_eq!(sched.state(), SchedulerState::Steady);

        // Producer resumes; the pipeline picks real audio back up.
        feed_ramp(&mut capture, 7, BLOCK_SAMPLES);
        board.output.on_buffer_consumed();
        sched.poll().unwrap();
        board.output.on_buffer_consumed();
        assert_eq!(board.playing()[0], 7);
        assert_eq!(sched.stats().underruns, 2);
    }

    #[test]
    fn clipping_during_stream_is_reported_out_of_band() {
        let board = Board::new();
        let mut capture = CaptureInput::new(&board.ring, &board.clip);
        let mut sched = StreamScheduler::new(&board.ring, &board.output, &board.mode);

        feed_ramp(&mut capture, 0, START_THRESHOLD_SAMPLES - MIC_BURST_SAMPLES);

        let mut hot = [0i16; MIC_BURST_SAMPLES];
        hot[0] = 32_750;
        capture.on_samples_ready(&hot);

        assert!(board.clip.is_set());
        // The stream itself is unaffected.
        assert_eq!(sched.poll(), Ok(Activity::Armed));
        assert_eq!(sched.stats().underruns, 0);
    }

    #[test]
    fn fault_mid_stream_stops_everything() {
        let board = Board::new();
        let mut capture = CaptureInput::new(&board.ring, &board.clip);
        let mut sched = StreamScheduler::new(&board.ring, &board.output, &board.mode);

        feed_ramp(&mut capture, 0, START_THRESHOLD_SAMPLES);
        sched.poll().unwrap();

        board.output.on_playback_error();
        assert!(sched.poll().is_err());

        // Capture keeps landing bursts (the producer cannot be blocked),
        // but the scheduler never drains them again.
        feed_ramp(&mut capture, 0, BLOCK_SAMPLES);
        let len_before = board.ring.len();
        assert!(sched.poll().is_err());
        assert_eq!(board.ring.len(), len_before);
    }
}
