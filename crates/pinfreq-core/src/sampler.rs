//! Per-line transition counting.
//!
//! The sampler owns one slot per line: the last observed level and a flip
//! counter. `poll_once` is the hot-loop body and must stay allocation-free;
//! it reads every line once and counts any level change since the previous
//! pass.

use anyhow::Result;

use crate::source::LineSource;

/// State for a single line: last observed level and transitions seen in the
/// current measurement window.
#[derive(Debug, Clone, Copy, Default)]
struct LineState {
    /// `None` until the first sample establishes a baseline.
    previous: Option<bool>,
    flips: u64,
}

/// Transition counters for a fixed bank of lines, indexed by offset.
#[derive(Debug)]
pub struct Sampler {
    lines: Vec<LineState>,
}

impl Sampler {
    /// Creates a sampler for `line_count` lines, all in the unknown state
    /// with zero flips.
    pub fn new(line_count: usize) -> Self {
        Self {
            lines: vec![LineState::default(); line_count],
        }
    }

    /// Number of lines tracked.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Reads every line once and updates its flip counter.
    ///
    /// The first sample of a line only establishes the baseline level and is
    /// never counted as a flip.
    ///
    /// # Errors
    /// Propagates the first read failure; the pass is abandoned and the run
    /// is invalid from that point (no retry).
    pub fn poll_once(&mut self, source: &impl LineSource) -> Result<()> {
        for offset in 0..self.lines.len() {
            let level = source.read_level(offset as u32)?;
            self.record(offset, level);
        }
        Ok(())
    }

    /// Applies one observed level to the line at `index`.
    ///
    /// Counts a flip iff the previous level is known and differs.
    pub fn record(&mut self, index: usize, level: bool) {
        let line = &mut self.lines[index];
        if let Some(previous) = line.previous
            && previous != level
        {
            line.flips += 1;
        }
        line.previous = Some(level);
    }

    /// Flips counted for the line at `index` in the current window.
    pub fn flips(&self, index: usize) -> u64 {
        self.lines[index].flips
    }

    /// Zeroes every flip counter for a new measurement window.
    ///
    /// Last-seen levels are preserved so transitions keep being counted
    /// relative to them across window boundaries.
    pub fn reset_flips(&mut self) {
        for line in &mut self.lines {
            line.flips = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::bail;

    use super::*;
    use crate::source::LineSource;

    /// Scripted source: each line replays a fixed sequence of levels, one
    /// entry per poll pass.
    struct ScriptedSource {
        scripts: Vec<Vec<bool>>,
        pass: std::cell::Cell<usize>,
        fail_at_pass: Option<usize>,
    }

    impl ScriptedSource {
        fn new(scripts: Vec<Vec<bool>>) -> Self {
            Self {
                scripts,
                pass: std::cell::Cell::new(0),
                fail_at_pass: None,
            }
        }

        /// Runs one poll pass per script entry.
        fn drive(&self, sampler: &mut Sampler) -> Result<()> {
            let passes = self.scripts[0].len();
            for pass in 0..passes {
                self.pass.set(pass);
                sampler.poll_once(self)?;
            }
            Ok(())
        }
    }

    impl LineSource for ScriptedSource {
        fn line_count(&self) -> usize {
            self.scripts.len()
        }

        fn read_level(&self, offset: u32) -> Result<bool> {
            if self.fail_at_pass == Some(self.pass.get()) {
                bail!("read line {offset}: simulated failure");
            }
            Ok(self.scripts[offset as usize][self.pass.get()])
        }
    }

    #[test]
    fn test_first_sample_never_counts() {
        let mut sampler = Sampler::new(1);
        sampler.record(0, true);
        assert_eq!(sampler.flips(0), 0);
        sampler.record(0, true);
        assert_eq!(sampler.flips(0), 0);
    }

    #[test]
    fn test_flips_equal_adjacent_differing_pairs() {
        // high, high, low, high, low, low -> 3 transitions
        let samples = [true, true, false, true, false, false];
        let mut sampler = Sampler::new(1);
        for level in samples {
            sampler.record(0, level);
        }
        assert_eq!(sampler.flips(0), 3);
    }

    #[test]
    fn test_alternating_samples_count_all_but_first() {
        let mut sampler = Sampler::new(1);
        for i in 0..50 {
            sampler.record(0, i % 2 == 0);
        }
        assert_eq!(sampler.flips(0), 49);
    }

    #[test]
    fn test_reset_preserves_previous_level() {
        let mut sampler = Sampler::new(1);
        sampler.record(0, false);
        sampler.record(0, true);
        assert_eq!(sampler.flips(0), 1);

        sampler.reset_flips();
        assert_eq!(sampler.flips(0), 0);

        // Same level as before the reset: no flip.
        sampler.record(0, true);
        assert_eq!(sampler.flips(0), 0);
        // Differing level is counted against the pre-reset baseline.
        sampler.record(0, false);
        assert_eq!(sampler.flips(0), 1);
    }

    #[test]
    fn test_poll_once_tracks_each_line_independently() {
        let source = ScriptedSource::new(vec![
            vec![false, true, false, true], // 3 flips
            vec![true, true, true, true],   // constant, 0 flips
            vec![false, false, true, true], // 1 flip
        ]);
        let mut sampler = Sampler::new(source.line_count());
        source.drive(&mut sampler).unwrap();

        assert_eq!(sampler.flips(0), 3);
        assert_eq!(sampler.flips(1), 0);
        assert_eq!(sampler.flips(2), 1);
    }

    #[test]
    fn test_poll_once_propagates_read_failure() {
        let mut source = ScriptedSource::new(vec![vec![false, true]]);
        source.fail_at_pass = Some(1);
        let mut sampler = Sampler::new(1);

        let err = source.drive(&mut sampler).unwrap_err();
        assert!(err.to_string().contains("simulated failure"));
        // The failing pass counted nothing.
        assert_eq!(sampler.flips(0), 0);
    }
}
