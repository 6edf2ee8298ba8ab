//! Fixed-band energy averaging
//!
//! Seven perceptual bands, sub-bass through brilliance:
//!
//! | Band           | Range          | Bandwidth |
//! |----------------|----------------|-----------|
//! | Sub-bass       | 20 Hz - 60 Hz  | 40 Hz     |
//! | Bass           | 60 Hz - 250 Hz | 190 Hz    |
//! | Low midrange   | 250 Hz - 500 Hz| 250 Hz    |
//! | Midrange       | 500 Hz - 2 kHz | 1.5 kHz   |
//! | Upper midrange | 2 kHz - 4 kHz  | 2 kHz     |
//! | Presence       | 4 kHz - 6 kHz  | 2 kHz     |
//! | Brilliance     | 6 kHz - 20 kHz | 14 kHz    |
//!
//! Band edges are laid out in bins by dividing each bandwidth by the bin
//! width and accumulating, starting after the DC bin.

use std::fmt;
use std::ops::Range;

/// Number of bands in every result
pub const BAND_COUNT: usize = 7;

/// Perceptual frequency band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Band {
    SubBass,
    Bass,
    LowMidrange,
    Midrange,
    UpperMidrange,
    Presence,
    Brilliance,
}

impl Band {
    /// All bands, lowest first
    pub const ALL: [Band; BAND_COUNT] = [
        Band::SubBass,
        Band::Bass,
        Band::LowMidrange,
        Band::Midrange,
        Band::UpperMidrange,
        Band::Presence,
        Band::Brilliance,
    ];

    /// Position in [`Band::ALL`] and in result arrays
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Band::SubBass => "sub-bass",
            Band::Bass => "bass",
            Band::LowMidrange => "low-midrange",
            Band::Midrange => "midrange",
            Band::UpperMidrange => "upper-midrange",
            Band::Presence => "presence",
            Band::Brilliance => "brilliance",
        }
    }

    /// Width used to lay the band out in bins
    pub fn bandwidth_hz(self) -> f64 {
        match self {
            Band::SubBass => 40.0,
            Band::Bass => 190.0,
            Band::LowMidrange => 250.0,
            Band::Midrange => 1500.0,
            Band::UpperMidrange => 2000.0,
            Band::Presence => 2000.0,
            Band::Brilliance => 14000.0,
        }
    }

    /// Conventional (low, high) edges in Hz
    pub fn nominal_range_hz(self) -> (f64, f64) {
        match self {
            Band::SubBass => (20.0, 60.0),
            Band::Bass => (60.0, 250.0),
            Band::LowMidrange => (250.0, 500.0),
            Band::Midrange => (500.0, 2000.0),
            Band::UpperMidrange => (2000.0, 4000.0),
            Band::Presence => (4000.0, 6000.0),
            Band::Brilliance => (6000.0, 20000.0),
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Band boundaries as cumulative bin-index cutoffs
///
/// Band `i` owns bins `(cutoffs[i-1], cutoffs[i]]`, with sub-bass starting
/// at bin 1. Cutoffs never exceed the last spectrum bin.
#[derive(Debug, Clone, PartialEq)]
pub struct BandLayout {
    cutoffs: [usize; BAND_COUNT],
    hz_per_bin: f64,
    clamped: bool,
}

impl BandLayout {
    /// Derive cutoffs for a spectrum of `frame_size` bins, `hz_per_bin` wide
    ///
    /// Each bandwidth is truncated to whole bins before accumulating.
    /// Cutoffs past the last bin are pulled back to it.
    pub fn new(hz_per_bin: f64, frame_size: usize) -> Self {
        let last_bin = frame_size.saturating_sub(1);
        let mut cutoffs = [0usize; BAND_COUNT];
        let mut cumulative = 0usize;
        let mut clamped = false;

        for (cutoff, band) in cutoffs.iter_mut().zip(Band::ALL) {
            let bins = (band.bandwidth_hz() / hz_per_bin) as usize;
            cumulative = cumulative.saturating_add(bins);

            if cumulative > last_bin {
                clamped = true;
            }
            *cutoff = cumulative.min(last_bin);
        }

        Self {
            cutoffs,
            hz_per_bin,
            clamped,
        }
    }

    pub fn cutoffs(&self) -> &[usize; BAND_COUNT] {
        &self.cutoffs
    }

    /// Highest bin included in any band
    pub fn last_bin(&self) -> usize {
        self.cutoffs[BAND_COUNT - 1]
    }

    /// Whether the spectrum was too short for the nominal layout
    pub fn is_clamped(&self) -> bool {
        self.clamped
    }

    /// Bin indices owned by `band` (possibly empty)
    pub fn bin_range(&self, band: Band) -> Range<usize> {
        let i = band.index();
        let start = if i == 0 { 1 } else { self.cutoffs[i - 1] + 1 };
        start..self.cutoffs[i] + 1
    }

    /// Number of bins averaged into each band
    pub fn bin_counts(&self) -> [usize; BAND_COUNT] {
        let mut counts = [0usize; BAND_COUNT];
        for (count, band) in counts.iter_mut().zip(Band::ALL) {
            *count = self.bin_range(band).len();
        }
        counts
    }

    /// Centre frequencies of the lowest and highest bin in `band`,
    /// or `None` when the band owns no bins
    pub fn frequency_span_hz(&self, band: Band) -> Option<(f64, f64)> {
        let range = self.bin_range(band);
        if range.is_empty() {
            return None;
        }
        Some((
            range.start as f64 * self.hz_per_bin,
            (range.end - 1) as f64 * self.hz_per_bin,
        ))
    }

    /// Mean magnitude of each band
    ///
    /// Bin 0 is skipped. A band that owns no bins reports 0.0. Bins past
    /// the end of a short `spectrum` are treated as absent.
    pub fn averages(&self, spectrum: &[f32]) -> [f32; BAND_COUNT] {
        let mut sums = [0.0f64; BAND_COUNT];
        let mut counts = [0usize; BAND_COUNT];
        let mut band = 0;

        for (bin, &value) in spectrum.iter().enumerate().take(self.last_bin() + 1).skip(1) {
            while bin > self.cutoffs[band] {
                band += 1;
            }
            sums[band] += value as f64;
            counts[band] += 1;
        }

        let mut averages = [0.0f32; BAND_COUNT];
        for ((avg, &sum), &count) in averages.iter_mut().zip(&sums).zip(&counts) {
            if count > 0 {
                *avg = (sum / count as f64) as f32;
            }
        }
        averages
    }
}
