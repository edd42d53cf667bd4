//! Sampled diagrams, CSV export and text reports

use std::fs::File;
use std::io;
use std::path::Path;

use log::debug;
use serde::Serialize;

use crate::beam::Beam;
use crate::types::*;

/// Upper bound on the default number of sample points
pub const MAX_DEFAULT_SAMPLES: usize = 10_000;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// One sample per millimetre of span, capped at [`MAX_DEFAULT_SAMPLES`]
pub fn default_sample_count(length: f64) -> usize {
    let per_mm = (length * 1000.0).round().max(1.0) as usize + 1;
    per_mm.min(MAX_DEFAULT_SAMPLES)
}

/// `count` evenly spaced points from `start` to `end`, both included
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let intervals = (count - 1) as f64;
            (0..count)
                .map(|i| start + (end - start) * i as f64 / intervals)
                .collect()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct SampleRow {
    x: f64,
    load: f64,
    shear: f64,
    moment: f64,
}

/// Load, shear and moment evaluated on a common grid along the beam
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramSamples {
    pub x: Vec<f64>,
    pub load: Vec<f64>,
    pub shear: Vec<f64>,
    pub moment: Vec<f64>,
}

impl DiagramSamples {
    /// Sample the beam's diagrams at `count` points (at least two)
    pub fn from_beam(beam: &Beam, count: usize) -> Self {
        let (x0, x1) = beam.span();
        let x = linspace(x0, x1, count.max(2));
        debug!("Sampling diagrams at {} points over [{}, {}]", x.len(), x0, x1);

        Self {
            load: beam.distributed_load().sample(&x),
            shear: beam.shear_force().sample(&x),
            moment: beam.bending_moment().sample(&x),
            x,
        }
    }

    /// Sample with [`default_sample_count`] points
    pub fn with_default_resolution(beam: &Beam) -> Self {
        Self::from_beam(beam, default_sample_count(beam.length()))
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn shear_extrema(&self) -> DiagramExtrema {
        DiagramExtrema::of(&self.x, &self.shear)
    }

    pub fn moment_extrema(&self) -> DiagramExtrema {
        DiagramExtrema::of(&self.x, &self.moment)
    }

    fn rows(&self) -> impl Iterator<Item = SampleRow> + '_ {
        (0..self.len()).map(|i| SampleRow {
            x: self.x[i],
            load: self.load[i],
            shear: self.shear[i],
            moment: self.moment[i],
        })
    }

    /// Write `x,load,shear,moment` rows to any writer
    pub fn write_csv_to<W: io::Write>(&self, writer: W) -> Result<(), ExportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in self.rows() {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        self.write_csv_to(File::create(path)?)?;
        debug!("Wrote {} diagram samples to {}", self.len(), path.display());
        Ok(())
    }
}

/// Largest and smallest sampled values and where they first occur
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramExtrema {
    pub max: f64,
    pub max_at: f64,
    pub min: f64,
    pub min_at: f64,
}

impl DiagramExtrema {
    pub fn of(xs: &[f64], values: &[f64]) -> Self {
        let mut extrema = DiagramExtrema {
            max: f64::NEG_INFINITY,
            max_at: f64::NAN,
            min: f64::INFINITY,
            min_at: f64::NAN,
        };
        for (&x, &value) in xs.iter().zip(values) {
            if value > extrema.max {
                extrema.max = value;
                extrema.max_at = x;
            }
            if value < extrema.min {
                extrema.min = value;
                extrema.min_at = x;
            }
        }
        extrema
    }

    /// Value with the largest magnitude
    pub fn absolute_max(&self) -> f64 {
        if self.max.abs() >= self.min.abs() { self.max } else { self.min }
    }
}

/// Summary of a solved beam
#[derive(Debug, Clone, PartialEq)]
pub struct BeamReport {
    pub span: (f64, f64),
    pub fixed_support: f64,
    pub rolling_support: f64,
    pub load_count: usize,
    pub reactions: (f64, f64, f64),
    pub shear: DiagramExtrema,
    pub moment: DiagramExtrema,
    pub in_equilibrium: bool,
}

impl BeamReport {
    pub fn new(beam: &Beam, samples: &DiagramSamples) -> Self {
        Self {
            span: beam.span(),
            fixed_support: beam.fixed_support(),
            rolling_support: beam.rolling_support(),
            load_count: beam.loads().len(),
            reactions: beam.get_reaction_forces(),
            shear: samples.shear_extrema(),
            moment: samples.moment_extrema(),
            in_equilibrium: beam.is_in_equilibrium(1e-6),
        }
    }

    pub fn summary(&self) -> String {
        let length = |x: f64| DisplayLength(from_coord(x));
        let force = |f: f64| DisplayForce(from_internal_force(f));
        let moment = |m: f64| DisplayTorque(from_internal_moment(m));
        let (f_ax, f_ay, f_by) = self.reactions;

        let mut s = String::new();
        s.push_str("Beam Analysis:\n");
        s.push_str(&format!(" Span: {} to {}\n", length(self.span.0), length(self.span.1)));
        s.push_str(&format!(" Fixed Support: x = {}\n", length(self.fixed_support)));
        s.push_str(&format!(" Rolling Support: x = {}\n", length(self.rolling_support)));
        s.push_str(&format!(" Loads: {}\n", self.load_count));

        s.push_str("\nReactions:\n");
        s.push_str(&format!(" F_Ax: {}\n", force(f_ax)));
        s.push_str(&format!(" F_Ay: {}\n", force(f_ay)));
        s.push_str(&format!(" F_By: {}\n", force(f_by)));
        s.push_str(&format!(
            " Equilibrium: {}\n",
            if self.in_equilibrium { "OK" } else { "NOT SATISFIED" }
        ));

        s.push_str("\nShear Force:\n");
        s.push_str(&format!(" Max: {} at x = {}\n", force(self.shear.max), length(self.shear.max_at)));
        s.push_str(&format!(" Min: {} at x = {}\n", force(self.shear.min), length(self.shear.min_at)));

        s.push_str("\nBending Moment:\n");
        s.push_str(&format!(" Max: {} at x = {}\n", moment(self.moment.max), length(self.moment.max_at)));
        s.push_str(&format!(" Min: {} at x = {}\n", moment(self.moment.min), length(self.moment.min_at)));
        s
    }
}
