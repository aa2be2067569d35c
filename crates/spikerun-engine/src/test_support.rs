//! Recording simulation shared by the unit tests.

use anyhow::{bail, Result};

use crate::core::Simulation;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Advance(f64),
    Draw(&'static str),
    Jump,
    Reset,
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<Call>,
    /// Zero-based advance call that fails.
    pub fail_advance_at: Option<usize>,
    /// Zero-based draw call that fails.
    pub fail_draw_at: Option<usize>,
    advance_count: usize,
    draw_count: usize,
}

impl Recorder {
    pub fn failing_advance(at: usize) -> Self {
        Self { fail_advance_at: Some(at), ..Self::default() }
    }

    pub fn failing_draw(at: usize) -> Self {
        Self { fail_draw_at: Some(at), ..Self::default() }
    }

    pub fn advances(&self) -> Vec<f64> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Advance(dt) => Some(*dt),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }
}

impl Simulation for Recorder {
    type Surface = &'static str;

    fn advance(&mut self, dt: f64) -> Result<()> {
        let n = self.advance_count;
        self.advance_count += 1;
        if self.fail_advance_at == Some(n) {
            bail!("advance {n} exploded");
        }
        self.calls.push(Call::Advance(dt));
        Ok(())
    }

    fn draw(&mut self, surface: &Self::Surface) -> Result<()> {
        let n = self.draw_count;
        self.draw_count += 1;
        if self.fail_draw_at == Some(n) {
            bail!("draw {n} exploded");
        }
        self.calls.push(Call::Draw(*surface));
        Ok(())
    }

    fn trigger_jump(&mut self) {
        self.calls.push(Call::Jump);
    }

    fn reset(&mut self) {
        self.calls.push(Call::Reset);
    }
}

pub fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}
