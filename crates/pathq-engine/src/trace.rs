//! Solver instrumentation.
//!
//! `NoopTracer` methods are `#[inline(always)]` no-ops, so the default
//! solver entry points pay nothing for the hooks. Structured logging goes
//! through `tracing` independently of this trait.

use pathq_core::VarId;

/// Hooks called by the fixed-point solvers.
///
/// Vertices are matrix indices; names are resolved by the caller.
pub trait Tracer {
    /// A triple was taken off the worklist.
    fn trace_pop(&mut self, from: u32, variable: VarId, to: u32);

    /// A triple entered the result set, which now holds `total` triples.
    fn trace_derived(&mut self, from: u32, variable: VarId, to: u32, total: usize);

    /// A fixed-point round finished with `size` entries in the tracked structure.
    fn trace_round(&mut self, round: usize, size: u64);
}

/// Tracer that compiles away.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_pop(&mut self, _from: u32, _variable: VarId, _to: u32) {}

    #[inline(always)]
    fn trace_derived(&mut self, _from: u32, _variable: VarId, _to: u32, _total: usize) {}

    #[inline(always)]
    fn trace_round(&mut self, _round: usize, _size: u64) {}
}
