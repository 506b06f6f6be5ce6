use std::cell::RefCell;
use std::fmt::Write;

/// One row of solver diagnostics.
///
/// `f` is the objective at the iterate (batch/fixed) or the cumulative
/// objective over all samples (sgd). `best` is only set by the stochastic
/// solver.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverTraceRecord {
    pub solver: &'static str,
    pub iter: usize,
    pub f: Option<f64>,
    pub best: Option<f64>,
    pub grad_norm: Option<f64>,
    pub step_size: Option<f64>,
    pub alpha: Option<f64>,
    pub stagnant: Option<usize>,
    pub note: Option<&'static str>,
}

impl SolverTraceRecord {
    fn format_line(&self) -> String {
        let mut line = format!("[{}] iter {:>6}", self.solver, self.iter);
        let columns = [
            ("f", self.f),
            ("best", self.best),
            ("grad", self.grad_norm),
        ];
        for (label, value) in columns {
            if let Some(v) = value {
                let _ = write!(line, " | {label} {v:>13.6e}");
            }
        }
        if let Some(v) = self.step_size {
            let _ = write!(line, " | step {v:>9.3e}");
        }
        if let Some(v) = self.alpha {
            let _ = write!(line, " | alpha {v:>9.3e}");
        }
        if let Some(n) = self.stagnant {
            let _ = write!(line, " | stagnant {n:>4}");
        }
        if let Some(note) = self.note {
            let _ = write!(line, " | {note}");
        }
        line
    }
}

/// A record under construction. The tracer stamps the solver name.
#[derive(Clone, Debug)]
pub(crate) struct TraceRow(SolverTraceRecord);

macro_rules! row_setter {
    ($($name:ident: $ty:ty),* $(,)?) => {
        $(
            pub(crate) fn $name(mut self, $name: $ty) -> Self {
                self.0.$name = Some($name);
                self
            }
        )*
    };
}

impl TraceRow {
    pub(crate) fn iter(iter: usize) -> Self {
        Self(SolverTraceRecord {
            solver: "",
            iter,
            f: None,
            best: None,
            grad_norm: None,
            step_size: None,
            alpha: None,
            stagnant: None,
            note: None,
        })
    }

    row_setter! {
        f: f64,
        best: f64,
        grad_norm: f64,
        step_size: f64,
        alpha: f64,
        stagnant: usize,
        note: &'static str,
    }
}

/// Prints rows when verbose and optionally keeps them for the result.
#[derive(Clone, Debug)]
pub(crate) struct SolverTracer {
    solver: &'static str,
    verbose: bool,
    history: Option<RefCell<Vec<SolverTraceRecord>>>,
}

impl SolverTracer {
    pub(crate) fn new(solver: &'static str, verbose: bool, collect: bool) -> Self {
        Self {
            solver,
            verbose,
            history: collect.then(|| RefCell::new(Vec::new())),
        }
    }

    pub(crate) fn batch(verbose: bool, collect: bool) -> Self {
        Self::new("batch", verbose, collect)
    }

    pub(crate) fn sgd(verbose: bool, collect: bool) -> Self {
        Self::new("sgd", verbose, collect)
    }

    pub(crate) fn fixed(verbose: bool, collect: bool) -> Self {
        Self::new("fixed", verbose, collect)
    }

    /// Whether emitting a row has any effect.
    pub(crate) fn is_active(&self) -> bool {
        self.verbose || self.history.is_some()
    }

    pub(crate) fn emit(&self, row: TraceRow) {
        if !self.is_active() {
            return;
        }
        let record = SolverTraceRecord {
            solver: self.solver,
            ..row.0
        };
        if self.verbose {
            println!("{}", record.format_line());
        }
        if let Some(history) = &self.history {
            history.borrow_mut().push(record);
        }
    }

    /// `None` unless the tracer was built to collect history.
    pub(crate) fn into_history(self) -> Option<Vec<SolverTraceRecord>> {
        self.history.map(RefCell::into_inner)
    }
}
