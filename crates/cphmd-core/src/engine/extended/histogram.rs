pub const BINS: usize = 10;

/// Maps a lambda to its tenth-width bin; exactly 1.0 falls in the last bin.
#[inline]
pub fn lambda_bin(lambda: f64) -> usize {
    ((lambda * BINS as f64) as usize).min(BINS - 1)
}

/// Per-residue 10×10 occupancy counts, indexed `[titration bin][tautomer bin]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LambdaHistogram {
    counts: Vec<[[u64; BINS]; BINS]>,
}

impl LambdaHistogram {
    pub fn new(n_titrating: usize) -> Self {
        Self {
            counts: vec![[[0; BINS]; BINS]; n_titrating],
        }
    }

    /// Records one sample. Residues without a tautomer record into tautomer bin 0.
    pub fn record(&mut self, residue: usize, titration_lambda: f64, tautomer_lambda: Option<f64>) {
        let Some(grid) = self.counts.get_mut(residue) else {
            return;
        };
        let taut_bin = tautomer_lambda.map_or(0, lambda_bin);
        grid[lambda_bin(titration_lambda)][taut_bin] += 1;
    }

    pub fn counts(&self, residue: usize) -> Option<&[[u64; BINS]; BINS]> {
        self.counts.get(residue)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Text table per titrating residue: rows are titration bins, columns tautomer bins.
    pub fn report(&self) -> String {
        let bounds = |k: usize| format!("[{:.1}-{:.1}]", k as f64 / 10.0, (k + 1) as f64 / 10.0);
        let columns: String = (0..BINS).map(|k| format!("{:>10}", bounds(k))).collect();
        let header = format!("      X→ {columns}\nλ↓");

        let mut out = String::new();
        for (esv, grid) in self.counts.iter().enumerate() {
            out.push_str(&format!("ESV: {esv}\n{header}\n"));
            for (j, row) in grid.iter().enumerate() {
                let counts: String = row.iter().map(|count| format!("{count:>10}")).collect();
                out.push_str(&format!("{}{counts}\n", bounds(j)));
            }
            out.push('\n');
        }
        out
    }
}
