use std::sync::atomic::{AtomicU64, Ordering};

/// An `f64` that supports lock-free accumulation from many threads.
///
/// The value is stored as its bit pattern; additions retry a compare-and-swap until they win.
#[derive(Debug)]
pub struct AtomicF64 {
    bits: AtomicU64,
}

impl AtomicF64 {
    pub fn new(value: f64) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    pub fn load(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    pub fn store(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }

    pub fn add(&self, value: f64) {
        let mut current = self.bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + value).to_bits();
            match self
                .bits
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return,
                Err(actual) => current = actual,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivativeChannel {
    Vdw,
    PermanentElectrostatics,
    InducedElectrostatics,
}

/// Per-ESV dU/dλ accumulators, one array per energy channel.
#[derive(Debug)]
pub struct EsvDerivatives {
    vdw: Vec<AtomicF64>,
    perm_elec: Vec<AtomicF64>,
    ind_elec: Vec<AtomicF64>,
}

impl EsvDerivatives {
    pub fn new(n_esvs: usize) -> Self {
        let zeros = || -> Vec<AtomicF64> { (0..n_esvs).map(|_| AtomicF64::new(0.0)).collect() };
        Self {
            vdw: zeros(),
            perm_elec: zeros(),
            ind_elec: zeros(),
        }
    }

    fn channel(&self, channel: DerivativeChannel) -> &[AtomicF64] {
        match channel {
            DerivativeChannel::Vdw => &self.vdw,
            DerivativeChannel::PermanentElectrostatics => &self.perm_elec,
            DerivativeChannel::InducedElectrostatics => &self.ind_elec,
        }
    }

    pub fn reset(&self, channel: DerivativeChannel) {
        self.channel(channel).iter().for_each(|a| a.store(0.0));
    }

    /// Adds to one ESV slot. Out-of-range indices are ignored.
    #[inline]
    pub fn add(&self, channel: DerivativeChannel, esv: usize, value: f64) {
        if let Some(slot) = self.channel(channel).get(esv) {
            slot.add(value);
        }
    }

    pub fn get(&self, channel: DerivativeChannel, esv: usize) -> f64 {
        self.channel(channel).get(esv).map_or(0.0, AtomicF64::load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_add_accumulates() {
        let value = AtomicF64::new(1.5);
        value.add(2.0);
        value.add(-0.25);
        assert_eq!(value.load(), 3.25);
    }

    #[test]
    fn concurrent_adds_are_not_lost() {
        let value = AtomicF64::new(0.0);
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..1000 {
                        value.add(0.5);
                    }
                });
            }
        });
        assert_eq!(value.load(), 4000.0);
    }

    #[test]
    fn channels_are_independent_and_reset_separately() {
        let derivatives = EsvDerivatives::new(2);
        derivatives.add(DerivativeChannel::Vdw, 0, 1.0);
        derivatives.add(DerivativeChannel::PermanentElectrostatics, 1, 2.0);
        derivatives.add(DerivativeChannel::InducedElectrostatics, 1, 3.0);
        derivatives.reset(DerivativeChannel::PermanentElectrostatics);

        assert_eq!(derivatives.get(DerivativeChannel::Vdw, 0), 1.0);
        assert_eq!(derivatives.get(DerivativeChannel::Vdw, 1), 0.0);
        assert_eq!(derivatives.get(DerivativeChannel::PermanentElectrostatics, 1), 0.0);
        assert_eq!(derivatives.get(DerivativeChannel::InducedElectrostatics, 1), 3.0);
    }

    #[test]
    fn out_of_range_slots_are_ignored() {
        let derivatives = EsvDerivatives::new(1);
        derivatives.add(DerivativeChannel::Vdw, 5, 1.0);
        assert_eq!(derivatives.get(DerivativeChannel::Vdw, 5), 0.0);
        assert_eq!(derivatives.get(DerivativeChannel::Vdw, 0), 0.0);
    }
}
