//! Uniform `[0, 1)` samples for decorative randomness.

use std::cell::Cell;

use super::dom::performance_now;

thread_local! {
    static LCG: Cell<u64> = const { Cell::new(0) };
}

#[cfg(feature = "rng")]
pub fn unit() -> f64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => (u64::from_le_bytes(buf) >> 11) as f64 / (1u64 << 53) as f64,
        Err(_) => clock_lcg(),
    }
}

#[cfg(not(feature = "rng"))]
pub fn unit() -> f64 {
    clock_lcg()
}

// Seeded from the performance clock on first use; not crypto secure.
fn clock_lcg() -> f64 {
    LCG.with(|cell| {
        let mut state = cell.get();
        if state == 0 {
            state = (performance_now() * 1000.0) as u64 | 1;
        }
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        cell.set(state);
        (state >> 11) as f64 / (1u64 << 53) as f64
    })
}
