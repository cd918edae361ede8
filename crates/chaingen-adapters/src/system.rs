//! Host system queries.

use chaingen_core::application::ports::CpuCount;

/// Logical CPU count of the running machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumCpus;

impl CpuCount for NumCpus {
    fn cpu_count(&self) -> usize {
        num_cpus::get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_least_one_cpu() {
        assert!(NumCpus.cpu_count() >= 1);
    }
}
