/// Fixed per-instance settings, agreed with the host before processing
/// starts.
///
/// `max_block_size` is the largest frame count one process call may carry.
/// Hosts are free to deliver shorter blocks, never longer ones, so buffer
/// pools are sized against it once and reused.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub sample_rate: usize,
    pub max_block_size: usize,
}

impl Config {
    pub fn new(sample_rate: usize, max_block_size: usize) -> Self {
        Self {
            sample_rate,
            max_block_size,
        }
    }

    pub fn validate(&self) {
        assert!(self.sample_rate > 0);
        assert!(self.max_block_size > 0);
    }
}
