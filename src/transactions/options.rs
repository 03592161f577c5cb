//! LayerZero type 3 message options.

use alloy::primitives::Bytes;

/// Options format version.
const TYPE_3: u16 = 3;
/// Worker id of the executor.
const EXECUTOR_WORKER_ID: u8 = 1;
/// Executor option type of `lzReceive` gas and value.
const OPTION_TYPE_LZRECEIVE: u8 = 1;

/// Builder for LayerZero type 3 options.
///
/// Every option is encoded as `worker id (u8) | option size (u16) | option type (u8) | data`,
/// where the size covers the option type and the data.
#[derive(Debug, Clone)]
pub struct OptionsBuilder {
    options: Vec<u8>,
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionsBuilder {
    /// Creates empty type 3 options.
    pub fn new() -> Self {
        Self { options: TYPE_3.to_be_bytes().to_vec() }
    }

    /// Adds an executor `lzReceive` option.
    ///
    /// The value is only encoded when it is non-zero.
    pub fn add_executor_lz_receive_option(self, gas: u128, value: u128) -> Self {
        let mut data = gas.to_be_bytes().to_vec();
        if value != 0 {
            data.extend_from_slice(&value.to_be_bytes());
        }
        self.add_executor_option(OPTION_TYPE_LZRECEIVE, &data)
    }

    fn add_executor_option(mut self, option_type: u8, data: &[u8]) -> Self {
        let size = (data.len() + 1) as u16;
        self.options.push(EXECUTOR_WORKER_ID);
        self.options.extend_from_slice(&size.to_be_bytes());
        self.options.push(option_type);
        self.options.extend_from_slice(data);
        self
    }

    /// Builds the options.
    pub fn build(self) -> Bytes {
        self.options.into()
    }
}
