pub mod cs;

pub use cs::error::{Error, Result};
pub use cs::hashing;
pub use cs::hashing::{
    DoubleHashing, DoubleHashingTable, LinearProbing, LinearProbingHashTable, OpenAddressingTable,
    SecondaryHash,
};
