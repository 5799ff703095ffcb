pub mod alphabet;
pub mod bwt;
pub mod compress;
pub mod doubling;
pub mod huffman;
pub mod lcp;
pub mod mtf;
pub mod rmq;
pub mod stats;
pub mod table;

pub use alphabet::Alphabet;
pub use bwt::Bwt;
pub use compress::Compressed;
pub use lcp::LcpArray;
pub use rmq::IntervalMin;
pub use stats::LcpStats;
pub use table::SuffixTable;
