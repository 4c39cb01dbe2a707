//! Recompresses every entry of a DBPF archive through the QFS/RefPack codec.
//!
//! [`qfs`] implements the codec itself; [`dbpf`] parses and re-emits the
//! container format around it; [`driver`] fans recompression out across
//! worker threads; [`cli`] is the small argument surface the binary uses.

pub mod cli;
pub mod config;
pub mod dbpf;
pub mod driver;
pub mod qfs;
pub mod stream;
pub mod util;

pub use dbpf::{DbpfError, EntryModel, Identity, Pack, PackageReader, PackageWriter};
pub use driver::recompress_pack;
